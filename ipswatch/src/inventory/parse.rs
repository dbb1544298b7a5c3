//! Screen-scrape parser for `show version` output.
//!
//! Matching is literal and tied to the exact banner wording of IPS 7.x.
//! Every rule runs against every line; one line can feed several fields
//! and a later line overwrites an earlier value for the same field.

use log::trace;

use super::record::{DeviceRecord, Field};

const PLATFORM_MARKER: &str = "Platform:";
const SERIAL_MARKER: &str = "Serial Number:";
const SIGNATURE_MARKER: &str = "Signature Update";
const VERSION_MARKER: &str = "Cisco Intrusion Prevention System";
const VERSION_SPLIT: &str = "Cisco Intrusion Prevention System, Version ";

/// Parse scraped lines into a device record.
///
/// Never fails. A line that matches a marker but not the expected token
/// layout is skipped and the field stays missing.
pub fn parse_record<S: AsRef<str>>(lines: &[S]) -> DeviceRecord {
    let mut record = DeviceRecord::new();
    for line in lines {
        apply_line(&mut record, line.as_ref());
    }
    record
}

/// Apply all rules to a single line.
pub fn apply_line(record: &mut DeviceRecord, line: &str) {
    if line.contains(PLATFORM_MARKER) {
        // "Platform:   ASA-SSM-20": exactly two tokens
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if let [_, platform] = tokens.as_slice() {
            record.set(Field::Platform, *platform);
        } else {
            trace!("platform line has {} tokens: {:?}", tokens.len(), line);
        }
    }

    if line.contains(SERIAL_MARKER) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [_, _, .., serial] => record.set(Field::SerialNumber, *serial),
            _ => trace!("serial line too short: {:?}", line),
        }
    }

    if line.contains(SIGNATURE_MARKER) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 4 {
            record.set(Field::SignatureVersion, tokens[2]);
            record.set(Field::SignatureDate, tokens[3]);
        } else {
            trace!("signature line too short: {:?}", line);
        }
    }

    if line.contains(VERSION_MARKER) {
        let parts: Vec<&str> = line.split(VERSION_SPLIT).collect();
        if let [_, version] = parts.as_slice() {
            record.set(Field::SoftwareVersion, version.trim());
        } else {
            trace!("version banner without a single split marker: {:?}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_VERSION: &str = "\
sensor# show version\r
Application Partition:\r
\r
Cisco Intrusion Prevention System, Version 7.1(6)E4\r
\r
Host:\r
    Realm Keys          key1.0\r
Signature Definition:\r
    Signature Update    S867.0                   2015-05-11\r
OS Version:             2.6.29.1\r
Platform:               ASA-SSM-20\r
Serial Number:          DEF1234567\r
No license present\r
Sensor up-time is 60 days.\r
sensor# ";

    #[test]
    fn test_reference_lines() {
        let lines = [
            "Platform: ASA-SSM-20",
            "Serial Number: X Y ABC1234567",
            "Signature Update S867.0 2015-05-11",
            "Cisco Intrusion Prevention System, Version 7.1(6)E4 junk",
        ];
        let record = parse_record(&lines);

        assert_eq!(record.get(Field::Platform), Some("ASA-SSM-20"));
        assert_eq!(record.get(Field::SerialNumber), Some("ABC1234567"));
        assert_eq!(record.get(Field::SignatureVersion), Some("S867.0"));
        assert_eq!(record.get(Field::SignatureDate), Some("2015-05-11"));
        assert_eq!(record.get(Field::SoftwareVersion), Some("7.1(6)E4 junk"));
    }

    #[test]
    fn test_real_banner() {
        let lines: Vec<&str> = SHOW_VERSION.split('\n').collect();
        let record = parse_record(&lines);

        assert_eq!(record.get(Field::Platform), Some("ASA-SSM-20"));
        assert_eq!(record.get(Field::SerialNumber), Some("DEF1234567"));
        assert_eq!(record.get(Field::SignatureVersion), Some("S867.0"));
        assert_eq!(record.get(Field::SignatureDate), Some("2015-05-11"));
        assert_eq!(record.get(Field::SoftwareVersion), Some("7.1(6)E4"));
    }

    #[test]
    fn test_unrecognized_lines_add_nothing() {
        let lines = [
            "sensor# show version",
            "OS Version: 2.6.29.1",
            "",
            "Sensor up-time is 60 days.",
            "platform: lowercase does not match",
        ];
        assert_eq!(parse_record(&lines), DeviceRecord::new());
    }

    #[test]
    fn test_idempotent() {
        let lines: Vec<&str> = SHOW_VERSION.split('\n').collect();
        assert_eq!(parse_record(&lines), parse_record(&lines));
    }

    #[test]
    fn test_platform_needs_exactly_two_tokens() {
        let record = parse_record(&["Platform: IPS 4240"]);
        assert_eq!(record.get(Field::Platform), None);

        let record = parse_record(&["Platform:"]);
        assert_eq!(record.get(Field::Platform), None);
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let record = parse_record(&["Serial Number:", "Signature Update S867.0"]);
        assert!(record.is_empty());
    }

    #[test]
    fn test_version_without_marker_is_skipped() {
        let record = parse_record(&["Cisco Intrusion Prevention System Software"]);
        assert_eq!(record.get(Field::SoftwareVersion), None);
    }

    #[test]
    fn test_version_marker_twice_is_skipped() {
        let line = "Cisco Intrusion Prevention System, Version 7.0 \
                    Cisco Intrusion Prevention System, Version 7.1";
        let record = parse_record(&[line]);
        assert_eq!(record.get(Field::SoftwareVersion), None);
    }

    #[test]
    fn test_later_line_wins() {
        let record = parse_record(&["Platform: IPS-4240-K9", "Platform: IPS-4255-K9"]);
        assert_eq!(record.get(Field::Platform), Some("IPS-4255-K9"));
    }

    #[test]
    fn test_one_line_can_match_several_rules() {
        let record = parse_record(&["Platform: Serial Number: ABC"]);
        // Four tokens: too many for the platform rule, enough for serial
        assert_eq!(record.get(Field::Platform), None);
        assert_eq!(record.get(Field::SerialNumber), Some("ABC"));
    }
}
