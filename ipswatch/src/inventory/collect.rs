//! Inventory collection over a device list.

use std::path::Path;

use log::{debug, info};

use super::Inventory;
use super::parse::parse_record;
use crate::driver::Scraper;
use crate::error::{Result, UsageError};

/// Read a device list: one identifier per line.
///
/// Only the line terminator `'\n'` is removed. Blank lines become
/// empty-string identifiers, and a `'\r'` from CRLF files stays part of
/// the identifier.
pub fn read_device_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| UsageError::DeviceList {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .split_inclusive('\n')
        .map(|line| line.strip_suffix('\n').unwrap_or(line).to_string())
        .collect())
}

/// Scrape and parse every host, in order.
///
/// The first failure aborts the run and the partial inventory is dropped:
/// reports are all-or-nothing.
pub async fn build_inventory<S: Scraper>(scraper: &mut S, hosts: &[String]) -> Result<Inventory> {
    let command = scraper.inventory_command().to_string();
    let mut inventory = Inventory::new();

    for (index, host) in hosts.iter().enumerate() {
        info!("[{}/{}] collecting from {:?}", index + 1, hosts.len(), host);

        let capture = scraper.fetch_command_output(host, &command).await?;
        let record = parse_record(&capture.lines());

        debug!(
            "{:?}: {} of 5 fields in {:?}{}",
            host,
            record.len(),
            capture.elapsed,
            if capture.truncated { " (truncated)" } else { "" }
        );

        inventory.insert(host.clone(), record);
    }

    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;

    use super::*;
    use crate::Error;
    use crate::driver::Capture;
    use crate::error::TransportError;
    use crate::inventory::Field;

    /// Scraper that replays canned output and fails on unknown hosts.
    struct CannedScraper {
        outputs: HashMap<String, String>,
        visited: Vec<String>,
    }

    impl CannedScraper {
        fn new(outputs: &[(&str, &str)]) -> Self {
            Self {
                outputs: outputs
                    .iter()
                    .map(|(h, o)| (h.to_string(), o.to_string()))
                    .collect(),
                visited: Vec::new(),
            }
        }
    }

    impl Scraper for CannedScraper {
        async fn fetch_command_output(&mut self, host: &str, command: &str) -> Result<Capture> {
            self.visited.push(host.to_string());
            match self.outputs.get(host) {
                Some(output) => Ok(Capture::new(host, command, output.clone(), Duration::ZERO)),
                None => Err(TransportError::AuthenticationFailed {
                    user: "admin".to_string(),
                    host: host.to_string(),
                }
                .into()),
            }
        }
    }

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|h| h.to_string()).collect()
    }

    #[tokio::test]
    async fn test_two_hosts_sorted() {
        let mut scraper = CannedScraper::new(&[
            ("h2", "Platform: IPS-4255-K9\r\n"),
            ("h1", "Platform: ASA-SSM-20\r\nSerial Number: ABC1234567\r\n"),
        ]);

        let inventory = build_inventory(&mut scraper, &hosts(&["h2", "h1"]))
            .await
            .unwrap();

        assert_eq!(scraper.visited, vec!["h2", "h1"]);
        assert_eq!(inventory.hosts().collect::<Vec<_>>(), vec!["h1", "h2"]);
        assert_eq!(
            inventory.get("h1").and_then(|r| r.get(Field::SerialNumber)),
            Some("ABC1234567")
        );
        assert_eq!(
            inventory.get("h2").and_then(|r| r.get(Field::Platform)),
            Some("IPS-4255-K9")
        );
    }

    #[tokio::test]
    async fn test_first_failure_aborts() {
        let mut scraper = CannedScraper::new(&[("h1", "Platform: ASA-SSM-20"), ("h3", "")]);

        let result = build_inventory(&mut scraper, &hosts(&["h1", "h2", "h3"])).await;

        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::AuthenticationFailed { .. }))
        ));
        // h3 is never contacted
        assert_eq!(scraper.visited, vec!["h1", "h2"]);
    }

    #[test]
    fn test_empty_output_gives_empty_record() {
        let mut scraper = CannedScraper::new(&[("h1", "")]);
        let inventory =
            tokio_test::block_on(build_inventory(&mut scraper, &hosts(&["h1"]))).unwrap();
        assert!(inventory.get("h1").is_some_and(|r| r.is_empty()));
    }

    #[test]
    fn test_read_device_list_keeps_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ips-1\n\nips-2 \nIPS-3").unwrap();

        let devices = read_device_list(file.path()).unwrap();
        assert_eq!(devices, vec!["ips-1", "", "ips-2 ", "IPS-3"]);
    }

    #[test]
    fn test_single_blank_line_yields_empty_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\n").unwrap();

        let devices = read_device_list(file.path()).unwrap();
        assert_eq!(devices, vec![""]);

        let mut scraper = CannedScraper::new(&[("", "")]);
        let inventory = tokio_test::block_on(build_inventory(&mut scraper, &devices)).unwrap();
        assert_eq!(inventory.len(), 1);
        assert!(inventory.get("").is_some());
    }

    #[test]
    fn test_crlf_kept_in_identifier() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ips-1\r\n").unwrap();
        assert_eq!(read_device_list(file.path()).unwrap(), vec!["ips-1\r"]);
    }

    #[test]
    fn test_missing_device_list() {
        let result = read_device_list("/nonexistent/ipswatch/devices.txt");
        assert!(matches!(
            result,
            Err(Error::Usage(UsageError::DeviceList { .. }))
        ));
    }
}
