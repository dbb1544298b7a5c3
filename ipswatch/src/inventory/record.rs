//! Device record: the facts scraped from one sensor.

use std::fmt;

use serde::Serialize;

/// A fact the parser knows how to pull out of `show version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    SoftwareVersion,
    Platform,
    SerialNumber,
    SignatureDate,
    SignatureVersion,
}

impl Field {
    /// All fields, in report order (sorted by label).
    pub const ALL: [Field; 5] = [
        Field::SoftwareVersion,
        Field::Platform,
        Field::SerialNumber,
        Field::SignatureDate,
        Field::SignatureVersion,
    ];

    /// Label printed in reports.
    pub fn label(self) -> &'static str {
        match self {
            Field::SoftwareVersion => "IPS Version",
            Field::Platform => "Platform",
            Field::SerialNumber => "Serial No.",
            Field::SignatureDate => "Signature Date",
            Field::SignatureVersion => "Signature Version",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsed fact set for one appliance.
///
/// Fields missing from the scraped output stay `None`; nothing is defaulted.
/// Struct field order matches [`Field::ALL`] so serialized output lists
/// fields the same way the text report does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    #[serde(rename = "IPS Version", skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,

    #[serde(rename = "Platform", skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(rename = "Serial No.", skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    #[serde(rename = "Signature Date", skip_serializing_if = "Option::is_none")]
    pub signature_date: Option<String>,

    #[serde(rename = "Signature Version", skip_serializing_if = "Option::is_none")]
    pub signature_version: Option<String>,
}

impl DeviceRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::SoftwareVersion => &self.software_version,
            Field::Platform => &self.platform,
            Field::SerialNumber => &self.serial_number,
            Field::SignatureDate => &self.signature_date,
            Field::SignatureVersion => &self.signature_version,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::SoftwareVersion => &mut self.software_version,
            Field::Platform => &mut self.platform,
            Field::SerialNumber => &mut self.serial_number,
            Field::SignatureDate => &mut self.signature_date,
            Field::SignatureVersion => &mut self.signature_version,
        }
    }

    /// Get a field value.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set a field value, replacing any earlier one.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Present fields in report order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields().count()
    }

    /// Check if no field was found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
