//! Device inventory: scraping, parsing and the host-to-record map.

mod collect;
mod parse;
mod record;

pub use collect::{build_inventory, read_device_list};
pub use parse::{apply_line, parse_record};
pub use record::{DeviceRecord, Field};

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

/// Complete host-to-record map for one run.
///
/// Keys are device identifiers exactly as listed (no trimming, no case
/// folding), so the empty string is a legitimate key. Iteration is
/// lexicographic by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    devices: BTreeMap<String, DeviceRecord>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A duplicate identifier replaces the earlier record.
    pub fn insert(&mut self, host: impl Into<String>, record: DeviceRecord) -> Option<DeviceRecord> {
        self.devices.insert(host.into(), record)
    }

    /// Get the record for a host.
    pub fn get(&self, host: &str) -> Option<&DeviceRecord> {
        self.devices.get(host)
    }

    /// Iterate devices in identifier order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, DeviceRecord> {
        self.devices.iter()
    }

    /// Device identifiers in order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    /// Number of devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Check if the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = (&'a String, &'a DeviceRecord);
    type IntoIter = btree_map::Iter<'a, String, DeviceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, DeviceRecord)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (String, DeviceRecord)>>(iter: I) -> Self {
        Self {
            devices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_iteration() {
        let mut inventory = Inventory::new();
        inventory.insert("ips-b", DeviceRecord::new());
        inventory.insert("ips-a", DeviceRecord::new());
        inventory.insert("", DeviceRecord::new());

        let hosts: Vec<&str> = inventory.hosts().collect();
        assert_eq!(hosts, vec!["", "ips-a", "ips-b"]);
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let mut first = DeviceRecord::new();
        first.set(Field::Platform, "IPS-4240-K9");
        let mut second = DeviceRecord::new();
        second.set(Field::Platform, "IPS-4255-K9");

        let mut inventory = Inventory::new();
        assert!(inventory.insert("ips-1", first.clone()).is_none());
        assert_eq!(inventory.insert("ips-1", second), Some(first));

        assert_eq!(inventory.len(), 1);
        assert_eq!(
            inventory.get("ips-1").and_then(|r| r.get(Field::Platform)),
            Some("IPS-4255-K9")
        );
    }

    #[test]
    fn test_no_key_normalization() {
        let mut inventory = Inventory::new();
        inventory.insert("ips-1", DeviceRecord::new());
        inventory.insert("ips-1 ", DeviceRecord::new());
        inventory.insert("IPS-1", DeviceRecord::new());
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_serialize_as_map() {
        let mut record = DeviceRecord::new();
        record.set(Field::Platform, "ASA-SSM-20");
        let inventory: Inventory = [("ips-1".to_string(), record)].into_iter().collect();

        let json = serde_json::to_string(&inventory).unwrap();
        assert_eq!(json, r#"{"ips-1":{"Platform":"ASA-SSM-20"}}"#);
    }
}
