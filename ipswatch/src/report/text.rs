//! Plain-text inventory report.

use std::fmt::Write;

use crate::inventory::{DeviceRecord, Inventory};

/// Render the inventory as plain text.
///
/// ```text
/// IPS-DEVICE-1
///  -IPS Version: 7.1(6)E4
///  -Platform: ASA-SSM-20
///
/// IPS-DEVICE-2
///  -IPS Version: 7.0(9)E4
/// ```
pub fn render_text(inventory: &Inventory) -> String {
    let blocks: Vec<String> = inventory
        .iter()
        .map(|(host, record)| render_device(host, record))
        .collect();
    blocks.join("\n")
}

fn render_device(host: &str, record: &DeviceRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", host.to_uppercase());
    for (field, value) in record.fields() {
        let _ = writeln!(out, " -{}: {}", field, value);
    }
    out
}
