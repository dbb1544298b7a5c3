//! Cisco IPS sensor platform definition.
//!
//! Covers IPS 7.x sensors (IPS 4200 appliances, ASA-SSM/SSC modules and
//! AIM/NME router modules). These sensors expose a Cisco-style CLI where
//! `show version` prints a banner like:
//!
//! ```text
//! Application Partition:
//!
//! Cisco Intrusion Prevention System, Version 7.1(6)E4
//!
//! Host:
//!     Realm Keys          key1.0
//! Signature Definition:
//!     Signature Update    S867.0                   2015-05-11
//! ...
//! Platform:                ASA-SSM-20
//! Serial Number:           ABC1234567
//! ```

use std::time::Duration;

use crate::platform::PlatformDefinition;

/// Create the Cisco IPS platform definition.
pub fn platform() -> PlatformDefinition {
    PlatformDefinition::new("cisco_ips")
        .with_paging_command("terminal length 0")
        .with_inventory_command("show version")
        .with_paging_delay(Duration::from_secs(1))
        .with_command_delay(Duration::from_secs(2))
        .with_read_budget(10_000)
        .with_terminal_size(511, 24)
}
