//! Platform definitions.
//!
//! A platform bundles the commands, waits and read limits used to scrape
//! one family of devices.

mod definition;
pub mod vendors;

pub use definition::PlatformDefinition;
