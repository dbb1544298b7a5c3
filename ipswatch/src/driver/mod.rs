//! High-level driver for scraping device output.
//!
//! The driver layer ties the SSH transport and the shell channel together
//! into one call: connect, disable paging, run a command, read, close.

mod builder;
mod response;
mod scraper;

pub use builder::ScraperBuilder;
pub use response::Capture;
pub use scraper::SshScraper;

use std::future::Future;

use crate::error::Result;

/// Source of raw command output from devices.
///
/// [`SshScraper`] is the real implementation. Inventory collection is
/// written against this trait so it can run against canned output.
pub trait Scraper: Send {
    /// Run `command` on `host` and return what the device printed.
    fn fetch_command_output(
        &mut self,
        host: &str,
        command: &str,
    ) -> impl Future<Output = Result<Capture>> + Send;

    /// The command whose output describes the device.
    fn inventory_command(&self) -> &str {
        "show version"
    }
}
