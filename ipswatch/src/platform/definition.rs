//! Platform definition for vendor-specific scraping parameters.

use std::time::Duration;

/// Platform definition containing everything vendor-specific about a scrape.
///
/// The command strings are sent verbatim, followed by a newline. Delays are
/// fixed waits: the devices offer no end-of-output marker to wait on.
#[derive(Debug, Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g., "cisco_ips").
    pub name: String,

    /// Command that turns off `--More--` pagination.
    pub paging_command: String,

    /// Command whose output is parsed into a device record.
    pub inventory_command: String,

    /// Wait after the paging command before its echo is discarded.
    pub paging_delay: Duration,

    /// Wait after the inventory command before its output is read.
    pub command_delay: Duration,

    /// Maximum bytes taken from the shell per read.
    pub read_budget: usize,

    /// Terminal width for PTY.
    pub terminal_width: u32,

    /// Terminal height for PTY.
    pub terminal_height: u32,
}

impl PlatformDefinition {
    /// Create a new platform definition with generic defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paging_command: "terminal length 0".to_string(),
            inventory_command: "show version".to_string(),
            paging_delay: Duration::from_secs(1),
            command_delay: Duration::from_secs(2),
            read_budget: 10_000,
            terminal_width: 511,
            terminal_height: 24,
        }
    }

    /// Set the paging command.
    pub fn with_paging_command(mut self, command: impl Into<String>) -> Self {
        self.paging_command = command.into();
        self
    }

    /// Set the inventory command.
    pub fn with_inventory_command(mut self, command: impl Into<String>) -> Self {
        self.inventory_command = command.into();
        self
    }

    /// Set the wait after the paging command.
    pub fn with_paging_delay(mut self, delay: Duration) -> Self {
        self.paging_delay = delay;
        self
    }

    /// Set the wait after the inventory command.
    pub fn with_command_delay(mut self, delay: Duration) -> Self {
        self.command_delay = delay;
        self
    }

    /// Set the per-read byte budget.
    pub fn with_read_budget(mut self, budget: usize) -> Self {
        self.read_budget = budget;
        self
    }

    /// Set terminal dimensions.
    pub fn with_terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }
}
