//! Capture type for scraped command output.

use std::time::Duration;

use crate::channel::split_lines;

/// Raw output of one command scraped from one device.
#[derive(Debug, Clone)]
pub struct Capture {
    /// The device the command ran on.
    pub host: String,

    /// The command that was executed.
    pub command: String,

    /// Everything read within the command delay, lossily decoded.
    pub output: String,

    /// Time taken from connect to close.
    pub elapsed: Duration,

    /// Whether more output arrived than the read budget allowed.
    pub truncated: bool,
}

impl Capture {
    /// Create a new capture.
    pub fn new(
        host: impl Into<String>,
        command: impl Into<String>,
        output: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            host: host.into(),
            command: command.into(),
            output: output.into(),
            elapsed,
            truncated: false,
        }
    }

    /// Mark the capture as cut off by the read budget.
    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    /// Output split on `'\n'`, carriage returns kept.
    pub fn lines(&self) -> Vec<String> {
        split_lines(&self.output)
    }
}

impl std::fmt::Display for Capture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output)
    }
}
