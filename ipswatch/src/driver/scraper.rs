//! SSH scraper: one short-lived session per command.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{debug, warn};
use secrecy::SecretString;

use super::Scraper;
use super::response::Capture;
use crate::channel::PtyChannel;
use crate::error::Result;
use crate::platform::PlatformDefinition;
use crate::transport::{HostKeyVerification, SshConfig, SshTransport};

/// Scraper that logs into each device over SSH.
///
/// Each call to [`fetch_command_output`](Scraper::fetch_command_output):
/// - connects and authenticates
/// - opens a PTY shell
/// - sends the paging command and discards its echo after the paging delay
/// - sends the command and reads after the command delay, up to the budget
/// - closes the session
pub struct SshScraper {
    /// Username for authentication.
    pub(crate) username: String,

    /// Login password.
    pub(crate) password: SecretString,

    /// SSH port.
    pub(crate) port: u16,

    /// Connection timeout.
    pub(crate) timeout: Duration,

    /// Commands, waits and limits for the target devices.
    pub(crate) platform: PlatformDefinition,

    /// Strip ANSI escape codes from the capture.
    pub(crate) strip_ansi: bool,

    /// Host key verification mode.
    pub(crate) host_key_verification: HostKeyVerification,

    /// Path to known_hosts file.
    pub(crate) known_hosts_path: Option<PathBuf>,
}

impl SshScraper {
    /// Get a reference to the platform definition.
    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    /// Build the SSH configuration for one host.
    pub fn ssh_config(&self, host: &str) -> SshConfig {
        SshConfig {
            host: host.to_string(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            timeout: self.timeout,
            terminal_width: self.platform.terminal_width,
            terminal_height: self.platform.terminal_height,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path.clone(),
        }
    }

    /// Send a line to the shell, preceded by a bare newline to wake it up.
    async fn send_line(shell: &mut PtyChannel, command: &str) -> Result<()> {
        shell.send("\n").await?;
        shell.send(&format!("{}\n", command)).await
    }

    /// Run the paging and target commands on an open transport.
    async fn run_on(&self, transport: &SshTransport, command: &str) -> Result<(Vec<u8>, bool)> {
        let mut shell = transport.open_shell().await?;
        shell.set_strip_ansi(self.strip_ansi);

        let budget = self.platform.read_budget;

        Self::send_line(&mut shell, &self.platform.paging_command).await?;
        let discarded = shell.read_after(self.platform.paging_delay, budget).await?;
        debug!(
            "{}: discarded {} bytes after '{}'",
            transport.host(),
            discarded.len(),
            self.platform.paging_command
        );

        Self::send_line(&mut shell, command).await?;
        let data = shell.read_after(self.platform.command_delay, budget).await?;
        let truncated = shell.pending() > 0;

        if let Err(e) = shell.close().await {
            warn!("{}: error while closing the shell: {}", transport.host(), e);
        }
        Ok((data, truncated))
    }
}

impl Scraper for SshScraper {
    async fn fetch_command_output(&mut self, host: &str, command: &str) -> Result<Capture> {
        let start = Instant::now();

        let transport = SshTransport::connect(self.ssh_config(host)).await?;
        let outcome = self.run_on(&transport, command).await;

        if let Err(e) = transport.close().await {
            warn!("{}: error while disconnecting: {}", host, e);
        }

        let (data, truncated) = outcome?;
        if truncated {
            debug!(
                "{}: output of '{}' exceeded the {} byte read budget",
                host, command, self.platform.read_budget
            );
        }

        let output = String::from_utf8_lossy(&data).into_owned();
        Ok(Capture::new(host, command, output, start.elapsed()).with_truncated(truncated))
    }

    fn inventory_command(&self) -> &str {
        &self.platform.inventory_command
    }
}
