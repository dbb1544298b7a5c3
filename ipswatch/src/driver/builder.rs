//! Builder for creating SSH scrapers.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::scraper::SshScraper;
use crate::error::{Result, UsageError};
use crate::platform::{PlatformDefinition, vendors};
use crate::transport::HostKeyVerification;

/// Builder for constructing an [`SshScraper`].
///
/// # Example
///
/// ```rust,no_run
/// use ipswatch::driver::{Scraper, ScraperBuilder};
///
/// # async fn example() -> Result<(), ipswatch::Error> {
/// let mut scraper = ScraperBuilder::new()
///     .username("admin")
///     .password("secret")
///     .build()?;
///
/// let capture = scraper.fetch_command_output("192.168.1.10", "show version").await?;
/// println!("{}", capture);
/// # Ok(())
/// # }
/// ```
pub struct ScraperBuilder {
    port: u16,
    username: Option<String>,
    password: Option<SecretString>,
    platform: PlatformDefinition,
    timeout: Duration,
    strip_ansi: bool,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
}

impl Default for ScraperBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScraperBuilder {
    /// Create a new builder targeting Cisco IPS sensors.
    pub fn new() -> Self {
        Self {
            port: 22,
            username: None,
            password: None,
            platform: vendors::cisco_ips::platform(),
            timeout: Duration::from_secs(30),
            strip_ansi: false,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the login password.
    pub fn password(mut self, password: impl Into<SecretString>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Use a custom platform definition.
    pub fn platform(mut self, platform: PlatformDefinition) -> Self {
        self.platform = platform;
        self
    }

    /// Set the connection timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the wait after the inventory command.
    pub fn command_delay(mut self, delay: Duration) -> Self {
        self.platform.command_delay = delay;
        self
    }

    /// Override the wait after the paging command.
    pub fn paging_delay(mut self, delay: Duration) -> Self {
        self.platform.paging_delay = delay;
        self
    }

    /// Override the per-read byte budget.
    pub fn read_budget(mut self, budget: usize) -> Self {
        self.platform.read_budget = budget;
        self
    }

    /// Strip ANSI escape codes from captured output.
    pub fn strip_ansi(mut self, strip: bool) -> Self {
        self.strip_ansi = strip;
        self
    }

    /// Set the host key verification mode.
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Use a specific known_hosts file.
    pub fn known_hosts(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Build the scraper.
    ///
    /// No connection is made here; each fetch opens its own session.
    pub fn build(self) -> Result<SshScraper> {
        let username = self.username.ok_or_else(|| UsageError::InvalidConfig {
            message: "Username is required".to_string(),
        })?;

        let password = self.password.ok_or_else(|| UsageError::InvalidConfig {
            message: "Password is required".to_string(),
        })?;

        if self.platform.read_budget == 0 {
            return Err(UsageError::InvalidConfig {
                message: "Read budget must be at least one byte".to_string(),
            }
            .into());
        }

        Ok(SshScraper {
            username,
            password,
            port: self.port,
            timeout: self.timeout,
            platform: self.platform,
            strip_ansi: self.strip_ansi,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        })
    }
}
