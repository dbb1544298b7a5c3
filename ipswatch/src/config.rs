//! Run configuration resolved from the command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ipswatch::error::UsageError;
use ipswatch::{EmailConfig, HostKeyVerification, Result, ScraperBuilder};
use secrecy::SecretString;

use crate::cli::Cli;

/// Working directory for the cache and archive under the user's home.
const DATA_DIR: &str = "IPS_INVENTORY";

/// Everything one run needs, with defaults filled in.
#[derive(Debug)]
pub struct RunConfig {
    pub device_list: PathBuf,
    pub username: String,
    pub password: SecretString,
    pub port: u16,
    pub timeout: Duration,
    pub command_delay: Duration,
    pub paging_delay: Duration,
    pub read_budget: usize,
    pub strip_ansi: bool,
    pub host_key_verification: HostKeyVerification,
    pub known_hosts: Option<PathBuf>,
    pub feed_url: String,
    pub rss_cache: PathBuf,
    pub email: Option<EmailConfig>,
    pub output: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub archive_dir: PathBuf,
    pub json: Option<PathBuf>,
    pub print_stdout: bool,
}

impl RunConfig {
    /// Resolve `cli` against `home`, the default location for the cache
    /// and archive directory.
    pub fn resolve(cli: Cli, home: Option<&Path>) -> Result<Self> {
        let data_dir = || -> Result<PathBuf> {
            home.map(|h| h.join(DATA_DIR)).ok_or_else(|| {
                UsageError::InvalidConfig {
                    message: "cannot determine home directory; pass --rss-cache and --archive-dir"
                        .to_string(),
                }
                .into()
            })
        };

        let rss_cache = match cli.rss_cache {
            Some(path) => path,
            None => data_dir()?.join("rss_old.txt"),
        };

        let archive_dir = match cli.archive_dir {
            Some(dir) => dir,
            None if cli.html.is_some() => data_dir()?.join("archive"),
            // Unused without --html
            None => PathBuf::new(),
        };

        let email = match cli.email.as_deref() {
            Some([from, to]) => {
                Some(EmailConfig::new(from, to, &cli.smtp_server).with_port(cli.smtp_port))
            }
            Some(other) => {
                return Err(UsageError::InvalidConfig {
                    message: format!("--email takes 2 addresses, got {}", other.len()),
                }
                .into());
            }
            None => None,
        };

        let print_stdout = cli.stdout || email.is_none();

        Ok(Self {
            device_list: cli.device_list,
            username: cli.username,
            password: SecretString::from(cli.password),
            port: cli.port,
            timeout: Duration::from_secs(cli.timeout),
            command_delay: Duration::from_secs(cli.command_delay),
            paging_delay: Duration::from_secs(cli.paging_delay),
            read_budget: cli.read_budget,
            strip_ansi: cli.strip_ansi,
            host_key_verification: cli.host_key_checking.into(),
            known_hosts: cli.known_hosts,
            feed_url: cli.feed_url,
            rss_cache,
            email,
            output: cli.output,
            html: cli.html,
            archive_dir,
            json: cli.json,
            print_stdout,
        })
    }

    /// Scraper builder carrying the SSH settings of this run.
    pub fn scraper_builder(&self) -> ScraperBuilder {
        let mut builder = ScraperBuilder::new()
            .port(self.port)
            .username(&self.username)
            .password(self.password.clone())
            .timeout(self.timeout)
            .command_delay(self.command_delay)
            .paging_delay(self.paging_delay)
            .read_budget(self.read_budget)
            .strip_ansi(self.strip_ansi)
            .host_key_verification(self.host_key_verification);

        if let Some(path) = &self.known_hosts {
            builder = builder.known_hosts(path);
        }
        builder
    }
}
