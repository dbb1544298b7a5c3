//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ipswatch::HostKeyVerification;
use ipswatch::bulletin::DEFAULT_FEED_URL;

/// Collect Cisco IPS inventory over SSH and report it with the latest bulletin
#[derive(Parser)]
#[command(name = "ipswatch")]
#[command(author, version, about = "CLI arguments for IPS Inventory")]
pub struct Cli {
    /// Device list, one sensor per line
    #[arg(short = 'l', long = "device_list", value_name = "PATH")]
    pub device_list: PathBuf,

    /// Target user
    #[arg(short, long, default_value = "admin")]
    pub username: String,

    /// Target password
    #[arg(short, long, env = "IPSWATCH_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Email from / email to
    #[arg(short, long, num_args = 2, value_names = ["EMAILFROM", "EMAILTO"])]
    pub email: Option<Vec<String>>,

    /// SMTP relay
    #[arg(short = 's', long = "smtp_server", value_name = "HOST")]
    pub smtp_server: String,

    /// SMTP relay port
    #[arg(long, default_value_t = 25)]
    pub smtp_port: u16,

    /// SSH port on the sensors
    #[arg(long, default_value_t = 22)]
    pub port: u16,

    /// SSH connect timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    pub timeout: u64,

    /// Seconds to wait for `show version` output
    #[arg(long, default_value_t = 2, value_name = "SECS")]
    pub command_delay: u64,

    /// Seconds to wait after disabling paging
    #[arg(long, default_value_t = 1, value_name = "SECS")]
    pub paging_delay: u64,

    /// Maximum bytes kept per command
    #[arg(long, default_value_t = 10_000, value_name = "BYTES")]
    pub read_budget: usize,

    /// Strip ANSI escape sequences from device output
    #[arg(long)]
    pub strip_ansi: bool,

    /// Host key checking mode
    #[arg(long, value_enum, default_value = "disabled")]
    pub host_key_checking: HostKeyChecking,

    /// known_hosts file (default: ~/.ssh/known_hosts)
    #[arg(long, value_name = "PATH")]
    pub known_hosts: Option<PathBuf>,

    /// Bulletin feed URL
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Last-seen bulletin cache (default: ~/IPS_INVENTORY/rss_old.txt)
    #[arg(long, value_name = "PATH")]
    pub rss_cache: Option<PathBuf>,

    /// Write the text report to this file
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the HTML report to this file, archiving the previous one
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Archive directory for HTML reports (default: ~/IPS_INVENTORY/archive)
    #[arg(long, value_name = "DIR")]
    pub archive_dir: Option<PathBuf>,

    /// Write the inventory as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Print the text report to stdout
    #[arg(long)]
    pub stdout: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// `--host-key-checking` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HostKeyChecking {
    /// Accept any key
    Disabled,
    /// Learn unknown keys, reject changed ones
    AcceptNew,
    /// Only accept keys already in known_hosts
    Strict,
}

impl From<HostKeyChecking> for HostKeyVerification {
    fn from(mode: HostKeyChecking) -> Self {
        match mode {
            HostKeyChecking::Disabled => HostKeyVerification::Disabled,
            HostKeyChecking::AcceptNew => HostKeyVerification::AcceptNew,
            HostKeyChecking::Strict => HostKeyVerification::Strict,
        }
    }
}

impl Cli {
    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
