//! Error types for ipswatch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for ipswatch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Bulletin feed and cache errors
    #[error("Bulletin error: {0}")]
    Bulletin(#[from] BulletinError),

    /// Report rendering and delivery errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Bad invocation or input files
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}' on {host}")]
    AuthenticationFailed { user: String, host: String },

    /// Host is not in known_hosts and strict checking is on
    #[error("Host key for {host}:{port} is not known")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key differs from the known_hosts entry
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Operation timed out
    #[error("Connection to {host} timed out after {timeout:?}")]
    Timeout {
        host: String,
        timeout: std::time::Duration,
    },
}

/// Channel layer errors (PTY and shell operations).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Failed to open PTY channel
    #[error("Failed to open PTY channel")]
    PtyOpenFailed,

    /// Failed to request shell
    #[error("Failed to request shell")]
    ShellRequestFailed,

    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,

    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),
}

/// Bulletin feed errors.
#[derive(Error, Debug)]
pub enum BulletinError {
    /// HTTP request failed
    #[error("Failed to fetch feed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Feed server answered with a non-success status
    #[error("Feed returned HTTP {status}")]
    Status { status: u16 },

    /// Feed body is not well-formed XML
    #[error("Malformed feed: {0}")]
    Feed(#[from] quick_xml::Error),

    /// Feed parsed but carried no entries
    #[error("Feed has no entries")]
    EmptyFeed,

    /// Cache file could not be read or written
    #[error("Bulletin cache {path}: {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Report rendering and delivery errors.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Report file could not be written
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sender or recipient is not a valid mailbox
    #[error("Invalid email address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// Email message could not be assembled
    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP relay rejected or dropped the message
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Usage errors (bad arguments, missing input files).
#[derive(Error, Debug)]
pub enum UsageError {
    /// Device list could not be read
    #[error("Cannot read device list {path}: {source}")]
    DeviceList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias using ipswatch's Error.
pub type Result<T> = std::result::Result<T, Error>;
