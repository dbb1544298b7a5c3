//! # ipswatch
//!
//! SSH inventory scraper and bulletin watcher for Cisco IPS appliances.
//!
//! ipswatch logs into each sensor over SSH, disables paging, runs
//! `show version` and screen-scrapes the banner into a small set of
//! inventory fields. It then checks the Cisco IPS update bulletin feed
//! for a release it has not reported before, and emits the result as
//! text, HTML, JSON or an email status report.
//!
//! ## Features
//!
//! - Async SSH sessions via russh, one device at a time
//! - Fixed-delay PTY reads with a per-command byte budget
//! - Line-oriented parser for the `show version` banner
//! - RSS/Atom bulletin feed with a last-seen cache
//! - Text, HTML, JSON and SMTP report emitters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ipswatch::{ScraperBuilder, build_inventory, render_text};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ipswatch::Error> {
//!     let mut scraper = ScraperBuilder::new()
//!         .username("admin")
//!         .password("secret")
//!         .build()?;
//!
//!     let hosts = vec!["ips-1.example.com".to_string()];
//!     let inventory = build_inventory(&mut scraper, &hosts).await?;
//!
//!     print!("{}", render_text(&inventory));
//!     Ok(())
//! }
//! ```

pub mod bulletin;
pub mod channel;
pub mod driver;
pub mod error;
pub mod inventory;
pub mod platform;
pub mod report;
pub mod transport;

// Re-export main types for convenience
pub use bulletin::{BulletinStatus, BulletinWatcher, check_bulletin};
pub use driver::{Capture, Scraper, ScraperBuilder, SshScraper};
pub use error::{Error, Result};
pub use inventory::{DeviceRecord, Field, Inventory, build_inventory, read_device_list};
pub use platform::PlatformDefinition;
pub use report::{EmailConfig, render_html, render_text, send_report};
pub use transport::{HostKeyVerification, SshConfig};
