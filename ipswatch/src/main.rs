//! ipswatch command-line entry point.
//!
//! ```bash
//! ipswatch -l ~/IPS_INVENTORY/ips_device_list.txt -u admin -p secret \
//!     -e ips@example.com ops@example.com -s relay.example.com
//! ```

mod cli;
mod config;

use chrono::{DateTime, Local};
use clap::Parser;
use log::{debug, info};

use ipswatch::report::{archive, render_json, write_report};
use ipswatch::{
    BulletinWatcher, Inventory, Result, build_inventory, read_device_list, render_html,
    render_text, send_report,
};

use crate::cli::Cli;
use crate::config::RunConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let home = dirs::home_dir();
    let config = match RunConfig::resolve(cli, home.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tokio::select! {
        result = run(config) => {
            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("ERROR: Keyboard Interrupt");
        }
    }
}

async fn run(config: RunConfig) -> Result<()> {
    let hosts = read_device_list(&config.device_list)?;
    info!(
        "{} devices listed in {}",
        hosts.len(),
        config.device_list.display()
    );

    let mut scraper = config.scraper_builder().build()?;
    let inventory = build_inventory(&mut scraper, &hosts).await?;

    let bulletin = BulletinWatcher::new(&config.feed_url, &config.rss_cache)
        .check()
        .await?;

    if let Some(email) = &config.email {
        send_report(email, &inventory, &bulletin).await?;
    }

    if let Some(text) = write_outputs(&config, &inventory, Local::now())? {
        print!("{}", text);
    }

    Ok(())
}

/// Write the requested report files. Returns the text for stdout, if any.
fn write_outputs(
    config: &RunConfig,
    inventory: &Inventory,
    now: DateTime<Local>,
) -> Result<Option<String>> {
    let text = render_text(inventory);

    if let Some(path) = &config.output {
        write_report(path, &text)?;
    }

    if let Some(path) = &config.html {
        if let Some(previous) = archive(path, &config.archive_dir, now)? {
            debug!("previous report archived as {}", previous.display());
        }
        write_report(path, &render_html(inventory, now))?;
    }

    if let Some(path) = &config.json {
        write_report(path, &render_json(inventory)?)?;
    }

    Ok(config.print_stdout.then_some(text))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::TimeZone;
    use ipswatch::{DeviceRecord, Field};

    use super::*;

    fn inventory() -> Inventory {
        let mut record = DeviceRecord::new();
        record.set(Field::Platform, "ASA-SSM-20");
        let mut inventory = Inventory::new();
        inventory.insert("ips-1", record);
        inventory
    }

    fn config(dir: &Path, extra: &[&str]) -> RunConfig {
        let mut args = vec!["ipswatch", "-l", "devices.txt", "-p", "secret", "-s", "relay"];
        args.extend_from_slice(extra);
        RunConfig::resolve(Cli::try_parse_from(args).unwrap(), Some(dir)).unwrap()
    }

    #[test]
    fn test_stdout_is_inventory_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &["--stdout"]);

        let text = write_outputs(&config, &inventory(), Local::now())
            .unwrap()
            .unwrap();

        assert_eq!(text, "IPS-1\n -Platform: ASA-SSM-20\n");
    }

    #[test]
    fn test_no_stdout_when_emailing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &["-e", "ips@example.com", "ops@example.com"]);

        let text = write_outputs(&config, &inventory(), Local::now()).unwrap();
        assert!(text.is_none());
    }

    #[test]
    fn test_files_and_html_archive() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("ips_inventory.html");
        let output = dir.path().join("ips_inventory_output.txt");
        let json = dir.path().join("ips_inventory.json");
        let config = config(
            dir.path(),
            &[
                "-e",
                "ips@example.com",
                "ops@example.com",
                "--html",
                html.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
                "--json",
                json.to_str().unwrap(),
            ],
        );

        let first = Local.with_ymd_and_hms(2015, 5, 11, 8, 0, 0).unwrap();
        let second = Local.with_ymd_and_hms(2015, 5, 12, 8, 0, 0).unwrap();
        write_outputs(&config, &inventory(), first).unwrap();
        write_outputs(&config, &inventory(), second).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "IPS-1\n -Platform: ASA-SSM-20\n"
        );
        assert!(std::fs::read_to_string(&json).unwrap().contains("\"ips-1\""));
        // Only the second run had a previous page to archive
        let archived = dir
            .path()
            .join("IPS_INVENTORY")
            .join("archive")
            .join("ips_inventory.html-20150512-080000");
        assert!(std::fs::read_to_string(archived)
            .unwrap()
            .contains("Monday May 11, 2015"));
    }
}
