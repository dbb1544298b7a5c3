//! Bulletin watcher.
//!
//! Fetches the advisory feed, takes its newest entry and compares it with
//! the copy saved by the previous run. The cache is overwritten on every
//! check, so each new bulletin is reported exactly once.

mod feed;

pub use feed::parse_first_entry;

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{BulletinError, Result};

/// Cisco IPS active update bulletin feed.
pub const DEFAULT_FEED_URL: &str =
    "https://tools.cisco.com/security/center/activeUpdateBulletin_20.xml";

/// Latest security-advisory feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bulletin {
    pub title: String,
    pub link: String,
}

impl Bulletin {
    /// Canonical text form, as stored in the cache and mailed out.
    pub fn text(&self) -> String {
        format!("{}\n{}\n", self.title, self.link)
    }
}

impl fmt::Display for Bulletin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Outcome of a bulletin check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletinStatus {
    /// Canonical bulletin text (`"<title>\n<link>\n"`).
    pub text: String,

    /// Whether the text equals what the previous run saw.
    pub unchanged: bool,
}

impl BulletinStatus {
    /// Whether this bulletin has not been reported before.
    pub fn is_new(&self) -> bool {
        !self.unchanged
    }
}

/// Fetches the feed and tracks the last-seen bulletin in a cache file.
pub struct BulletinWatcher {
    feed_url: String,
    cache_path: PathBuf,
    client: reqwest::Client,
}

impl BulletinWatcher {
    /// Create a watcher for `feed_url` caching into `cache_path`.
    pub fn new(feed_url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            feed_url: feed_url.into(),
            cache_path: cache_path.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Download the feed and return its newest entry.
    pub async fn fetch_latest(&self) -> Result<Bulletin> {
        debug!("fetching bulletin feed {}", self.feed_url);

        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(BulletinError::Fetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BulletinError::Status {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(BulletinError::Fetch)?;
        Ok(parse_first_entry(&body)?)
    }

    /// Fetch the newest bulletin, compare it with the cache, then overwrite
    /// the cache.
    pub async fn check(&self) -> Result<BulletinStatus> {
        let bulletin = self.fetch_latest().await?;
        let status = record_bulletin(&self.cache_path, &bulletin)?;

        if status.is_new() {
            info!("new bulletin: {}", bulletin.title);
        } else {
            debug!("bulletin unchanged: {}", bulletin.title);
        }

        Ok(status)
    }
}

/// Check `feed_url` against the bulletin cached at `cache_path`.
pub async fn check_bulletin(
    cache_path: impl Into<PathBuf>,
    feed_url: impl Into<String>,
) -> Result<BulletinStatus> {
    BulletinWatcher::new(feed_url, cache_path).check().await
}

/// Compare `bulletin` with the cache file, then overwrite the cache.
///
/// A missing cache (first run) counts as changed. The cache is written
/// whatever the comparison says.
pub fn record_bulletin(cache_path: &Path, bulletin: &Bulletin) -> Result<BulletinStatus> {
    let text = bulletin.text();

    let unchanged = match std::fs::read(cache_path) {
        Ok(cached) => cached == text.as_bytes(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                "no bulletin cache at {}, treating bulletin as new",
                cache_path.display()
            );
            false
        }
        Err(source) => {
            return Err(BulletinError::Cache {
                path: cache_path.to_path_buf(),
                source,
            }
            .into());
        }
    };

    write_cache(cache_path, &text)?;

    Ok(BulletinStatus { text, unchanged })
}

fn write_cache(cache_path: &Path, text: &str) -> Result<()> {
    let cache_err = |source| BulletinError::Cache {
        path: cache_path.to_path_buf(),
        source,
    };

    if let Some(parent) = cache_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(cache_err)?;
    }
    std::fs::write(cache_path, text.as_bytes()).map_err(cache_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::Error;

    const FEED: &str = "<rss><channel><item>\
        <title>IPS Signature Update S868</title>\
        <link>https://tools.cisco.com/s868</link>\
        </item></channel></rss>";

    fn bulletin(title: &str) -> Bulletin {
        Bulletin {
            title: title.to_string(),
            link: format!("https://tools.cisco.com/{}", title),
        }
    }

    /// Serve `body` with `status` to `requests` consecutive connections.
    async fn serve(status: &'static str, body: &'static str, requests: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for _ in 0..requests {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = vec![0u8; 4096];
                let _ = socket.read(&mut request).await.unwrap();
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/rss+xml\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        format!("http://{}/activeUpdateBulletin_20.xml", addr)
    }

    #[test]
    fn test_bulletin_text() {
        let b = Bulletin {
            title: "S868".to_string(),
            link: "https://example.com".to_string(),
        };
        assert_eq!(b.text(), "S868\nhttps://example.com\n");
    }

    #[test]
    fn test_missing_cache_counts_as_new() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("IPS_INVENTORY").join("rss_old.txt");

        let status = record_bulletin(&cache, &bulletin("S868")).unwrap();

        assert!(status.is_new());
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), status.text);
    }

    #[test]
    fn test_same_bulletin_twice() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("rss_old.txt");

        let first = record_bulletin(&cache, &bulletin("S868")).unwrap();
        let second = record_bulletin(&cache, &bulletin("S868")).unwrap();

        assert!(!first.unchanged);
        assert!(second.unchanged);
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), second.text);
    }

    #[test]
    fn test_cache_always_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("rss_old.txt");
        std::fs::write(&cache, "old title\nold link\n").unwrap();

        let status = record_bulletin(&cache, &bulletin("S869")).unwrap();

        assert!(status.is_new());
        assert_eq!(
            std::fs::read_to_string(&cache).unwrap(),
            "S869\nhttps://tools.cisco.com/S869\n"
        );
    }

    #[test]
    fn test_unreadable_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be
        let result = record_bulletin(dir.path(), &bulletin("S868"));
        assert!(matches!(
            result,
            Err(Error::Bulletin(BulletinError::Cache { .. }))
        ));
    }

    #[tokio::test]
    async fn test_check_bulletin_twice_unchanged_feed() {
        let url = serve("200 OK", FEED, 2).await;
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("rss_old.txt");

        let first = check_bulletin(&cache, url.clone()).await.unwrap();
        let second = check_bulletin(&cache, url).await.unwrap();

        assert_eq!(
            first.text,
            "IPS Signature Update S868\nhttps://tools.cisco.com/s868\n"
        );
        assert!(!first.unchanged);
        assert!(second.unchanged);
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), second.text);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let url = serve("503 Service Unavailable", "", 1).await;
        let dir = tempfile::tempdir().unwrap();

        let result = check_bulletin(dir.path().join("rss_old.txt"), url).await;

        assert!(matches!(
            result,
            Err(Error::Bulletin(BulletinError::Status { status: 503 }))
        ));
        assert!(!dir.path().join("rss_old.txt").exists());
    }
}
