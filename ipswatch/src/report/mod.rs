//! Report emitters.
//!
//! Every renderer walks the inventory the same way: devices sorted by
//! identifier, fields sorted by label.

mod email;
mod html;
mod text;

pub use email::{
    EmailConfig, NEW_BULLETIN_ALERT, SUBJECT, build_message, compose_body, send_report,
};
pub use html::render_html;
pub use text::render_text;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;

use crate::error::{ReportError, Result};
use crate::inventory::Inventory;

/// Render the inventory as pretty-printed JSON.
pub fn render_json(inventory: &Inventory) -> Result<String> {
    let mut json = serde_json::to_string_pretty(inventory).map_err(ReportError::Json)?;
    json.push('\n');
    Ok(json)
}

/// Create or truncate `path` and write `content` to it.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Copy the current `path` into `archive_dir` with a timestamp suffix.
///
/// Returns the archive file, or `None` when there was nothing to archive.
pub fn archive(path: &Path, archive_dir: &Path, now: DateTime<Local>) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    std::fs::create_dir_all(archive_dir).map_err(|source| ReportError::Io {
        path: archive_dir.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = archive_dir.join(format!("{}{}", file_name, now.format("-%Y%m%d-%H%M%S")));

    std::fs::copy(path, &target).map_err(|source| ReportError::Io {
        path: target.clone(),
        source,
    })?;
    debug!("archived {} to {}", path.display(), target.display());
    Ok(Some(target))
}
