//! Utility functions for log formatting and file system checks.

use crate::error::{Error, Result};
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or before `max`
/// bytes, with the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the directory that will hold `path` exists and is writable.
///
/// Creates the directory if needed, then creates and removes a scratch file
/// next to the target. Run before any network work so a bad output path
/// fails fast.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_parent(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    let persist = |source| Error::Persist {
        path: dir.display().to_string(),
        source,
    };

    fs::create_dir_all(&dir).await.map_err(persist)?;
    let scratch = dir.join("..__write_check__");
    stdfs::File::create(&scratch).map_err(persist)?;
    let _ = stdfs::remove_file(&scratch);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}
