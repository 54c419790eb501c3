//! Utility functions for string truncation and file system checks.

use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

use crate::error::DigestError;

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes with an ellipsis and byte count
/// appended. Only used for log output, so the cut does not need to land
/// on a char boundary-aware limit beyond what `truncate_to_bytes` gives.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let cut = truncate_to_bytes(s, max);
        format!("{}…(+{} bytes)", cut, s.len() - cut.len())
    }
}

/// Truncate a string to at most `max` bytes without splitting a UTF-8
/// character.
///
/// Used to cap extracted article text before summarization and the
/// outgoing digest message.
pub fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if missing, then probes it with a throwaway
/// file. Run before any network call so a bad output path fails the run
/// without spending API budget.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), DigestError> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
