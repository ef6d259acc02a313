//! Temporary file management utilities.
//!
//! Caption text is handed to ffmpeg through a file instead of the filter
//! string, which avoids escaping quotes and colons. Each render gets its own
//! uniquely named file that is deleted when the handle is dropped, on success
//! and failure alike.

use crate::config::CoreConfig;
use crate::error::CoreResult;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, NamedTempFile};

/// Directory used for transient files: the configured temp dir or the system default.
#[must_use]
pub fn temp_base_dir(config: &CoreConfig) -> PathBuf {
    config
        .temp_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir)
}

/// Creates a temporary file with prefix and extension. Auto-deleted when dropped.
pub fn create_temp_file(dir: &Path, prefix: &str, extension: &str) -> CoreResult<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    let temp_file = TempFileBuilder::new()
        .prefix(&format!("{prefix}_"))
        .suffix(&format!(".{extension}"))
        .tempfile_in(dir)?;

    Ok(temp_file)
}

/// Writes `text` (UTF-8) into a fresh caption file under `dir`.
pub fn write_caption_file(dir: &Path, text: &str) -> CoreResult<NamedTempFile> {
    let mut file = create_temp_file(dir, "overlay_text", "txt")?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    log::debug!("Wrote caption file {}", file.path().display());
    Ok(file)
}
