//! Configuration structures and constants for the hookcut-core library.
//!
//! This module provides the configuration consumed by the batch driver:
//! directory layout, the caption store location, trim offsets and overlay
//! styling.

mod builder;
pub mod sheet_id;

use crate::error::{CoreError, CoreResult};
use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

// Default constants

/// Seconds removed from the start of every clip.
pub const DEFAULT_START_TRIM: f64 = 0.5;

/// Seconds removed from the end of every clip.
pub const DEFAULT_END_TRIM: f64 = 0.25;

/// Characters per caption line. With a 30px font and 5% side margins on a
/// vertical frame roughly 22-24 characters fit, so 23 is used.
pub const DEFAULT_CHARS_PER_LINE: usize = 23;

/// drawtext font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 30;

/// Worksheet tried first when opening the spreadsheet.
pub const DEFAULT_WORKSHEET_NAME: &str = "Sheet1";

/// File name of the bundled caption font inside the assets directory.
pub const DEFAULT_FONT_FILE: &str = "TikTokDisplay-Medium.ttf";

/// File name of the service account key inside the assets directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";

/// File that remembers the last spreadsheet id entered by the user.
pub const SHEET_CONFIG_FILE: &str = "sheet_config.txt";

/// Extensions (lowercase, without dot) picked up from the input directory.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "flv", "wmv", "webm"];

/// Main configuration structure for the hookcut-core library.
///
/// Created by the consumer of the library (e.g. hookcut-cli) and passed to
/// [`crate::process_videos`]. The resolved spreadsheet id lives here rather
/// than in any global state.
///
/// # Examples
///
/// ```rust,no_run
/// use hookcut_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("input-videos"))
///     .output_dir(PathBuf::from("output-videos"))
///     .assets_dir(PathBuf::from("assets"))
///     .sheet_id("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory scanned (non-recursively) for input videos
    pub input_dir: PathBuf,

    /// Directory receiving `<stem>_edited.mp4` files
    pub output_dir: PathBuf,

    /// Service account key used to reach the caption spreadsheet
    pub credentials_path: PathBuf,

    /// Preferred caption font; system fonts are tried when it is missing
    pub font_path: PathBuf,

    /// Directory for transient caption files (defaults to the system temp dir)
    pub temp_dir: Option<PathBuf>,

    /// Spreadsheet id, resolved by the caller before connecting
    pub sheet_id: Option<String>,

    /// Worksheet tried first; the first worksheet is used when it is absent
    pub worksheet_name: String,

    /// Seconds cut from the start of each clip
    pub start_trim: f64,

    /// Seconds cut from the end of each clip
    pub end_trim: f64,

    /// Caption wrap width in characters
    pub chars_per_line: usize,

    /// drawtext font size
    pub font_size: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let assets_dir = PathBuf::from("assets");
        Self {
            input_dir: PathBuf::from("input-videos"),
            output_dir: PathBuf::from("output-videos"),
            credentials_path: assets_dir.join(DEFAULT_CREDENTIALS_FILE),
            font_path: assets_dir.join(DEFAULT_FONT_FILE),
            temp_dir: None,
            sheet_id: None,
            worksheet_name: DEFAULT_WORKSHEET_NAME.to_string(),
            start_trim: DEFAULT_START_TRIM,
            end_trim: DEFAULT_END_TRIM,
            chars_per_line: DEFAULT_CHARS_PER_LINE,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration for the given directories with every other
    /// field at its default. Credentials and font are looked up in `assets_dir`.
    #[must_use]
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, assets_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            credentials_path: assets_dir.join(DEFAULT_CREDENTIALS_FILE),
            font_path: assets_dir.join(DEFAULT_FONT_FILE),
            ..Default::default()
        }
    }

    /// Checks the numeric settings for values that would produce a broken render.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.start_trim.is_finite() || self.start_trim < 0.0 {
            return Err(CoreError::Config(format!(
                "start trim must be a non-negative number of seconds, got {}",
                self.start_trim
            )));
        }
        if !self.end_trim.is_finite() || self.end_trim < 0.0 {
            return Err(CoreError::Config(format!(
                "end trim must be a non-negative number of seconds, got {}",
                self.end_trim
            )));
        }
        if self.chars_per_line == 0 {
            return Err(CoreError::Config(
                "characters per line must be greater than zero".to_string(),
            ));
        }
        if self.font_size == 0 {
            return Err(CoreError::Config(
                "font size must be greater than zero".to_string(),
            ));
        }
        if self.worksheet_name.trim().is_empty() {
            return Err(CoreError::Config(
                "worksheet name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the spreadsheet id or a configuration error when none was resolved.
    pub fn require_sheet_id(&self) -> CoreResult<&str> {
        self.sheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::Config("no Google Sheets ID provided".to_string()))
    }

    /// Total seconds removed from each clip.
    #[must_use]
    pub fn total_trim(&self) -> f64 {
        self.start_trim + self.end_trim
    }
}
