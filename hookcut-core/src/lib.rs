//! Core library for batch-editing short vertical videos with ffmpeg.
//!
//! Each clip is trimmed, captioned with text taken from a Google Sheet by the
//! mood keyword in its filename, and written next to its siblings in the
//! output directory. The caption row is marked used in the sheet.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use hookcut_core::{CoreConfig, process_videos};
//! use hookcut_core::external::{CrateFfprobeExecutor, SidecarSpawner};
//! use hookcut_core::sheets::GoogleSheetsClient;
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(
//!     PathBuf::from("input-videos"),
//!     PathBuf::from("output-videos"),
//!     PathBuf::from("assets"),
//! );
//! config.sheet_id = Some("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms".to_string());
//! config.validate().unwrap();
//!
//! let sheet = GoogleSheetsClient::connect(&config).unwrap();
//! let files = hookcut_core::find_processable_files(&config.input_dir).unwrap();
//!
//! let result = process_videos(
//!     &sheet,
//!     &SidecarSpawner,
//!     &CrateFfprobeExecutor::new(),
//!     &config,
//!     &files,
//! ).unwrap();
//! println!("{} succeeded, {} failed", result.succeeded.len(), result.failed.len());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod progress_reporting;
pub mod sheets;
pub mod temp_files;
pub mod utils;
pub mod video_type;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use processing::{BatchResult, RenderOutcome, RenderTier, process_videos};
pub use sheets::{SheetStatistics, SpreadsheetClient};
pub use utils::{format_duration, parse_ffmpeg_time};
pub use video_type::{VideoType, infer_video_type};
