//! Core video processing logic and orchestration.
//!
//! This module organizes the per-clip pipeline into submodules and exposes
//! the batch entry point.

/// Batch orchestration over all input clips
pub mod batch;

/// Caption selection from the sheet
pub mod captions;

/// Caption font resolution
pub mod fonts;

/// Caption word wrapping
pub mod layout;

/// Tiered ffmpeg rendering
pub mod render;

/// Trim planning
pub mod trim;

pub use batch::{BatchResult, process_single_video, process_videos};
pub use captions::{SelectedCaption, select_and_consume};
pub use fonts::{FontChoice, resolve_font};
pub use render::{RenderOutcome, RenderTier};
pub use trim::TrimPlan;
