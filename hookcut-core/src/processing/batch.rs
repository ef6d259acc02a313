//! Batch driver.
//!
//! Runs every input clip through type inference, caption selection, probing,
//! trim planning and rendering. A clip that fails at any stage is recorded
//! and the batch moves on to the next one.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, FfprobeExecutor, probe_duration};
use crate::processing::captions::select_and_consume;
use crate::processing::fonts::resolve_font;
use crate::processing::layout::wrap;
use crate::processing::render::{RenderOutcome, RenderRequest, output_path_for, render_with_fallback};
use crate::processing::trim::plan;
use crate::sheets::SpreadsheetClient;
use crate::temp_files::temp_base_dir;
use crate::video_type::{VideoType, infer_video_type_from_path};

use std::path::{Path, PathBuf};

/// Per-file results of a batch, by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

impl BatchResult {
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// True when at least one clip was rendered.
    #[must_use]
    pub fn any_succeeded(&self) -> bool {
        !self.succeeded.is_empty()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Processes `files` in the given order.
///
/// Only configuration problems and an unusable output directory abort the
/// batch; everything else fails the single clip it concerns.
pub fn process_videos<C, S, P>(
    sheet: &C,
    spawner: &S,
    ffprobe: &P,
    config: &CoreConfig,
    files: &[PathBuf],
) -> CoreResult<BatchResult>
where
    C: SpreadsheetClient + ?Sized,
    S: FfmpegSpawner,
    P: FfprobeExecutor + ?Sized,
{
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir)?;

    let mut result = BatchResult::default();
    let total = files.len();

    for (index, input_path) in files.iter().enumerate() {
        let filename = file_name_of(input_path);
        log::info!("Progress: {}/{}", index + 1, total);
        log::info!("Processing: {filename}");

        match process_single_video(sheet, spawner, ffprobe, config, input_path) {
            Ok(outcome) => {
                log::info!(
                    "Successfully processed: {filename} ({})",
                    outcome.tier
                );
                result.succeeded.push(filename);
            }
            Err(err) => {
                log::error!("Failed to process {filename}: {err}");
                result.failed.push(filename);
            }
        }
    }

    log::info!(
        "Batch finished: {} succeeded, {} failed",
        result.succeeded.len(),
        result.failed.len()
    );
    Ok(result)
}

/// Runs the whole pipeline for one clip.
pub fn process_single_video<C, S, P>(
    sheet: &C,
    spawner: &S,
    ffprobe: &P,
    config: &CoreConfig,
    input_path: &Path,
) -> CoreResult<RenderOutcome>
where
    C: SpreadsheetClient + ?Sized,
    S: FfmpegSpawner,
    P: FfprobeExecutor + ?Sized,
{
    let filename = file_name_of(input_path);
    let video_type = infer_video_type_from_path(input_path).ok_or_else(|| {
        log::error!(
            "Filename should contain one of: {}",
            VideoType::vocabulary()
        );
        CoreError::UnknownVideoType(filename.clone())
    })?;
    log::info!("Detected type: {video_type}");

    let caption = select_and_consume(sheet, video_type)?
        .ok_or_else(|| CoreError::NoCaptionAvailable(video_type.keyword().to_string()))?;
    if caption.text.trim().is_empty() {
        // The row is consumed either way; an empty caption cannot be rendered.
        return Err(CoreError::NoCaptionAvailable(video_type.keyword().to_string()));
    }

    let original = probe_duration(ffprobe, input_path);
    let trim = plan(original, config.start_trim, config.end_trim);
    log::info!("Original duration: {:.1}s", trim.original);
    log::info!(
        "Trimming: -{}s (start) and -{}s (end)",
        trim.start_trim,
        trim.end_trim
    );
    log::info!("Final duration: {:.1}s", trim.final_duration);

    let wrapped = wrap(&caption.text, config.chars_per_line);
    log::info!("Overlay text preview:");
    for line in wrapped.lines() {
        log::info!("    {line}");
    }

    let font = resolve_font(&config.font_path);
    log::debug!("Using {}", font.describe());

    let output_path = output_path_for(input_path, &config.output_dir)?;
    let temp_dir = temp_base_dir(config);
    let request = RenderRequest {
        input_path,
        output_path: &output_path,
        start_trim: trim.start_trim,
        final_duration: trim.final_duration,
        caption: &wrapped,
        font: &font,
        font_size: config.font_size,
        temp_dir: &temp_dir,
    };

    render_with_fallback(spawner, &request)
}
