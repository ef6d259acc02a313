// ============================================================================
// hookcut-core/src/processing/render.rs
// ============================================================================
//
// RENDER: Trim and caption overlay through ffmpeg
//
// A clip is rendered by at most three ffmpeg invocations, tried in order
// until one succeeds:
//
//   1. Full      - trim + drawtext with the resolved caption font
//   2. Fallback  - trim + drawtext with ffmpeg's built-in font
//   3. NoText    - trim only
//
// A lower tier is entered only after the tier above it failed (spawn error,
// event stream error or non-zero exit). The caption text travels through a
// temporary file that lives exactly as long as one invocation.

use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::FfmpegSpawner;
use crate::external::ffmpeg_executor::{FfmpegProcess, format_command_args};
use crate::processing::fonts::FontChoice;
use crate::progress_reporting::ffmpeg_handler::FfmpegProgressHandler;
use crate::progress_reporting::render_progress_bar;
use crate::temp_files::write_caption_file;
use crate::utils::format_ffmpeg_seconds;

use ffmpeg_sidecar::command::FfmpegCommand;
use rand::Rng;
use std::fmt;
use std::path::{Path, PathBuf};

/// Lowest vertical position of the caption, as a fraction of the free height.
pub const MIN_VERTICAL_FRACTION: f64 = 0.30;

/// Highest vertical position of the caption, as a fraction of the free height.
pub const MAX_VERTICAL_FRACTION: f64 = 0.70;

/// Render attempt level, from richest to plainest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTier {
    Full,
    Fallback,
    NoText,
}

impl RenderTier {
    /// Tiers in the order they are attempted.
    pub const ORDER: [RenderTier; 3] = [RenderTier::Full, RenderTier::Fallback, RenderTier::NoText];

    #[must_use]
    pub fn has_text(self) -> bool {
        !matches!(self, RenderTier::NoText)
    }
}

impl fmt::Display for RenderTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderTier::Full => "text overlay",
            RenderTier::Fallback => "simplified text overlay",
            RenderTier::NoText => "trim only",
        };
        f.write_str(name)
    }
}

/// Everything needed to render one clip.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub input_path: &'a Path,
    pub output_path: &'a Path,
    pub start_trim: f64,
    pub final_duration: f64,
    /// Caption text, already wrapped.
    pub caption: &'a str,
    /// Font for the full tier.
    pub font: &'a FontChoice,
    pub font_size: u32,
    /// Directory for the caption file.
    pub temp_dir: &'a Path,
}

/// Successful render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub tier: RenderTier,
    pub output_path: PathBuf,
}

/// Output path for an input clip: `<output_dir>/<stem>_edited.mp4`.
pub fn output_path_for(input_path: &Path, output_dir: &Path) -> CoreResult<PathBuf> {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            CoreError::PathError(format!(
                "cannot derive output name from {}",
                input_path.display()
            ))
        })?;
    Ok(output_dir.join(format!("{stem}_edited.mp4")))
}

/// Random vertical position fraction in `[0.30, 0.70]`.
#[must_use]
pub fn random_vertical_fraction() -> f64 {
    rand::thread_rng().gen_range(MIN_VERTICAL_FRACTION..=MAX_VERTICAL_FRACTION)
}

/// Quotes a value for a single-quoted filter option.
fn quote_filter_value(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Builds the drawtext filter for a caption file.
#[must_use]
pub fn build_drawtext_filter(
    caption_file: &Path,
    font_file: Option<&Path>,
    font_size: u32,
    vertical_fraction: f64,
    final_duration: f64,
) -> String {
    let mut filter = format!(
        "drawtext=textfile={}",
        quote_filter_value(&caption_file.to_string_lossy())
    );
    if let Some(font) = font_file {
        filter.push_str(&format!(
            ":fontfile={}",
            quote_filter_value(&font.to_string_lossy())
        ));
    }
    filter.push_str(&format!(
        ":fontsize={font_size}\
         :fontcolor=white\
         :borderw=2\
         :bordercolor=black\
         :x=(w-text_w)/2\
         :y=(h-text_h)*{vertical_fraction:.4}\
         :text_align=C\
         :enable='between(t,0,{})'",
        format_ffmpeg_seconds(final_duration)
    ));
    filter
}

/// Builds the ffmpeg command for one tier. `drawtext` is omitted for `NoText`.
#[must_use]
pub fn build_render_command(request: &RenderRequest<'_>, drawtext: Option<&str>) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.args(["-ss", &format_ffmpeg_seconds(request.start_trim)]);
    cmd.arg("-i").arg(request.input_path);
    if let Some(filter) = drawtext {
        cmd.args(["-vf", filter]);
    }
    cmd.args(["-t", &format_ffmpeg_seconds(request.final_duration)]);
    cmd.args(["-c:v", "libx264"]);
    cmd.args(["-preset", "fast"]);
    cmd.args(["-crf", "23"]);
    cmd.args(["-c:a", "aac"]);
    cmd.args(["-b:a", "192k"]);
    cmd.args(["-movflags", "+faststart"]);
    cmd.arg("-y");
    cmd.arg(request.output_path);
    cmd
}

/// Renders the clip, stepping down through the tiers until one succeeds.
///
/// Returns `RenderFailed` when every tier failed.
pub fn render_with_fallback<S: FfmpegSpawner>(
    spawner: &S,
    request: &RenderRequest<'_>,
) -> CoreResult<RenderOutcome> {
    for tier in RenderTier::ORDER {
        match tier {
            RenderTier::Full => log::info!("Processing video with text overlay and trimming..."),
            RenderTier::Fallback => log::warn!("Retrying with simplified text overlay..."),
            RenderTier::NoText => log::warn!("Creating video without text overlay..."),
        }

        match run_tier(spawner, request, tier) {
            Ok(()) => {
                log::info!(
                    "Video created successfully: {}",
                    request
                        .output_path
                        .file_name()
                        .map_or_else(|| request.output_path.to_string_lossy(), |n| n.to_string_lossy())
                );
                if tier == RenderTier::NoText {
                    log::warn!("Text overlay was omitted due to processing issues");
                }
                return Ok(RenderOutcome {
                    tier,
                    output_path: request.output_path.to_path_buf(),
                });
            }
            Err(err) => {
                log::error!("Render ({tier}) failed: {err}");
            }
        }
    }

    Err(CoreError::RenderFailed(
        request.input_path.display().to_string(),
    ))
}

fn run_tier<S: FfmpegSpawner>(
    spawner: &S,
    request: &RenderRequest<'_>,
    tier: RenderTier,
) -> CoreResult<()> {
    // Held until ffmpeg exits; dropping it deletes the file.
    let caption_file = if tier.has_text() {
        Some(write_caption_file(request.temp_dir, request.caption)?)
    } else {
        None
    };

    let drawtext = caption_file.as_ref().map(|file| {
        let font = match tier {
            RenderTier::Full => request.font.path(),
            _ => None,
        };
        build_drawtext_filter(
            file.path(),
            font,
            request.font_size,
            random_vertical_fraction(),
            request.final_duration,
        )
    });

    let cmd = build_render_command(request, drawtext.as_deref());
    log::debug!("FFmpeg command: {}", format_command_args(&cmd));

    let mut process = spawner.spawn(cmd)?;
    let mut handler =
        FfmpegProgressHandler::new(request.final_duration, Some(render_progress_bar(request.final_duration)));
    let events = process.handle_events(|event| handler.handle_event(event));
    handler.finish();
    let status = process.wait()?;
    events?;

    if status.success() {
        Ok(())
    } else {
        match handler.last_time() {
            Some(time) => log::warn!("ffmpeg ({tier}) stopped after {time} of output"),
            None => log::warn!("ffmpeg ({tier}) failed before reporting progress"),
        }
        Err(command_failed_error(
            format!("ffmpeg ({tier})"),
            status,
            handler.stderr_buffer().trim(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_stem() {
        let out = output_path_for(Path::new("/in/sad_01.mov"), Path::new("/out")).unwrap();
        assert_eq!(out, PathBuf::from("/out/sad_01_edited.mp4"));
        assert!(output_path_for(Path::new("/"), Path::new("/out")).is_err());
    }

    #[test]
    fn vertical_fraction_stays_in_range() {
        for _ in 0..500 {
            let f = random_vertical_fraction();
            assert!((MIN_VERTICAL_FRACTION..=MAX_VERTICAL_FRACTION).contains(&f));
        }
    }

    #[test]
    fn drawtext_with_font() {
        let filter = build_drawtext_filter(
            Path::new("/tmp/overlay_text_x.txt"),
            Some(Path::new("assets/TikTokDisplay-Medium.ttf")),
            30,
            0.5,
            9.25,
        );
        assert_eq!(
            filter,
            "drawtext=textfile='/tmp/overlay_text_x.txt':fontfile='assets/TikTokDisplay-Medium.ttf'\
             :fontsize=30:fontcolor=white:borderw=2:bordercolor=black:x=(w-text_w)/2\
             :y=(h-text_h)*0.5000:text_align=C:enable='between(t,0,9.25)'"
        );
    }

    #[test]
    fn drawtext_without_font_and_quoted_path() {
        let filter = build_drawtext_filter(Path::new("/tmp/it's.txt"), None, 30, 0.3, 2.0);
        assert!(filter.starts_with(r"drawtext=textfile='/tmp/it'\''s.txt':fontsize=30"));
        assert!(!filter.contains("fontfile"));
        assert!(filter.ends_with("enable='between(t,0,2)'"));
    }

    #[test]
    fn command_layout() {
        let font = FontChoice::BuiltIn;
        let request = RenderRequest {
            input_path: Path::new("/in/sad_01.mp4"),
            output_path: Path::new("/out/sad_01_edited.mp4"),
            start_trim: 0.5,
            final_duration: 9.25,
            caption: "Miss you",
            font: &font,
            font_size: 30,
            temp_dir: Path::new("/tmp"),
        };
        let cmd = build_render_command(&request, None);
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let tail: Vec<&str> = args.iter().map(String::as_str).skip_while(|a| *a != "-ss").collect();
        assert_eq!(
            tail,
            vec![
                "-ss", "0.5", "-i", "/in/sad_01.mp4", "-t", "9.25", "-c:v", "libx264", "-preset",
                "fast", "-crf", "23", "-c:a", "aac", "-b:a", "192k", "-movflags", "+faststart",
                "-y", "/out/sad_01_edited.mp4",
            ]
        );
    }

    #[test]
    fn tier_order_and_text() {
        assert_eq!(RenderTier::ORDER[0], RenderTier::Full);
        assert!(RenderTier::Fallback.has_text());
        assert!(!RenderTier::NoText.has_text());
    }
}
