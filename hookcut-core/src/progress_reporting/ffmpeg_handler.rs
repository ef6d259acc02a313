//! `FFmpeg` event handler
//!
//! Consumes the event stream of one render: progress events advance the
//! progress bar, log and error lines are forwarded to the `log` facade and
//! collected so a failed render can report what ffmpeg said.

use crate::error::CoreResult;
use crate::utils::{format_seconds, parse_ffmpeg_time};
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel as FfmpegLogLevel};
use indicatif::ProgressBar;

/// Handler for `FFmpeg` events of a single render.
pub struct FfmpegProgressHandler {
    duration: f64,
    bar: Option<ProgressBar>,
    stderr_buffer: String,
    last_time: Option<String>,
}

impl FfmpegProgressHandler {
    /// Creates a handler for a render producing `duration` seconds of video.
    #[must_use]
    pub fn new(duration: f64, bar: Option<ProgressBar>) -> Self {
        Self {
            duration,
            bar,
            stderr_buffer: String::new(),
            last_time: None,
        }
    }

    /// Handles an `FFmpeg` event
    pub fn handle_event(&mut self, event: FfmpegEvent) -> CoreResult<()> {
        match event {
            FfmpegEvent::Progress(progress) => self.handle_progress(&progress),
            FfmpegEvent::Log(level, message) => self.handle_log(&level, &message),
            FfmpegEvent::Error(error) => self.handle_error(&error),
            _ => {}
        }
        Ok(())
    }

    /// Gets the accumulated stderr buffer
    #[must_use]
    pub fn stderr_buffer(&self) -> &str {
        &self.stderr_buffer
    }

    /// Last `time=` value reported by ffmpeg.
    #[must_use]
    pub fn last_time(&self) -> Option<&str> {
        self.last_time.as_deref()
    }

    /// Removes the progress bar from the terminal.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    fn handle_progress(&mut self, progress: &FfmpegProgress) {
        let current_secs = parse_ffmpeg_time(&progress.time).unwrap_or(0.0);
        if let Some(bar) = &self.bar {
            bar.set_position((current_secs * 1000.0).round() as u64);
            bar.set_message(format!(
                "{} / {}",
                format_seconds(current_secs),
                format_seconds(self.duration)
            ));
        }
        log::trace!(target: "hookcut::progress", "Processing: {}", progress.time);
        self.last_time = Some(progress.time.clone());
    }

    fn handle_log(&mut self, level: &FfmpegLogLevel, message: &str) {
        let log_level = map_ffmpeg_log_level(level);
        if log_level <= log::Level::Warn {
            self.stderr_buffer.push_str(message);
            self.stderr_buffer.push('\n');
        }
        log::log!(target: "ffmpeg_log", log_level, "{message}");
    }

    fn handle_error(&mut self, error: &str) {
        log::debug!("ffmpeg stderr error: {error}");
        self.stderr_buffer.push_str(error);
        self.stderr_buffer.push('\n');
    }
}

/// Maps `FFmpeg` log level to Rust log level. Informational output is demoted to debug.
fn map_ffmpeg_log_level(level: &FfmpegLogLevel) -> log::Level {
    match level {
        FfmpegLogLevel::Fatal | FfmpegLogLevel::Error => log::Level::Error,
        FfmpegLogLevel::Warning => log::Level::Warn,
        FfmpegLogLevel::Info => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress_at(time: &str) -> FfmpegEvent {
        FfmpegEvent::Progress(FfmpegProgress {
            frame: 120,
            fps: 30.0,
            q: 23.0,
            size_kb: 512,
            time: time.to_string(),
            bitrate_kbps: 1200.0,
            speed: 2.0,
            raw_log_message: String::new(),
        })
    }

    #[test]
    fn progress_tracks_last_time() {
        let mut handler = FfmpegProgressHandler::new(9.25, None);
        handler.handle_event(progress_at("00:00:01.00")).unwrap();
        handler.handle_event(progress_at("00:00:04.50")).unwrap();
        assert_eq!(handler.last_time(), Some("00:00:04.50"));
        assert!(handler.stderr_buffer().is_empty());
    }

    #[test]
    fn errors_and_warnings_are_buffered() {
        let mut handler = FfmpegProgressHandler::new(5.0, None);
        handler
            .handle_event(FfmpegEvent::Error("Cannot find font".to_string()))
            .unwrap();
        handler
            .handle_event(FfmpegEvent::Log(
                FfmpegLogLevel::Info,
                "Stream mapping:".to_string(),
            ))
            .unwrap();
        handler
            .handle_event(FfmpegEvent::Log(
                FfmpegLogLevel::Error,
                "Error initializing filter 'drawtext'".to_string(),
            ))
            .unwrap();
        assert!(handler.stderr_buffer().contains("Cannot find font"));
        assert!(handler.stderr_buffer().contains("drawtext"));
        assert!(!handler.stderr_buffer().contains("Stream mapping"));
    }
}
