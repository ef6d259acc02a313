//! Render progress display.
//!
//! ffmpeg's progress lines are turned into an indicatif bar while a clip is
//! rendering. When stderr is not a terminal the bar is hidden and progress is
//! only logged.

pub mod ffmpeg_handler;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const BAR_TEMPLATE: &str = "  {spinner:.green} Rendering [{bar:30.cyan/blue}] {msg}";

/// Creates a progress bar for a render of `duration_secs` seconds.
///
/// The bar length is in milliseconds of output video.
#[must_use]
pub fn render_progress_bar(duration_secs: f64) -> ProgressBar {
    let total_ms = (duration_secs.max(0.0) * 1000.0).round() as u64;
    let bar = ProgressBar::with_draw_target(Some(total_ms.max(1)), draw_target());
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    bar.set_style(style);
    bar
}

fn draw_target() -> ProgressDrawTarget {
    if console::user_attended_stderr() {
        ProgressDrawTarget::stderr()
    } else {
        ProgressDrawTarget::hidden()
    }
}
