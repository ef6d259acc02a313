//! Trim planning.
//!
//! Works out how much of a clip survives once the fixed head and tail are
//! cut. Very short clips are never planned down to nothing.

/// Shortest render length produced by the fallback.
pub const MIN_RENDER_SECONDS: f64 = 0.1;

/// Share of the original kept when the fixed trims would consume the whole clip.
pub const FALLBACK_KEEP_RATIO: f64 = 0.8;

/// Extra room a clip should have beyond the trims before a warning is logged.
const SHORT_CLIP_MARGIN: f64 = 0.5;

/// Result of planning a trim for one clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimPlan {
    pub original: f64,
    pub start_trim: f64,
    pub end_trim: f64,
    /// Length of the rendered output in seconds.
    pub final_duration: f64,
    /// True when the fixed trims did not fit and the fallback length was used.
    pub used_fallback: bool,
}

/// Plans the render length for a clip of `original` seconds.
///
/// `final = original - start_trim - end_trim`; when that is not positive the
/// render keeps `max(0.1, original * 0.8)` instead.
#[must_use]
pub fn plan(original: f64, start_trim: f64, end_trim: f64) -> TrimPlan {
    let original = if original.is_finite() { original.max(0.0) } else { 0.0 };

    if original < start_trim + end_trim + SHORT_CLIP_MARGIN {
        log::warn!(
            "Video is very short ({original:.2}s). Trimming {start_trim}s + {end_trim}s may leave little content"
        );
    }

    let trimmed = original - start_trim - end_trim;
    if trimmed > 0.0 {
        return TrimPlan {
            original,
            start_trim,
            end_trim,
            final_duration: trimmed,
            used_fallback: false,
        };
    }

    let fallback = (original * FALLBACK_KEEP_RATIO).max(MIN_RENDER_SECONDS);
    log::warn!(
        "Calculated duration is {trimmed:.2}s. Using {fallback:.2}s ({:.0}% of original) instead",
        FALLBACK_KEEP_RATIO * 100.0
    );
    TrimPlan {
        original,
        start_trim,
        end_trim,
        final_duration: fallback,
        used_fallback: true,
    }
}
