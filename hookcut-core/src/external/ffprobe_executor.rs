//! FFprobe integration for duration probing.
//!
//! The pipeline only needs a clip's container duration. A failed probe is not
//! an error for the caller: [`probe_duration`] reports it as `0.0`, and the
//! trim planner's fallback turns that into a usable render length.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Trait for the ffprobe queries the pipeline makes.
pub trait FfprobeExecutor {
    /// Returns the container duration in seconds.
    fn get_duration(&self, input_path: &Path) -> CoreResult<f64>;
}

/// Production executor using the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn get_duration(&self, input_path: &Path) -> CoreResult<f64> {
        log::debug!(
            "Running ffprobe (via crate) for duration on: {}",
            input_path.display()
        );
        let metadata = ffprobe(input_path).map_err(|err| map_ffprobe_error(err, "duration"))?;

        let raw = metadata.format.duration.ok_or_else(|| {
            CoreError::FfprobeParse(format!(
                "no format duration reported for {}",
                input_path.display()
            ))
        })?;
        parse_duration(&raw).ok_or_else(|| {
            CoreError::FfprobeParse(format!(
                "non-numeric duration '{raw}' for {}",
                input_path.display()
            ))
        })
    }
}

/// Parses ffprobe's plain-text duration. Negative and non-finite values are rejected.
#[must_use]
pub fn parse_duration(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}

/// Probes the duration, downgrading every failure to `0.0`.
pub fn probe_duration<P: FfprobeExecutor + ?Sized>(executor: &P, input_path: &Path) -> f64 {
    match executor.get_duration(input_path) {
        Ok(duration) => duration,
        Err(err) => {
            log::warn!(
                "Could not probe duration of {}: {}. Treating it as 0s",
                input_path.display(),
                err
            );
            0.0
        }
    }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("ffprobe {context} output deserialization: {err}"))
        }
        #[allow(unreachable_patterns)]
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProbe;

    impl FfprobeExecutor for FailingProbe {
        fn get_duration(&self, _input_path: &Path) -> CoreResult<f64> {
            Err(CoreError::FfprobeParse("boom".to_string()))
        }
    }

    struct FixedProbe(f64);

    impl FfprobeExecutor for FixedProbe {
        fn get_duration(&self, _input_path: &Path) -> CoreResult<f64> {
            Ok(self.0)
        }
    }

    #[test]
    fn parse_duration_accepts_plain_seconds() {
        assert_eq!(parse_duration("10.000000\n"), Some(10.0));
        assert_eq!(parse_duration(" 3.5 "), Some(3.5));
        assert_eq!(parse_duration("N/A"), None);
        assert_eq!(parse_duration("-1"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn probe_failures_become_zero() {
        assert_eq!(probe_duration(&FailingProbe, Path::new("x.mp4")), 0.0);
        assert_eq!(probe_duration(&FixedProbe(12.5), Path::new("x.mp4")), 12.5);
    }

    #[test]
    fn missing_file_probe_is_zero() {
        let executor = CrateFfprobeExecutor::new();
        let duration = probe_duration(&executor, Path::new("/nonexistent/hookcut/clip.mp4"));
        assert_eq!(duration, 0.0);
    }
}
