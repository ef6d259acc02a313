//! Utility functions for formatting.
//!
//! Small helpers shared by the render pipeline and the CLI for turning
//! durations into display strings and parsing ffmpeg's time fields.

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats a short clip length with one decimal (e.g., 9.25 -> "9.2s").
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.1}s")
}

/// Formats a value for an ffmpeg argument without trailing zero noise
/// (0.5 -> "0.5", 9.25 -> "9.25", 2.0 -> "2").
#[must_use]
pub fn format_ffmpeg_seconds(seconds: f64) -> String {
    let formatted = format!("{seconds:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses FFmpeg time string (HH:MM:SS.MS) to seconds. Returns None if invalid.
#[must_use]
pub fn parse_ffmpeg_time(time: &str) -> Option<f64> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() == 3 {
        let hours = parts[0].parse::<f64>().ok()?;
        let minutes = parts[1].parse::<f64>().ok()?;
        let seconds = parts[2].parse::<f64>().ok()?;
        Some(hours * 3600.0 + minutes * 60.0 + seconds)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3725.0), "01:02:05");
        assert_eq!(format_duration(9.25), "00:00:09");
        assert_eq!(format_duration(-1.0), "??:??:??");
        assert_eq!(format_duration(f64::NAN), "??:??:??");
    }

    #[test]
    fn test_format_ffmpeg_seconds() {
        assert_eq!(format_ffmpeg_seconds(0.5), "0.5");
        assert_eq!(format_ffmpeg_seconds(9.25), "9.25");
        assert_eq!(format_ffmpeg_seconds(2.0), "2");
        assert_eq!(format_ffmpeg_seconds(0.0), "0");
        assert_eq!(format_ffmpeg_seconds(0.1), "0.1");
    }

    #[test]
    fn test_parse_ffmpeg_time() {
        assert_eq!(parse_ffmpeg_time("00:00:04.50"), Some(4.5));
        assert_eq!(parse_ffmpeg_time("01:02:03"), Some(3723.0));
        assert_eq!(parse_ffmpeg_time("bad"), None);
    }
}
