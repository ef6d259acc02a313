//! Video type vocabulary and filename inference.
//!
//! A video's type is never stored; it is read from its filename by looking
//! for one of a small set of mood keywords. The caption sheet uses the same
//! vocabulary in its `type` column.

use std::fmt;
use std::path::Path;

/// Mood keyword that ties a clip to its caption rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoType {
    Romantic,
    Crying,
    Confused,
    Surprised,
    Sad,
}

impl VideoType {
    /// Vocabulary in match order. When a filename contains several keywords
    /// the first entry of this list wins.
    pub const ALL: [VideoType; 5] = [
        VideoType::Romantic,
        VideoType::Crying,
        VideoType::Confused,
        VideoType::Surprised,
        VideoType::Sad,
    ];

    /// Lowercase keyword searched for in filenames.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            VideoType::Romantic => "romantic",
            VideoType::Crying => "crying",
            VideoType::Confused => "confused",
            VideoType::Surprised => "surprised",
            VideoType::Sad => "sad",
        }
    }

    /// Capitalized form, as written in the caption sheet.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VideoType::Romantic => "Romantic",
            VideoType::Crying => "Crying",
            VideoType::Confused => "Confused",
            VideoType::Surprised => "Surprised",
            VideoType::Sad => "Sad",
        }
    }

    /// Comma separated keyword list for user-facing hints.
    #[must_use]
    pub fn vocabulary() -> String {
        Self::ALL
            .iter()
            .map(|t| t.keyword())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Infers the video type from a filename by case-insensitive substring search.
#[must_use]
pub fn infer_video_type(filename: &str) -> Option<VideoType> {
    let lower = filename.to_lowercase();
    VideoType::ALL
        .into_iter()
        .find(|t| lower.contains(t.keyword()))
}

/// Infers the video type from the file stem of `path`.
#[must_use]
pub fn infer_video_type_from_path(path: &Path) -> Option<VideoType> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .and_then(|stem| infer_video_type(&stem))
}
