//! Caption font resolution.
//!
//! The bundled font is preferred. Without it a common system font is used,
//! and when none is installed drawtext falls back to ffmpeg's built-in font.

use std::path::{Path, PathBuf};

#[cfg(target_os = "macos")]
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Avenir.ttc",
    "/Library/Fonts/Arial.ttf",
];

#[cfg(target_os = "windows")]
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "C:/Windows/Fonts/arial.ttf",
    "C:/Windows/Fonts/Arial.ttf",
    "C:/Windows/Fonts/calibri.ttf",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/ubuntu/Ubuntu-R.ttf",
];

/// Where the caption font comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontChoice {
    /// The configured font file exists.
    Bundled(PathBuf),
    /// A platform font was found.
    System(PathBuf),
    /// No font file; drawtext uses its default.
    BuiltIn,
}

impl FontChoice {
    /// Font file to pass as `fontfile`, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            FontChoice::Bundled(path) | FontChoice::System(path) => Some(path),
            FontChoice::BuiltIn => None,
        }
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            FontChoice::Bundled(path) => format!("custom font {}", display_name(path)),
            FontChoice::System(path) => format!("system font {}", display_name(path)),
            FontChoice::BuiltIn => "FFmpeg default font".to_string(),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// First installed platform font, if any.
#[must_use]
pub fn find_system_font() -> Option<PathBuf> {
    first_existing(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from))
}

/// Resolves the font for a full-tier render.
#[must_use]
pub fn resolve_font(preferred: &Path) -> FontChoice {
    if preferred.is_file() {
        return FontChoice::Bundled(preferred.to_path_buf());
    }
    match find_system_font() {
        Some(path) => FontChoice::System(path),
        None => FontChoice::BuiltIn,
    }
}

fn first_existing<I: IntoIterator<Item = PathBuf>>(candidates: I) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}
