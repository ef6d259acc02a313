// ============================================================================
// hookcut-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Unset directories fall back to the
// defaults of CoreConfig::default(); credentials and font paths follow the
// assets directory unless set explicitly.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::{CoreConfig, DEFAULT_CREDENTIALS_FILE, DEFAULT_FONT_FILE};

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use hookcut_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/input"))
///     .output_dir(PathBuf::from("/path/to/output"))
///     .assets_dir(PathBuf::from("/path/to/assets"))
///     .worksheet_name("Captions")
///     .start_trim(0.5)
///     .end_trim(0.25)
///     .build();
///
/// assert_eq!(config.worksheet_name, "Captions");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    assets_dir: Option<PathBuf>,
    credentials_path: Option<PathBuf>,
    font_path: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
    sheet_id: Option<String>,
    worksheet_name: Option<String>,
    start_trim: Option<f64>,
    end_trim: Option<f64>,
    chars_per_line: Option<usize>,
    font_size: Option<u32>,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input directory.
    #[must_use]
    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.input_dir = Some(input_dir);
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    /// Sets the assets directory holding the font and credentials.
    #[must_use]
    pub fn assets_dir(mut self, assets_dir: PathBuf) -> Self {
        self.assets_dir = Some(assets_dir);
        self
    }

    /// Overrides the service account key path.
    #[must_use]
    pub fn credentials_path(mut self, path: PathBuf) -> Self {
        self.credentials_path = Some(path);
        self
    }

    /// Overrides the preferred font path.
    #[must_use]
    pub fn font_path(mut self, path: PathBuf) -> Self {
        self.font_path = Some(path);
        self
    }

    /// Sets the directory for transient caption files.
    #[must_use]
    pub fn temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = Some(temp_dir);
        self
    }

    /// Sets the spreadsheet id.
    #[must_use]
    pub fn sheet_id(mut self, sheet_id: impl Into<String>) -> Self {
        self.sheet_id = Some(sheet_id.into());
        self
    }

    /// Sets the preferred worksheet name.
    #[must_use]
    pub fn worksheet_name(mut self, name: impl Into<String>) -> Self {
        self.worksheet_name = Some(name.into());
        self
    }

    /// Sets the seconds cut from the start of each clip.
    #[must_use]
    pub fn start_trim(mut self, seconds: f64) -> Self {
        self.start_trim = Some(seconds);
        self
    }

    /// Sets the seconds cut from the end of each clip.
    #[must_use]
    pub fn end_trim(mut self, seconds: f64) -> Self {
        self.end_trim = Some(seconds);
        self
    }

    /// Sets the caption wrap width.
    #[must_use]
    pub fn chars_per_line(mut self, chars: usize) -> Self {
        self.chars_per_line = Some(chars);
        self
    }

    /// Sets the drawtext font size.
    #[must_use]
    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Builds a CoreConfig instance from the builder.
    #[must_use]
    pub fn build(self) -> CoreConfig {
        let defaults = CoreConfig::default();
        let credentials_path = self.credentials_path.unwrap_or_else(|| match &self.assets_dir {
            Some(dir) => dir.join(DEFAULT_CREDENTIALS_FILE),
            None => defaults.credentials_path.clone(),
        });
        let font_path = self.font_path.unwrap_or_else(|| match &self.assets_dir {
            Some(dir) => dir.join(DEFAULT_FONT_FILE),
            None => defaults.font_path.clone(),
        });

        CoreConfig {
            input_dir: self.input_dir.unwrap_or(defaults.input_dir),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            credentials_path,
            font_path,
            temp_dir: self.temp_dir,
            sheet_id: self.sheet_id,
            worksheet_name: self.worksheet_name.unwrap_or(defaults.worksheet_name),
            start_trim: self.start_trim.unwrap_or(defaults.start_trim),
            end_trim: self.end_trim.unwrap_or(defaults.end_trim),
            chars_per_line: self.chars_per_line.unwrap_or(defaults.chars_per_line),
            font_size: self.font_size.unwrap_or(defaults.font_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_win_over_assets_dir() {
        let config = CoreConfigBuilder::new()
            .assets_dir(PathBuf::from("assets-alt"))
            .credentials_path(PathBuf::from("/secrets/key.json"))
            .build();
        assert_eq!(config.credentials_path, PathBuf::from("/secrets/key.json"));
        assert_eq!(
            config.font_path,
            PathBuf::from("assets-alt").join(DEFAULT_FONT_FILE)
        );
    }

    #[test]
    fn unset_fields_use_defaults() {
        let config = CoreConfigBuilder::new().build();
        let defaults = CoreConfig::default();
        assert_eq!(config.input_dir, defaults.input_dir);
        assert_eq!(config.start_trim, defaults.start_trim);
        assert_eq!(config.font_size, defaults.font_size);
        assert!(config.sheet_id.is_none());
    }
}
