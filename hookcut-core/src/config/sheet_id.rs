//! Persistence of the spreadsheet id between runs.
//!
//! The id is stored as a single line in a small text file so the user only
//! has to enter it once. Users frequently paste the whole sheet URL, so
//! [`parse_sheet_id`] accepts either form.

use crate::error::CoreResult;
use std::fs;
use std::path::Path;

/// Reads a previously saved sheet id. Missing, unreadable or blank files yield `None`.
pub fn load_saved_sheet_id(config_file: &Path) -> Option<String> {
    match fs::read_to_string(config_file) {
        Ok(contents) => {
            let id = contents.trim();
            if id.is_empty() {
                None
            } else {
                log::debug!("Loaded saved sheet id from {}", config_file.display());
                Some(id.to_string())
            }
        }
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Could not read {}: {}", config_file.display(), e);
            }
            None
        }
    }
}

/// Writes the sheet id, replacing any previous value.
pub fn save_sheet_id(config_file: &Path, sheet_id: &str) -> CoreResult<()> {
    if let Some(parent) = config_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(config_file, sheet_id.trim())?;
    Ok(())
}

/// Extracts the spreadsheet id from user input.
///
/// Accepts a bare id or a URL of the form
/// `https://docs.google.com/spreadsheets/d/<id>/edit`. Returns `None` for blank input.
#[must_use]
pub fn parse_sheet_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(idx) = input.find("/d/") {
        let rest = &input[idx + 3..];
        let id: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        return if id.is_empty() { None } else { Some(id) };
    }

    Some(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("sheet_config.txt");
        save_sheet_id(&file, "  abc-123_XYZ \n").unwrap();
        assert_eq!(load_saved_sheet_id(&file).as_deref(), Some("abc-123_XYZ"));
    }

    #[test]
    fn missing_or_blank_file_is_none() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("sheet_config.txt");
        assert!(load_saved_sheet_id(&file).is_none());
        fs::write(&file, "   \n").unwrap();
        assert!(load_saved_sheet_id(&file).is_none());
    }

    #[test]
    fn parse_accepts_url_and_bare_id() {
        assert_eq!(
            parse_sheet_id(
                "https://docs.google.com/spreadsheets/d/1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms/edit#gid=0"
            )
            .as_deref(),
            Some("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms")
        );
        assert_eq!(parse_sheet_id("  plainId42 ").as_deref(), Some("plainId42"));
        assert!(parse_sheet_id("   ").is_none());
        assert!(parse_sheet_id("https://docs.google.com/spreadsheets/d/").is_none());
    }
}
