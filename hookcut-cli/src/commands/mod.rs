//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command. The
//! helpers here resolve the spreadsheet id and open the caption sheet, which
//! every command needs.

/// `check`: dependency and sheet layout verification.
pub mod check;

/// `run`: the full batch.
pub mod run;

/// `stats`: caption availability per type.
pub mod stats;

use crate::cli::SheetArgs;
use crate::error::{CliErrorContext, CliResult};

use hookcut_core::config::sheet_id::{load_saved_sheet_id, parse_sheet_id, save_sheet_id};
use hookcut_core::config::{CoreConfig, CoreConfigBuilder};
use hookcut_core::sheets::GoogleSheetsClient;
use hookcut_core::CoreError;

use console::Term;
use log::{error, info, warn};

/// Where the spreadsheet id came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetIdSource {
    Argument,
    SavedFile,
    Prompt,
}

/// Resolves the spreadsheet id without prompting: flag/env first, then the saved file.
pub fn resolve_sheet_id_non_interactive(args: &SheetArgs) -> Option<(String, SheetIdSource)> {
    if let Some(id) = args.sheet_id.as_deref().and_then(parse_sheet_id) {
        return Some((id, SheetIdSource::Argument));
    }
    load_saved_sheet_id(&args.sheet_config)
        .and_then(|saved| parse_sheet_id(&saved))
        .map(|id| (id, SheetIdSource::SavedFile))
}

/// Resolves the spreadsheet id, asking the user when nothing is configured.
/// An id entered at the prompt is saved for the next run.
pub fn resolve_sheet_id(args: &SheetArgs) -> CliResult<String> {
    if let Some((id, source)) = resolve_sheet_id_non_interactive(args) {
        if source == SheetIdSource::SavedFile {
            info!("Using saved Google Sheets ID from {}", args.sheet_config.display());
        }
        return Ok(id);
    }

    let term = Term::stdout();
    if !term.is_term() {
        return Err(CoreError::Config(
            "no Google Sheets ID provided; pass --sheet-id or set HOOKCUT_SHEET_ID".to_string(),
        ));
    }

    let id = prompt_sheet_id(&term)?
        .cli_context("No Google Sheets ID provided")?;

    match save_sheet_id(&args.sheet_config, &id) {
        Ok(()) => info!("Sheet ID saved to {}", args.sheet_config.display()),
        Err(e) => warn!("Could not save Sheet ID to {}: {e}", args.sheet_config.display()),
    }
    Ok(id)
}

fn prompt_sheet_id(term: &Term) -> CliResult<Option<String>> {
    term.write_line("")?;
    term.write_line("Google Sheets Setup")?;
    term.write_line("Please provide your Google Sheets ID.")?;
    term.write_line("You can find it in the URL: https://docs.google.com/spreadsheets/d/[SHEET_ID]/edit")?;
    term.write_line("A full spreadsheet URL is accepted as well.")?;
    term.write_str("Enter your Google Sheets ID: ")?;
    let line = term.read_line()?;
    Ok(parse_sheet_id(&line))
}

/// Builds the core configuration shared by all commands.
pub fn base_config(args: &SheetArgs, sheet_id: Option<String>) -> CoreConfigBuilder {
    let mut builder = CoreConfigBuilder::new()
        .assets_dir(args.assets_dir.clone())
        .worksheet_name(args.worksheet.clone());
    if let Some(credentials) = &args.credentials {
        builder = builder.credentials_path(credentials.clone());
    }
    if let Some(id) = sheet_id {
        builder = builder.sheet_id(id);
    }
    builder
}

/// Opens the caption sheet, printing setup hints for the common failures.
pub fn connect_sheet(config: &CoreConfig) -> CliResult<GoogleSheetsClient> {
    if !config.credentials_path.is_file() {
        error!("Credentials file not found: {}", config.credentials_path.display());
        info!("Please:");
        info!("1. Go to Google Cloud Console");
        info!("2. Create a service account");
        info!("3. Download the JSON credentials file");
        info!("4. Save it as 'credentials.json' in the assets folder");
        return Err(CoreError::Credentials(format!(
            "credentials file not found: {}",
            config.credentials_path.display()
        )));
    }

    GoogleSheetsClient::connect(config).inspect_err(|e| {
        if e.is_sheet_access_error() {
            info!("Please check:");
            info!("1. Sheet ID is correct");
            info!("2. Service account has access to the sheet");
            info!("3. Sheet is not deleted or private");
        }
    })
}

/// Logs the layout hint shown when the sheet headers are wrong.
pub fn log_expected_headers() {
    info!("Please ensure your Google Sheet has exactly these column headers:");
    for header in hookcut_core::sheets::EXPECTED_HEADERS {
        info!("  • {header}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sheet_args(sheet_id: Option<&str>, config_file: PathBuf) -> SheetArgs {
        SheetArgs {
            assets_dir: PathBuf::from("assets"),
            credentials: None,
            sheet_id: sheet_id.map(str::to_string),
            worksheet: "Sheet1".to_string(),
            sheet_config: config_file,
        }
    }

    #[test]
    fn argument_wins_over_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let saved = dir.path().join("sheet_config.txt");
        std::fs::write(&saved, "saved-id\n").unwrap();

        let args = sheet_args(
            Some("https://docs.google.com/spreadsheets/d/from-url_1/edit#gid=0"),
            saved.clone(),
        );
        assert_eq!(
            resolve_sheet_id_non_interactive(&args),
            Some(("from-url_1".to_string(), SheetIdSource::Argument))
        );

        let args = sheet_args(None, saved);
        assert_eq!(
            resolve_sheet_id_non_interactive(&args),
            Some(("saved-id".to_string(), SheetIdSource::SavedFile))
        );
    }

    #[test]
    fn nothing_configured() {
        let dir = tempfile::tempdir().unwrap();
        let args = sheet_args(Some("   "), dir.path().join("missing.txt"));
        assert_eq!(resolve_sheet_id_non_interactive(&args), None);
    }

    #[test]
    fn base_config_uses_assets_and_overrides() {
        let mut args = sheet_args(None, PathBuf::from("sheet_config.txt"));
        args.assets_dir = PathBuf::from("res");
        let config = base_config(&args, Some("abc".to_string())).build();
        assert_eq!(config.credentials_path, PathBuf::from("res/credentials.json"));
        assert_eq!(config.font_path, PathBuf::from("res/TikTokDisplay-Medium.ttf"));
        assert_eq!(config.sheet_id.as_deref(), Some("abc"));

        args.credentials = Some(PathBuf::from("/etc/key.json"));
        let config = base_config(&args, None).build();
        assert_eq!(config.credentials_path, PathBuf::from("/etc/key.json"));
        assert!(config.sheet_id.is_none());
    }

    #[test]
    fn missing_credentials_fail_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let args = SheetArgs {
            assets_dir: dir.path().to_path_buf(),
            ..sheet_args(None, dir.path().join("cfg.txt"))
        };
        let config = base_config(&args, Some("abc".to_string())).build();
        assert!(matches!(connect_sheet(&config), Err(CoreError::Credentials(_))));
    }
}
