//! Implementation of the 'check' subcommand.
//!
//! Runs the same preflight as `run` (external tools, credentials, sheet
//! access and header layout) and stops before any video is touched.

use crate::cli::SheetArgs;
use crate::commands::{base_config, connect_sheet, log_expected_headers, resolve_sheet_id};
use crate::error::CliResult;
use crate::output;

use hookcut_core::external::check_dependency;
use hookcut_core::sheets::check_sheet_format;
use hookcut_core::CoreError;

/// Verifies ffmpeg, ffprobe and the caption sheet.
pub fn run_check(args: &SheetArgs) -> CliResult<()> {
    output::print_section("Preflight Check");

    for tool in ["ffmpeg", "ffprobe"] {
        check_dependency(tool)?;
        output::print_success(&format!("{tool} found"));
    }

    let sheet_id = resolve_sheet_id(args)?;
    let config = base_config(args, Some(sheet_id)).build();
    config.validate()?;
    let sheet = connect_sheet(&config)?;
    output::print_success("Google Sheets authentication successful");

    match check_sheet_format(&sheet) {
        Ok(rows) => {
            output::print_success(&format!("Google Sheet format validated ({rows} data rows)"));
        }
        Err(e) => {
            if matches!(e, CoreError::SheetFormat(_)) {
                log_expected_headers();
            }
            return Err(e);
        }
    }

    if config.font_path.is_file() {
        output::print_success(&format!("Custom font available: {}", config.font_path.display()));
    } else {
        output::print_status("Custom font", "not found, a system font will be used", false);
    }
    Ok(())
}
