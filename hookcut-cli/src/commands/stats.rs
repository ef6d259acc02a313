//! Implementation of the 'stats' subcommand.

use crate::cli::SheetArgs;
use crate::commands::{base_config, connect_sheet, resolve_sheet_id};
use crate::error::CliResult;
use crate::output;

use hookcut_core::sheets::{SheetStatistics, SpreadsheetClient};

/// Connects to the caption sheet and prints per-type availability.
pub fn run_stats(args: &SheetArgs) -> CliResult<SheetStatistics> {
    let sheet_id = resolve_sheet_id(args)?;
    let config = base_config(args, Some(sheet_id)).build();
    let sheet = connect_sheet(&config)?;

    let stats = SheetStatistics::collect(&sheet)?;
    output::print_status("Spreadsheet", sheet.title(), true);
    output::print_status("Worksheet", sheet.worksheet_name(), false);
    output::print_sheet_statistics(&stats);
    Ok(stats)
}
