//! Implementation of the 'run' subcommand.
//!
//! Checks dependencies, opens the caption sheet, validates its layout, lists
//! the input videos and hands them to the hookcut-core batch driver.

use crate::cli::RunArgs;
use crate::commands::{base_config, connect_sheet, log_expected_headers, resolve_sheet_id};
use crate::error::{CliErrorContext, CliResult};
use crate::output;

use hookcut_core::external::{CrateFfprobeExecutor, SidecarSpawner, check_required_tools};
use hookcut_core::sheets::{SheetStatistics, SpreadsheetClient, check_sheet_format};
use hookcut_core::{BatchResult, CoreConfig, CoreError, VideoType, format_duration, infer_video_type};

use log::{error, info, warn};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Creates the input and output directories when they are missing.
pub fn ensure_directories(args: &RunArgs) -> CliResult<()> {
    for dir in [&args.input_dir, &args.output_dir] {
        fs::create_dir_all(dir)
            .cli_with_context(|| format!("Failed to create directory '{}'", dir.display()))?;
    }
    Ok(())
}

/// Lists the discovered files with their inferred types.
fn print_discovered_files(files: &[PathBuf]) {
    output::print_section(&format!("Found {} video file(s) to process", files.len()));
    for (i, file) in files.iter().enumerate() {
        let name = file
            .file_name()
            .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
        let type_info = file
            .file_stem()
            .and_then(|stem| infer_video_type(&stem.to_string_lossy()))
            .map_or_else(|| "unknown type".to_string(), |t| t.keyword().to_string());
        output::print_sub_item(&format!("{}. {name} ({type_info})", i + 1));
    }
}

fn print_settings(config: &CoreConfig, sheet: &dyn SpreadsheetClient) {
    output::print_processing("Trimming settings");
    output::print_sub_item(&format!("Remove first {}s of each video", config.start_trim));
    output::print_sub_item(&format!("Remove last {}s of each video", config.end_trim));
    output::print_sub_item(&format!("Total reduction: {}s per video", config.total_trim()));

    output::print_processing("Caption font");
    if config.font_path.is_file() {
        output::print_status("Custom font", &config.font_path.display().to_string(), true);
    } else {
        output::print_status("Custom font", "not found, will use a system font", false);
    }

    output::print_processing("Caption sheet");
    output::print_status("Spreadsheet", sheet.title(), true);
    output::print_status("Worksheet", sheet.worksheet_name(), false);
}

/// Runs the batch and returns its result.
///
/// Fails before touching any video when dependencies, sheet access or the
/// sheet layout are broken, or when the input directory holds no videos.
pub fn run_batch(args: &RunArgs) -> CliResult<BatchResult> {
    check_required_tools()?;
    info!("FFmpeg and FFprobe found");

    let sheet_id = resolve_sheet_id(&args.sheet)?;
    let config = base_config(&args.sheet, Some(sheet_id))
        .input_dir(args.input_dir.clone())
        .output_dir(args.output_dir.clone())
        .build();
    config.validate()?;

    let sheet = connect_sheet(&config)?;
    if let Err(e) = check_sheet_format(&sheet) {
        if matches!(e, CoreError::SheetFormat(_)) {
            log_expected_headers();
        }
        return Err(e);
    }

    match SheetStatistics::collect(&sheet) {
        Ok(stats) => output::print_sheet_statistics(&stats),
        Err(e) => warn!("Error reading Google Sheets statistics: {e}"),
    }

    ensure_directories(args)?;

    let files = match hookcut_core::find_processable_files(&config.input_dir) {
        Ok(files) => files,
        Err(CoreError::NoFilesFound) => {
            error!("No video files found in {}", config.input_dir.display());
            info!("Please add video files (.mp4, .avi, .mov, etc.) to the input folder.");
            info!("Filenames should contain one of: {}", VideoType::vocabulary());
            return Err(CoreError::NoFilesFound);
        }
        Err(e) => return Err(e),
    };

    print_discovered_files(&files);
    print_settings(&config, &sheet);

    let started = Instant::now();
    let result = hookcut_core::process_videos(
        &sheet,
        &SidecarSpawner,
        &CrateFfprobeExecutor::new(),
        &config,
        &files,
    )?;

    output::print_batch_summary(&result, config.start_trim, config.end_trim);
    output::print_status(
        "Total time",
        &format_duration(started.elapsed().as_secs_f64()),
        false,
    );
    if result.any_succeeded() {
        info!("");
        info!("Check {} for your processed videos.", config.output_dir.display());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SheetArgs;

    #[test]
    fn creates_missing_directories() {
        let root = tempfile::tempdir().unwrap();
        let args = RunArgs {
            input_dir: root.path().join("input-videos"),
            output_dir: root.path().join("nested/output-videos"),
            log_dir: None,
            sheet: SheetArgs {
                assets_dir: root.path().join("assets"),
                credentials: None,
                sheet_id: None,
                worksheet: "Sheet1".to_string(),
                sheet_config: root.path().join("sheet_config.txt"),
            },
        };
        ensure_directories(&args).unwrap();
        assert!(args.input_dir.is_dir());
        assert!(args.output_dir.is_dir());
    }
}
