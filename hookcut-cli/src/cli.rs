// hookcut-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "hookcut: caption overlay batch editor",
    long_about = "Trims short vertical videos and overlays captions taken from a Google Sheet, \
                  choosing each caption by the mood keyword in the video's filename."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on the console and in the log file.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trims and captions every video in the input directory
    Run(RunArgs),
    /// Prints per-type caption availability from the sheet
    Stats(SheetArgs),
    /// Verifies ffmpeg/ffprobe and the sheet layout without processing videos
    Check(SheetArgs),
}

/// Options for reaching the caption spreadsheet.
#[derive(Args, Debug, Clone)]
pub struct SheetArgs {
    /// Directory holding the caption font and credentials.json
    #[arg(short = 'a', long = "assets", value_name = "ASSETS_DIR", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Service account key (defaults to ASSETS_DIR/credentials.json)
    #[arg(long, value_name = "FILE", env = "HOOKCUT_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Google Sheets ID or full spreadsheet URL
    #[arg(long, value_name = "SHEET_ID", env = "HOOKCUT_SHEET_ID")]
    pub sheet_id: Option<String>,

    /// Worksheet to use; the first worksheet is used when it does not exist
    #[arg(long, value_name = "NAME", env = "HOOKCUT_WORKSHEET", default_value = "Sheet1")]
    pub worksheet: String,

    /// File remembering the last spreadsheet id entered interactively
    #[arg(long, value_name = "FILE", default_value = "sheet_config.txt")]
    pub sheet_config: PathBuf,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory containing the videos to edit
    #[arg(short = 'i', long = "input", value_name = "INPUT_DIR", default_value = "input-videos")]
    pub input_dir: PathBuf,

    /// Directory where edited videos will be saved
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR", default_value = "output-videos")]
    pub output_dir: PathBuf,

    /// Optional: Directory for log files (defaults to OUTPUT_DIR/logs)
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(flatten)]
    pub sheet: SheetArgs,
}
