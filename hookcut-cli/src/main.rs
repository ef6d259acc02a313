// hookcut-cli/src/main.rs
//
// Entry point for the `hookcut` binary.
//
// Parses arguments, installs logging, dispatches to the selected command and
// turns the outcome into an exit status: errors are printed in red and exit
// with 1, and a batch in which no video succeeded also exits with 1.

use clap::Parser;
use hookcut_cli::{Cli, Commands, logging, run_batch, run_check, run_stats};
use owo_colors::OwoColorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    let log_dir = match &cli.command {
        Commands::Run(args) => Some(
            args.log_dir
                .clone()
                .unwrap_or_else(|| args.output_dir.join("logs")),
        ),
        Commands::Stats(_) | Commands::Check(_) => None,
    };

    let result = logging::init_logging(cli.verbose, log_dir.as_deref()).and_then(|log_path| {
        if let Some(path) = log_path {
            log::debug!("Main log file: {}", path.display());
        }
        match &cli.command {
            Commands::Run(args) => run_batch(args).map(|result| result.any_succeeded()),
            Commands::Stats(args) => run_stats(args).map(|_| true),
            Commands::Check(args) => run_check(args).map(|()| true),
        }
    });

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}
