// ============================================================================
// hookcut-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and per-run log file
//
// All output from hookcut-core and the CLI goes through the `log` facade.
// fern dispatches it twice: a colored console stream with the bare message,
// and a timestamped plain-text file per run.
//
// - Default level: info (debug with --verbose)
// - ffmpeg's own log lines are kept out of the console unless --verbose
// - File name: hookcut_run_<YYYYMMDD_HHMMSS>.log

use crate::error::{CliErrorContext, CliResult};

use log::LevelFilter;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Log file path for a run started now.
pub fn run_log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("hookcut_run_{}.log", get_timestamp()))
}

fn console_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn colored_prefix(level: log::Level) -> Option<String> {
    match level {
        log::Level::Error => Some(format!("{}", "ERROR".bright_red().bold())),
        log::Level::Warn => Some(format!("{}", "WARN ".yellow())),
        log::Level::Info => None,
        log::Level::Debug => Some(format!("{}", "DEBUG".blue())),
        log::Level::Trace => Some(format!("{}", "TRACE".magenta())),
    }
}

/// Installs the global logger.
///
/// With `log_dir` set, a run log file is created there and its path returned.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let level = console_level(verbose);

    let console = fern::Dispatch::new()
        .format(|out, message, record| match colored_prefix(record.level()) {
            Some(prefix) => out.finish(format_args!("{prefix} {message}")),
            None => out.finish(format_args!("{message}")),
        })
        .level(level)
        .level_for("ffmpeg_log", if verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new().chain(console);

    let log_path = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).cli_with_context(|| {
                format!("Failed to create log directory '{}'", dir.display())
            })?;
            let path = run_log_path(dir);
            let file = fern::log_file(&path).cli_with_context(|| {
                format!("Failed to create log file '{}'", path.display())
            })?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "{} {:<5} [{}] {}",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .level(level)
                    .chain(file),
            );
            Some(path)
        }
        None => None,
    };

    dispatch
        .apply()
        .map_err(|e| hookcut_core::CoreError::OperationFailed(format!("Failed to initialize logging: {e}")))?;
    log::debug!("Logger initialized with level: {level}");
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_shape() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(ts.as_bytes()[8], b'_');
        assert!(ts.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn log_file_name() {
        let path = run_log_path(Path::new("logs"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("hookcut_run_"));
        assert!(name.ends_with(".log"));
        assert_eq!(path.parent(), Some(Path::new("logs")));
    }

    #[test]
    fn verbose_raises_level() {
        assert_eq!(console_level(true), LevelFilter::Debug);
        assert_eq!(console_level(false), LevelFilter::Info);
        assert!(colored_prefix(log::Level::Info).is_none());
        assert!(colored_prefix(log::Level::Error).is_some());
    }
}
