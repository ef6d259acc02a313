//! Error types for the hookcut-core library.
//!
//! Every fallible operation in the crate returns [`CoreResult`]. Errors that
//! abort a run before any video is touched (missing tools, sheet access,
//! sheet layout) and errors that only fail a single video share this enum;
//! the batch driver decides which are fatal.

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Required dependency '{0}' not found. Please install it and ensure it is in your PATH.")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, std::io::Error),

    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, std::io::Error),

    #[error("Command '{0}' failed with status {1}. Stderr: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    #[error("Google Sheets authentication failed: {0}")]
    SheetAuth(String),

    #[error("Spreadsheet not found: {0}")]
    SheetNotFound(String),

    #[error("Permission denied for spreadsheet: {0}")]
    SheetPermissionDenied(String),

    #[error("Google Sheets API error: {0}")]
    SheetApi(String),

    #[error("Spreadsheet format error: {0}")]
    SheetFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("No processable video files found in the input directory")]
    NoFilesFound,

    #[error("Could not determine video type from filename: {0}")]
    UnknownVideoType(String),

    #[error("No unused overlay text available for type '{0}'")]
    NoCaptionAvailable(String),

    #[error("All render attempts failed for {0}")]
    RenderFailed(String),

    #[error("{0}")]
    OperationFailed(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Errors that make the remote caption store unusable for the whole run.
    #[must_use]
    pub fn is_sheet_access_error(&self) -> bool {
        matches!(
            self,
            CoreError::SheetAuth(_)
                | CoreError::SheetNotFound(_)
                | CoreError::SheetPermissionDenied(_)
                | CoreError::Credentials(_)
        )
    }
}

pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn command_wait_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}
