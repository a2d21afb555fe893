//! Error types shared across the mergo-core library.
//!
//! All fallible core operations return [`CoreResult`]. Command-related
//! variants carry the command label plus the underlying cause so the CLI can
//! surface a useful message without re-wrapping.

use std::fmt;
use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Custom error types for mergo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("No media files found")]
    NoFilesFound,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{cmd}': {cause}")]
    CommandStart { cmd: String, cause: String },

    #[error("Command '{cmd}' failed ({status}): {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to wait for command '{cmd}': {cause}")]
    CommandWait { cmd: String, cause: String },

    #[error("ffprobe parse error: {0}")]
    FfprobeParse(String),

    #[error("Tag error for '{path}': {message}")]
    TagError { path: String, message: String },

    #[error("Cover image error: {0}")]
    CoverImage(String),

    #[error("Operation '{0}' was cancelled")]
    Cancelled(String),

    #[error("Worker for '{0}' terminated without producing a result")]
    WorkerFailed(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for mergo-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a command that could not spawn.
pub fn command_start_error(cmd: impl Into<String>, cause: impl fmt::Display) -> CoreError {
    CoreError::CommandStart {
        cmd: cmd.into(),
        cause: cause.to_string(),
    }
}

/// Builds a [`CoreError::CommandFailed`] for a command that exited non-zero.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

/// Builds a [`CoreError::CommandWait`] for a command whose exit could not be
/// collected.
pub fn command_wait_error(cmd: impl Into<String>, cause: impl fmt::Display) -> CoreError {
    CoreError::CommandWait {
        cmd: cmd.into(),
        cause: cause.to_string(),
    }
}
