//! Error types for ipydeps operations.
//!
//! This module defines [`IpydepsError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Most failures during an install are logged and skipped: a broken override
//! document, a failing override command or a non-zero pip exit never abort
//! the run. Only environment problems (missing interpreter, unreadable
//! certificates, malformed settings) surface as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ipydeps operations.
#[derive(Debug, Error)]
pub enum IpydepsError {
    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A named pip config was requested but does not exist.
    #[error("Could not find pip config named {name} at {path}")]
    PipConfigNotFound { name: String, path: PathBuf },

    /// A subprocess failed where failure is fatal.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A subprocess could not be started at all.
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The interpreter's version output could not be understood.
    #[error("Could not determine Python version from: {output}")]
    InterpreterVersion { output: String },

    /// Certificate material is missing or unusable.
    #[error("PKI error: {message}")]
    Pki { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ipydeps operations.
pub type Result<T> = std::result::Result<T, IpydepsError>;
