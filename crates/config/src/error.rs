//! Error types for the config store.
//!
//! Responsibilities:
//! - Define the error variants surfaced by every store operation.
//! - Preserve the underlying cause (I/O or parser error) as the error source.
//!
//! Does NOT handle:
//! - Logging. Errors are returned to the caller and never logged here.
//! - Exit-code mapping (see `crates/cli`).
//!
//! Invariants:
//! - I/O variants always carry the path and the action that failed.
//! - Parse failures are wrapped in `LoadFailure`, never returned bare.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::ParseError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Errors that can occur while reading, mutating or persisting a config store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Malformed input: a bad filename, an empty key path, or a value that
    /// cannot be represented in the config tree.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The config file exists but does not hold a config mapping.
    #[error("Existing configuration file at {path} could not be loaded: {source}")]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// `save` was called before `load` or `set_filename`.
    #[error("A filename was not loaded or set")]
    UnsetFilename,

    /// An underlying filesystem call failed.
    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: IoAction,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        StoreError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn io(action: IoAction, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Filesystem action that produced a [`StoreError::Io`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Read,
    CreateDir,
    Write,
    Rename,
}

impl fmt::Display for IoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            IoAction::Read => "read",
            IoAction::CreateDir => "create directory",
            IoAction::Write => "write",
            IoAction::Rename => "rename into",
        };
        f.write_str(action)
    }
}
