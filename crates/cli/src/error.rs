//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map StoreError and CliError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 2 is left to clap for usage errors.
//! - Exit code 4 means "no value at that dot-path", so `has` and `get` can be
//!   used in shell conditionals.

use dotconf_config::StoreError;
use thiserror::Error;

/// Structured exit codes for dotconf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// The config file exists but is not a valid mapping.
    ///
    /// Scripts should repair or remove the file; it is never overwritten.
    LoadFailure = 3,

    /// No value is stored at the requested dot-path.
    NotFound = 4,

    /// Validation error - bad filename, bad value, missing `--file`.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// The config file or its directory could not be read or written.
    IoError = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Errors raised by the front end itself rather than the store.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No config file given. Pass --file or set DOTCONF_FILE")]
    MissingFile,

    #[error("No value at '{0}'")]
    PathNotFound(String),
}

impl From<&StoreError> for ExitCode {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::InvalidArgument { .. } => ExitCode::ValidationError,
            StoreError::UnsetFilename => ExitCode::ValidationError,
            StoreError::LoadFailure { .. } => ExitCode::LoadFailure,
            StoreError::Io { .. } => ExitCode::IoError,
        }
    }
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::MissingFile => ExitCode::ValidationError,
            CliError::PathNotFound(_) => ExitCode::NotFound,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(store_err) = cause.downcast_ref::<StoreError>() {
                return ExitCode::from(store_err);
            }
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(cli_err);
            }
        }

        ExitCode::GeneralError
    }
}
