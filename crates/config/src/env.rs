//! Base directory lookup for symbolic config filenames.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Provide the default base directory (`DOTCONF_BASE_PATH`, then the
//!   platform config directory).
//!
//! Does NOT handle:
//! - Resolving filenames against the base directory (see `filename.rs`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - The environment variable takes precedence over the platform directory.

use std::path::PathBuf;

use crate::constants::{APP_NAME, BASE_PATH_ENV};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Supplies the base directory used when a store is built without one.
#[cfg_attr(test, mockall::automock)]
pub trait BasePathSource {
    /// Returns the configured base directory, if any.
    fn configured_base_path(&self) -> Option<PathBuf>;
}

/// Looks up `DOTCONF_BASE_PATH`, falling back to the platform config directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvBasePath;

impl BasePathSource for EnvBasePath {
    fn configured_base_path(&self) -> Option<PathBuf> {
        env_var_or_none(BASE_PATH_ENV)
            .map(PathBuf::from)
            .or_else(default_base_path)
    }
}

/// Returns the platform config directory for dotconf:
/// - Linux: `~/.config/dotconf`
/// - macOS: `~/Library/Application Support/dotconf`
/// - Windows: `%AppData%\dotconf\config`
pub fn default_base_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}
