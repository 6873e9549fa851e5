//! Filename resolution for config files.
//!
//! Responsibilities:
//! - Turn a direct filesystem path or a symbolic dot-path into the canonical
//!   file path used for I/O.
//! - Strip the fixed extension again for display.
//!
//! Does NOT handle:
//! - Checking whether the file exists (see `store.rs`).
//! - Looking up the default base directory (see `env.rs`).
//!
//! Invariants:
//! - Input containing a path separator is a direct path. Its last segment may
//!   not contain a `.` after the first character.
//! - Input without a separator is symbolic and resolves under the base
//!   directory, one directory level per dot-segment.
//! - Canonical paths always end in `.jsonc`.

use std::ffi::OsString;
use std::path::{Path, PathBuf, is_separator};

use crate::constants::FILE_EXTENSION;
use crate::error::{Result, StoreError};
use crate::tree::segments;

/// Resolves `input` to a canonical config file path.
///
/// # Errors
/// Returns `InvalidArgument` if a direct path's basename carries an
/// extension, if it names no file, or if a symbolic path is given without a
/// base directory.
pub fn resolve(input: &str, base_dir: Option<&Path>) -> Result<PathBuf> {
    if input.chars().any(is_separator) {
        resolve_direct(input)
    } else {
        resolve_symbolic(input, base_dir)
    }
}

/// Removes the fixed extension from a canonical path.
pub fn strip_extension(canonical: &Path) -> PathBuf {
    canonical.with_extension("")
}

fn resolve_direct(input: &str) -> Result<PathBuf> {
    let path = Path::new(input);
    let basename = match path.file_name() {
        Some(name) if !input.ends_with(is_separator) => name.to_string_lossy(),
        _ => {
            return Err(StoreError::invalid(format!(
                "file path '{input}' does not name a file"
            )));
        }
    };

    // A leading dot marks a hidden file rather than an extension.
    if basename.find('.').is_some_and(|index| index > 0) {
        return Err(StoreError::invalid(format!(
            "file path basename '{basename}' cannot have an extension"
        )));
    }

    Ok(with_config_extension(path.to_path_buf()))
}

fn resolve_symbolic(input: &str, base_dir: Option<&Path>) -> Result<PathBuf> {
    let base_dir = base_dir.ok_or_else(|| {
        StoreError::invalid(format!(
            "symbolic filename '{input}' needs a base directory, but none is configured"
        ))
    })?;

    let mut parts = segments(input).peekable();
    if parts.peek().is_none() {
        return Err(StoreError::invalid(format!(
            "symbolic filename '{input}' must contain at least one non-empty segment"
        )));
    }

    let mut path = base_dir.to_path_buf();
    path.extend(parts);
    Ok(with_config_extension(path))
}

fn with_config_extension(path: PathBuf) -> PathBuf {
    let mut raw = OsString::from(path);
    raw.push(".");
    raw.push(FILE_EXTENSION);
    PathBuf::from(raw)
}
