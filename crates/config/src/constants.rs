//! Centralized constants for the dotconf workspace.
//!
//! This module contains the fixed names and formats shared by the store,
//! the file codec and the CLI to avoid string duplication.

// =============================================================================
// File Format
// =============================================================================

/// Extension appended to every canonical config file path.
///
/// The persisted format is JSON followed by a block comment, hence `jsonc`.
pub const FILE_EXTENSION: &str = "jsonc";

/// Leading text of the generated-file comment written after the config body.
pub const GENERATED_BY: &str = "Config file generated by dotconf";

/// Suffix used for the sibling temporary file when atomic saves are enabled.
pub const TEMP_FILE_SUFFIX: &str = "tmp";

// =============================================================================
// Path Notation
// =============================================================================

/// Separator between segments of a dot-path (`name.first`).
pub const PATH_SEPARATOR: char = '.';

/// Deepest mapping/sequence nesting a stored value may reach, counting the
/// root mapping. Stays well under the JSON reader's recursion limit of 128
/// so every saved file loads again.
pub const MAX_NESTING_DEPTH: usize = 64;

// =============================================================================
// Environment & Directories
// =============================================================================

/// Environment variable naming the base directory for symbolic filenames.
pub const BASE_PATH_ENV: &str = "DOTCONF_BASE_PATH";

/// Application name used to derive the platform config directory.
pub const APP_NAME: &str = "dotconf";
