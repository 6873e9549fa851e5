//! Command implementations for the dotconf CLI.
//!
//! Responsibilities:
//! - Open the config store named by the global options.
//! - Convert command-line text into config values and back.
//!
//! Does NOT handle:
//! - Argument parsing (see `args` module).
//! - Exit code selection (see `error` module).
//!
//! Invariants:
//! - Every command loads the file first; writing commands save afterwards.
//! - Values are printed as pretty JSON on stdout.

pub mod read;
pub mod write;

use anyhow::{Context, Result};
use dotconf_config::{ConfigStore, StoreOptions, Value};
use std::path::PathBuf;

use crate::error::CliError;

/// Global options shared by every subcommand.
pub struct StoreArgs {
    pub file: Option<String>,
    pub base_dir: Option<PathBuf>,
    pub atomic: bool,
}

/// Builds a store from the global options and loads the named file.
///
/// A missing file is not an error: the store starts empty and the first
/// save creates it.
pub fn open_store(args: &StoreArgs) -> Result<ConfigStore> {
    let file = args
        .file
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .ok_or(CliError::MissingFile)?;

    let mut options = StoreOptions::new().with_atomic_save(args.atomic);
    if let Some(dir) = args.base_dir.as_ref().filter(|d| !d.as_os_str().is_empty()) {
        options = options.with_base_dir(dir);
    }

    let mut store = ConfigStore::with_options(options);
    store
        .load(file)
        .with_context(|| format!("Failed to open config '{file}'"))?;

    tracing::debug!(
        file,
        path = ?store.file_path(),
        atomic = args.atomic,
        "Config store opened"
    );
    Ok(store)
}

/// Parses a command-line value as JSON, keeping it as a plain string when it
/// is not valid JSON.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Value is not JSON, storing it as a string");
        Value::String(raw.to_string())
    })
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to format value")?;
    println!("{text}");
    Ok(())
}
