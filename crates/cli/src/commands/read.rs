//! Read-only commands: get, only, has, show, path.

use anyhow::Result;
use dotconf_config::{ConfigStore, Value};

use super::{parse_value, print_json};
use crate::error::CliError;

pub fn get(store: &ConfigStore, path: &str, default: Option<&str>) -> Result<()> {
    if let Some(value) = store.get(path) {
        return print_json(value);
    }

    match default {
        Some(raw) => print_json(&parse_value(raw)),
        None => Err(CliError::PathNotFound(path.to_string()).into()),
    }
}

pub fn only(store: &ConfigStore, paths: &[String]) -> Result<()> {
    print_json(&Value::Object(store.only(paths)))
}

/// Prints `true` or `false`; an absent path also fails with `NotFound`.
pub fn has(store: &ConfigStore, path: &str) -> Result<()> {
    let present = store.has(path);
    println!("{present}");
    if present {
        Ok(())
    } else {
        Err(CliError::PathNotFound(path.to_string()).into())
    }
}

pub fn show(store: &ConfigStore) -> Result<()> {
    print_json(&store.tree().to_value())
}

pub fn path(store: &ConfigStore) -> Result<()> {
    if let Some(filename) = store.filename() {
        println!("{}", filename.display());
    }
    Ok(())
}
