//! Commands that change the tree and save it: set, forget, reset.

use anyhow::{Context, Result};
use dotconf_config::ConfigStore;

use super::parse_value;

pub fn set(store: &mut ConfigStore, path: &str, raw: &str, if_absent: bool) -> Result<()> {
    let value = parse_value(raw);
    if if_absent {
        store.set_if(path, value)?;
    } else {
        store.set(path, value)?;
    }
    save(store)
}

pub fn forget(store: &mut ConfigStore, path: &str) -> Result<()> {
    store.forget(path);
    save(store)
}

pub fn reset(store: &mut ConfigStore) -> Result<()> {
    store.reset();
    save(store)
}

fn save(store: &ConfigStore) -> Result<()> {
    store.save().context("Failed to save config")?;
    Ok(())
}
