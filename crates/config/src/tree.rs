//! In-memory config tree addressed by dot-paths.
//!
//! Responsibilities:
//! - Resolve dot-paths (`name.first`) against nested mappings.
//! - Insert values, creating intermediate mappings on the way.
//! - Remove leaves, project subsets and reset the tree.
//! - Reject values that cannot be represented as config data.
//!
//! Does NOT handle:
//! - Reading or writing files (see `store.rs` and `codec.rs`).
//! - Filename resolution (see `filename.rs`).
//!
//! Invariants:
//! - Empty path segments (leading, trailing or repeated dots) are skipped.
//! - Values are validated before the tree is touched; a failed `set` or
//!   `set_many` leaves the tree exactly as it was. Validation rejects
//!   non-finite floats and nesting deeper than `MAX_NESTING_DEPTH` (see
//!   `value.rs`), so every stored tree survives a save and reload.
//! - Only mappings are traversed. A sequence or scalar in the middle of a
//!   path ends the lookup.
//! - Mapping insertion order is preserved so rendering is deterministic.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::PATH_SEPARATOR;
use crate::error::{Result, StoreError};
use crate::value::to_config_value;

/// Splits a dot-path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR).filter(|segment| !segment.is_empty())
}

/// Nested mapping of config values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    root: Map<String, Value>,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value at `path`, or `None` if any segment is missing.
    ///
    /// A path without segments addresses no value; use [`ConfigTree::all`]
    /// for the whole tree.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = segments(path).collect();
        self.lookup(&parts)
    }

    /// Returns the value at `path`, or `fallback` when it is absent.
    pub fn get_or<'a>(&'a self, path: &str, fallback: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(fallback)
    }

    /// Deserializes the value at `path` into `T`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the value exists but has the wrong shape.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        self.get(path)
            .map(|value| {
                T::deserialize(value).map_err(|e| {
                    StoreError::invalid(format!("config value at '{path}' has unexpected type: {e}"))
                })
            })
            .transpose()
    }

    /// Returns a mapping restricted to the given paths that exist.
    ///
    /// Keys are the paths as given; missing paths are omitted rather than
    /// filled with null.
    pub fn only<I, K>(&self, paths: I) -> Map<String, Value>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        paths
            .into_iter()
            .filter_map(|path| {
                let path = path.as_ref();
                self.get(path).map(|value| (path.to_string(), value.clone()))
            })
            .collect()
    }

    /// Returns the whole tree.
    pub fn all(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Returns an owned copy of the whole tree as a mapping value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Returns true if every segment of `path` resolves to an existing key.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Sets `value` at `path`, overwriting any existing value.
    pub fn set<V: Serialize>(&mut self, path: &str, value: V) -> Result<&mut Self> {
        self.set_with(path, value, true)
    }

    /// Sets `value` at `path` only if nothing is stored there yet.
    pub fn set_if<V: Serialize>(&mut self, path: &str, value: V) -> Result<&mut Self> {
        self.set_with(path, value, false)
    }

    /// Sets `value` at `path`.
    ///
    /// Missing intermediate keys are created as empty mappings and non-mapping
    /// intermediates are replaced. With `overwrite == false` an existing value
    /// is kept and the call still succeeds.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the path has no segments or the value
    /// cannot be stored: it fails to serialize, holds a non-finite float, or
    /// would nest deeper than `MAX_NESTING_DEPTH`. The tree is unchanged.
    pub fn set_with<V: Serialize>(
        &mut self,
        path: &str,
        value: V,
        overwrite: bool,
    ) -> Result<&mut Self> {
        let parts = path_segments(path)?;
        let value = to_config_value(path, parts.len(), value)?;
        self.apply(&parts, value, overwrite);
        Ok(self)
    }

    /// Sets every `(path, value)` pair in iteration order.
    ///
    /// All entries are validated before any is applied, so a bad entry leaves
    /// the tree untouched. Later entries win over earlier ones sharing a path
    /// when `overwrite` is true.
    pub fn set_many<I, K, V>(&mut self, entries: I, overwrite: bool) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        let validated = entries
            .into_iter()
            .map(|(path, value)| -> Result<(Vec<String>, Value)> {
                let path = path.as_ref();
                let parts: Vec<String> = path_segments(path)?
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                let value = to_config_value(path, parts.len(), value)?;
                Ok((parts, value))
            })
            .collect::<Result<Vec<_>>>()?;

        for (parts, value) in validated {
            let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
            self.apply(&parts, value, overwrite);
        }
        Ok(self)
    }

    /// Removes the value at `path`. Missing segments make this a no-op.
    pub fn forget(&mut self, path: &str) -> &mut Self {
        let parts: Vec<&str> = segments(path).collect();
        remove_at(&mut self.root, &parts);
        self
    }

    /// Clears the tree.
    pub fn reset(&mut self) -> &mut Self {
        self.root.clear();
        self
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn lookup(&self, parts: &[&str]) -> Option<&Value> {
        let (first, rest) = parts.split_first()?;
        rest.iter().try_fold(self.root.get(*first)?, |current, segment| {
            current.as_object()?.get(*segment)
        })
    }

    fn apply(&mut self, parts: &[&str], value: Value, overwrite: bool) {
        if !overwrite && self.lookup(parts).is_some() {
            return;
        }
        insert_at(&mut self.root, parts, value);
    }
}

impl From<Map<String, Value>> for ConfigTree {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

impl From<ConfigTree> for Map<String, Value> {
    fn from(tree: ConfigTree) -> Self {
        tree.root
    }
}

fn path_segments(path: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = segments(path).collect();
    if parts.is_empty() {
        return Err(StoreError::invalid(format!(
            "config key '{path}' must contain at least one non-empty segment"
        )));
    }
    Ok(parts)
}


fn insert_at(map: &mut Map<String, Value>, parts: &[&str], value: Value) {
    match parts {
        [] => {}
        [leaf] => {
            map.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let child = map
                .entry(*head)
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(nested) = child {
                insert_at(nested, rest, value);
            } else {
                let mut fresh = Map::new();
                insert_at(&mut fresh, rest, value);
                *child = Value::Object(fresh);
            }
        }
    }
}

fn remove_at(map: &mut Map<String, Value>, parts: &[&str]) -> Option<Value> {
    match parts {
        [] => None,
        [leaf] => map.shift_remove(*leaf),
        [head, rest @ ..] => remove_at(map.get_mut(*head)?.as_object_mut()?, rest),
    }
}
