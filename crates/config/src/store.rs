//! Config store lifecycle: load, mutate, save.
//!
//! Responsibilities:
//! - Own one config tree and the canonical filename it persists to.
//! - Load an existing config file, replacing the tree wholesale.
//! - Save the tree, creating parent directories first.
//! - Expose the tree's dot-path operations with method chaining.
//!
//! Does NOT handle:
//! - Dot-path semantics (see `tree.rs`).
//! - File text format (see `codec.rs`).
//! - Filename rules (see `filename.rs`).
//!
//! Invariants:
//! - A failed `load` leaves the tree untouched but keeps the new filename.
//! - A missing file on `load` is not an error; the tree is kept as is.
//! - `save` never mutates the store and fails with `UnsetFilename` before any
//!   filesystem call if no filename was established.
//! - `reset` clears the tree but not the filename.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::codec;
use crate::constants::TEMP_FILE_SUFFIX;
use crate::env::{BasePathSource, EnvBasePath};
use crate::error::{IoAction, Result, StoreError};
use crate::filename;
use crate::fs::{Filesystem, LocalFilesystem};
use crate::tree::ConfigTree;

/// Construction options for a [`ConfigStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Base directory for symbolic filenames. When `None`, the store asks its
    /// [`BasePathSource`] once at construction.
    pub base_dir: Option<PathBuf>,
    /// Write to a sibling temporary file and rename it over the target.
    pub atomic_save: bool,
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base directory for symbolic filenames.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Enables or disables temp-file-and-rename saves.
    pub fn with_atomic_save(mut self, atomic_save: bool) -> Self {
        self.atomic_save = atomic_save;
        self
    }
}

/// A dot-addressable config tree bound to a config file.
///
/// ```rust,ignore
/// let mut store = ConfigStore::new();
/// store.load("profile.andrew")?;
/// store.set("name.last", "Brown")?.forget("legacy");
/// store.save()?;
/// ```
#[derive(Debug)]
pub struct ConfigStore<F = LocalFilesystem> {
    filesystem: F,
    base_dir: Option<PathBuf>,
    atomic_save: bool,
    /// Canonical path, extension included.
    filename: Option<PathBuf>,
    tree: ConfigTree,
}

impl ConfigStore {
    /// Creates a store on the local filesystem, using `DOTCONF_BASE_PATH` or
    /// the platform config directory as base directory.
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Creates a store on the local filesystem with explicit options.
    pub fn with_options(options: StoreOptions) -> Self {
        ConfigStore::from_parts(LocalFilesystem, options, &EnvBasePath)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filesystem> ConfigStore<F> {
    /// Creates a store from its collaborators.
    ///
    /// `base_source` is only consulted when `options.base_dir` is `None`.
    pub fn from_parts(filesystem: F, options: StoreOptions, base_source: &dyn BasePathSource) -> Self {
        let base_dir = options
            .base_dir
            .or_else(|| base_source.configured_base_path());

        Self {
            filesystem,
            base_dir,
            atomic_save: options.atomic_save,
            filename: None,
            tree: ConfigTree::new(),
        }
    }

    /// Base directory used for symbolic filenames.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Loads a config file, replacing the current tree if the file exists.
    ///
    /// # Errors
    /// - `InvalidArgument` if `filename` cannot be resolved.
    /// - `Io` if the file exists but cannot be read.
    /// - `LoadFailure` if the file does not contain a config mapping.
    pub fn load(&mut self, filename: &str) -> Result<&mut Self> {
        let path = self.establish_filename(filename)?;

        if !self.filesystem.exists(&path) {
            tracing::debug!(
                path = %path.display(),
                "Config file not found, keeping current values"
            );
            return Ok(self);
        }

        let text = self
            .filesystem
            .read_to_string(&path)
            .map_err(|e| StoreError::io(IoAction::Read, path.clone(), e))?;
        let root = codec::parse(&text).map_err(|source| StoreError::LoadFailure {
            path: path.clone(),
            source,
        })?;
        self.tree = ConfigTree::from(root);

        tracing::debug!(
            path = %path.display(),
            keys = self.tree.len(),
            "Config loaded"
        );
        Ok(self)
    }

    /// Points the store at a new file without touching the loaded values.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `filename` cannot be resolved; the
    /// previous filename is kept in that case.
    pub fn set_filename(&mut self, filename: &str) -> Result<&mut Self> {
        self.establish_filename(filename)?;
        Ok(self)
    }

    /// Current filename without the config extension.
    pub fn filename(&self) -> Option<PathBuf> {
        self.filename.as_deref().map(filename::strip_extension)
    }

    /// Current canonical file path, extension included.
    pub fn file_path(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Writes the tree to the current file.
    ///
    /// # Errors
    /// - `UnsetFilename` if neither `load` nor `set_filename` succeeded yet.
    /// - `InvalidArgument` if the tree cannot be rendered.
    /// - `Io` if the parent directory cannot be created or the file cannot
    ///   be written.
    pub fn save(&self) -> Result<&Self> {
        let path = self.filename.as_deref().ok_or(StoreError::UnsetFilename)?;
        let contents = codec::render(self.tree.all()).map_err(|e| {
            StoreError::invalid(format!("config tree cannot be rendered: {e}"))
        })?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty())
            && !self.filesystem.is_dir(dir)
        {
            self.filesystem
                .create_dir_all(dir)
                .map_err(|e| StoreError::io(IoAction::CreateDir, dir, e))?;
        }

        if self.atomic_save {
            let draft = draft_path(path);
            self.filesystem
                .write(&draft, &contents)
                .map_err(|e| StoreError::io(IoAction::Write, draft.clone(), e))?;
            self.filesystem
                .rename(&draft, path)
                .map_err(|e| StoreError::io(IoAction::Rename, path, e))?;
        } else {
            self.filesystem
                .write(path, &contents)
                .map_err(|e| StoreError::io(IoAction::Write, path, e))?;
        }

        tracing::debug!(
            path = %path.display(),
            atomic = self.atomic_save,
            "Config saved"
        );
        Ok(self)
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ConfigTree {
        &mut self.tree
    }

    /// Replaces the whole tree, e.g. with one built in memory.
    pub fn replace_tree(&mut self, tree: ConfigTree) -> &mut Self {
        self.tree = tree;
        self
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.tree.get(path)
    }

    pub fn get_or<'a>(&'a self, path: &str, fallback: &'a Value) -> &'a Value {
        self.tree.get_or(path, fallback)
    }

    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        self.tree.get_as(path)
    }

    pub fn only<I, K>(&self, paths: I) -> Map<String, Value>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.tree.only(paths)
    }

    pub fn all(&self) -> &Map<String, Value> {
        self.tree.all()
    }

    pub fn has(&self, path: &str) -> bool {
        self.tree.has(path)
    }

    pub fn set<V: Serialize>(&mut self, path: &str, value: V) -> Result<&mut Self> {
        self.tree.set(path, value)?;
        Ok(self)
    }

    pub fn set_if<V: Serialize>(&mut self, path: &str, value: V) -> Result<&mut Self> {
        self.tree.set_if(path, value)?;
        Ok(self)
    }

    pub fn set_with<V: Serialize>(
        &mut self,
        path: &str,
        value: V,
        overwrite: bool,
    ) -> Result<&mut Self> {
        self.tree.set_with(path, value, overwrite)?;
        Ok(self)
    }

    pub fn set_many<I, K, V>(&mut self, entries: I, overwrite: bool) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        self.tree.set_many(entries, overwrite)?;
        Ok(self)
    }

    pub fn forget(&mut self, path: &str) -> &mut Self {
        self.tree.forget(path);
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        self.tree.reset();
        self
    }

    fn establish_filename(&mut self, input: &str) -> Result<PathBuf> {
        let canonical = filename::resolve(input, self.base_dir.as_deref())?;
        self.filename = Some(canonical.clone());
        Ok(canonical)
    }
}

fn draft_path(path: &Path) -> PathBuf {
    let mut raw = OsString::from(path);
    raw.push(".");
    raw.push(TEMP_FILE_SUFFIX);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ParseError;
    use crate::env::MockBasePathSource;
    use crate::fs::MockFilesystem;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    const BASE: &str = "/path/to/app/config";

    fn sample_text() -> String {
        let tree: ConfigTree = serde_json::from_value(json!({
            "url": "http://andrewsuzuki.com",
            "gender": "male",
            "name": {"first": "Andrew", "last": "Suzuki"}
        }))
        .unwrap();
        codec::render(tree.all()).unwrap()
    }

    fn store_with(filesystem: MockFilesystem) -> ConfigStore<MockFilesystem> {
        let mut base_source = MockBasePathSource::new();
        base_source
            .expect_configured_base_path()
            .returning(|| Some(PathBuf::from(BASE)));
        ConfigStore::from_parts(filesystem, StoreOptions::default(), &base_source)
    }

    fn loaded_store() -> ConfigStore<MockFilesystem> {
        let text = sample_text();
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_exists().return_const(true);
        filesystem
            .expect_read_to_string()
            .returning(move |_| Ok(text.clone()));

        let mut store = store_with(filesystem);
        store.load("/some_dir/some_file").unwrap();
        store
    }

    #[test]
    fn test_loads_existing_file() {
        let store = loaded_store();

        assert_eq!(store.get("url"), Some(&json!("http://andrewsuzuki.com")));
        assert_eq!(store.get("name.first"), Some(&json!("Andrew")));
        assert_eq!(store.filename(), Some(PathBuf::from("/some_dir/some_file")));
        assert_eq!(
            store.file_path(),
            Some(Path::new("/some_dir/some_file.jsonc"))
        );
    }

    #[test]
    fn test_loads_non_existing_file_as_empty() {
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_exists().times(1).return_const(false);
        filesystem.expect_read_to_string().times(0);

        let mut store = store_with(filesystem);
        store.load("/some_dir/some_file").unwrap();

        assert!(store.all().is_empty());
        assert_eq!(store.filename(), Some(PathBuf::from("/some_dir/some_file")));
    }

    #[test]
    fn test_load_rejects_non_mapping_and_keeps_tree() {
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_exists().return_const(true);
        filesystem
            .expect_read_to_string()
            .returning(|_| Ok("null\n".to_string()));

        let mut store = store_with(filesystem);
        store.set("kept", true).unwrap();

        let err = store.load("/some_dir/other_file").unwrap_err();
        assert!(matches!(
            err,
            StoreError::LoadFailure {
                source: ParseError::NotAMapping { .. },
                ..
            }
        ));
        assert_eq!(store.get("kept"), Some(&json!(true)));
        assert_eq!(store.filename(), Some(PathBuf::from("/some_dir/other_file")));
    }

    #[test]
    fn test_load_surfaces_read_errors() {
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_exists().return_const(true);
        filesystem
            .expect_read_to_string()
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

        let mut store = store_with(filesystem);
        let err = store.load("settings").unwrap_err();

        assert!(matches!(
            err,
            StoreError::Io {
                action: IoAction::Read,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_filename_keeps_previous_filename() {
        let mut store = loaded_store();

        let err = store.set_filename("/some_dir/some_file.php").unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument { .. }));
        assert_eq!(store.filename(), Some(PathBuf::from("/some_dir/some_file")));
    }

    #[test]
    fn test_set_and_get_dot_filename() {
        let mut store = loaded_store();
        store.set_filename("profile.andrew").unwrap();

        assert_eq!(
            store.filename(),
            Some(PathBuf::from("/path/to/app/config/profile/andrew"))
        );
        assert_eq!(store.get("name.first"), Some(&json!("Andrew")));
    }

    #[test]
    fn test_base_path_source_consulted_once_when_no_base_dir() {
        let mut base_source = MockBasePathSource::new();
        base_source
            .expect_configured_base_path()
            .times(1)
            .returning(|| Some(PathBuf::from(BASE)));

        let store =
            ConfigStore::from_parts(MockFilesystem::new(), StoreOptions::default(), &base_source);
        assert_eq!(store.base_dir(), Some(Path::new(BASE)));
    }

    #[test]
    fn test_explicit_base_dir_skips_base_path_source() {
        let mut base_source = MockBasePathSource::new();
        base_source.expect_configured_base_path().times(0);

        let options = StoreOptions::new().with_base_dir("/srv/app");
        let mut store = ConfigStore::from_parts(MockFilesystem::new(), options, &base_source);
        store.set_filename("profile.andrew").unwrap();

        assert_eq!(store.filename(), Some(PathBuf::from("/srv/app/profile/andrew")));
    }

    #[test]
    fn test_symbolic_filename_without_base_dir_fails() {
        let mut base_source = MockBasePathSource::new();
        base_source.expect_configured_base_path().returning(|| None);

        let mut store =
            ConfigStore::from_parts(MockFilesystem::new(), StoreOptions::default(), &base_source);
        assert!(store.set_filename("profile.andrew").is_err());
        assert_eq!(store.filename(), None);
    }

    #[test]
    fn test_save_without_filename_fails_before_touching_disk() {
        let store = store_with(MockFilesystem::new());
        assert!(matches!(store.save(), Err(StoreError::UnsetFilename)));
    }

    #[test]
    fn test_save_creates_directory_and_writes_file() {
        let written = Arc::new(Mutex::new(String::new()));
        let captured = Arc::clone(&written);

        let mut filesystem = MockFilesystem::new();
        filesystem.expect_exists().return_const(false);
        filesystem.expect_is_dir().times(1).return_const(false);
        filesystem.expect_create_dir_all().times(1).returning(|dir| {
            assert_eq!(dir, Path::new("some_dir"));
            Ok(())
        });
        filesystem
            .expect_write()
            .times(1)
            .returning(move |path, contents| {
                assert_eq!(path, Path::new("some_dir/some_file.jsonc"));
                *captured.lock().unwrap() = contents.to_string();
                Ok(())
            });

        let mut store = store_with(filesystem);
        store.load("some_dir/some_file").unwrap();
        store.set("name.first", "Andrew").unwrap();
        store.save().unwrap();

        let contents = written.lock().unwrap().clone();
        assert!(contents.starts_with("{\n  \"name\""));
        assert!(contents.ends_with(" */\n"));
        assert_eq!(
            codec::parse(&contents).unwrap(),
            store.all().clone(),
            "saved text must load back to the same tree"
        );
    }

    #[test]
    fn test_save_skips_existing_directory() {
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_is_dir().return_const(true);
        filesystem.expect_create_dir_all().times(0);
        filesystem.expect_write().times(1).returning(|_, _| Ok(()));

        let mut store = store_with(filesystem);
        store.set_filename("/some_dir/some_file").unwrap();
        store.save().unwrap();
    }

    #[test]
    fn test_save_cant_make_directory() {
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_is_dir().return_const(false);
        filesystem
            .expect_create_dir_all()
            .returning(|_| Err(io::Error::other("Can't make directory for some reason")));
        filesystem.expect_write().times(0);

        let mut store = store_with(filesystem);
        store.set_filename("some_dir/some_file").unwrap();
        let err = store.save().unwrap_err();

        assert!(matches!(
            err,
            StoreError::Io {
                action: IoAction::CreateDir,
                ..
            }
        ));
        assert!(err.to_string().contains("Can't make directory for some reason"));
    }

    #[test]
    fn test_save_cant_put_file() {
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_is_dir().return_const(true);
        filesystem
            .expect_write()
            .returning(|_, _| Err(io::Error::other("Can't put file for some reason")));

        let mut store = store_with(filesystem);
        store.set_filename("some_dir/some_file").unwrap();
        let err = store.save().unwrap_err();

        assert!(matches!(
            err,
            StoreError::Io {
                action: IoAction::Write,
                ..
            }
        ));
        assert!(err.to_string().contains("Can't put file for some reason"));
    }

    #[test]
    fn test_atomic_save_writes_draft_then_renames() {
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_is_dir().return_const(true);
        filesystem.expect_write().times(1).returning(|path, _| {
            assert_eq!(path, Path::new("/some_dir/some_file.jsonc.tmp"));
            Ok(())
        });
        filesystem.expect_rename().times(1).returning(|from, to| {
            assert_eq!(from, Path::new("/some_dir/some_file.jsonc.tmp"));
            assert_eq!(to, Path::new("/some_dir/some_file.jsonc"));
            Ok(())
        });

        let options = StoreOptions::new().with_base_dir(BASE).with_atomic_save(true);
        let mut base_source = MockBasePathSource::new();
        base_source.expect_configured_base_path().times(0);
        let mut store = ConfigStore::from_parts(filesystem, options, &base_source);

        store.set_filename("/some_dir/some_file").unwrap();
        store.save().unwrap();
    }

    #[test]
    fn test_reset_keeps_filename() {
        let mut store = loaded_store();
        assert!(store.reset().all().is_empty());
        assert_eq!(store.filename(), Some(PathBuf::from("/some_dir/some_file")));
    }

    #[test]
    fn test_method_chaining() {
        let mut store = loaded_store();

        let result = store
            .set("url", "http://andrewsuzuki.com/actualUrl")
            .unwrap()
            .forget("name")
            .forget("gender")
            .all()
            .clone();

        assert_eq!(
            Value::Object(result),
            json!({"url": "http://andrewsuzuki.com/actualUrl"})
        );
    }

    #[test]
    fn test_set_many_through_store() {
        let mut store = loaded_store();
        store
            .set_many([("location", "Earth"), ("parents.dad", "John")], true)
            .unwrap()
            .set_if("name.first", "Bobby")
            .unwrap();

        assert_eq!(store.get("location"), Some(&json!("Earth")));
        assert_eq!(store.get("parents.dad"), Some(&json!("John")));
        assert_eq!(store.get("name.first"), Some(&json!("Andrew")));
    }
}
