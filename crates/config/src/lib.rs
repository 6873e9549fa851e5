//! Nested, dot-addressable configuration store.
//!
//! This crate provides a config tree addressed with dot-paths
//! (`name.first`), a deterministic text format for persisting it, and a
//! store that binds the two to a file on disk.

pub mod codec;
pub mod constants;
mod env;
mod error;
pub mod filename;
mod fs;
mod store;
pub mod tree;
mod value;

pub use codec::ParseError;
pub use env::{BasePathSource, EnvBasePath, default_base_path, env_var_or_none};
pub use error::{IoAction, Result, StoreError};
pub use fs::{Filesystem, LocalFilesystem};
pub use store::{ConfigStore, StoreOptions};
pub use tree::ConfigTree;

pub use serde_json::{Map, Value};
