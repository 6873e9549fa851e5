//! Shared test utilities for dotconf integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory rooted in a temporary base directory.
//!
//! Invariants / Assumptions:
//! - Host `DOTCONF_*` variables never leak into a test run.
//! - `RUST_LOG` is cleared so stderr only carries error messages.

use assert_cmd::Command;
use std::path::Path;

/// Returns a hermetic `dotconf` command with no file or base directory set.
pub fn dotconf_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dotconf");

    cmd.env_remove("DOTCONF_FILE")
        .env_remove("DOTCONF_BASE_PATH")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic `dotconf` command whose symbolic filenames resolve
/// under `base_dir`.
pub fn dotconf_cmd_in(base_dir: &Path) -> Command {
    let mut cmd = dotconf_cmd();
    cmd.env("DOTCONF_BASE_PATH", base_dir);
    cmd
}

/// Sample config with the generated-by trailer.
#[allow(dead_code)]
pub const PEOPLE: &str = r#"{
  "url": "http://x.com",
  "gender": "male",
  "name": {
    "first": "Andrew",
    "last": "Suzuki"
  }
}
/* Config file generated by dotconf at 2026-10-19T08:30:00Z */
"#;
