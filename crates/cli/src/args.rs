//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not open or save config files (see `commands` module).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dotconf")]
#[command(about = "dotconf - Read and edit nested config files with dot-paths", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  dotconf --file profile.andrew get name.first\n  dotconf --file profile.andrew set name.last '\"Brown\"'\n  dotconf --file ./settings set window.width 1280\n  dotconf --file ./settings only url gender\n  dotconf --file ./settings has theme\n"
)]
pub struct Cli {
    /// Config file: a path without extension (`./dir/name`) or a dot-path
    /// under the base directory (`profile.andrew`).
    #[arg(short, long, global = true, env = "DOTCONF_FILE", value_name = "FILE")]
    pub file: Option<String>,

    /// Base directory for dot-path filenames (defaults to the platform config directory)
    #[arg(long, global = true, env = "DOTCONF_BASE_PATH", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Save through a temporary file that is renamed over the target
    #[arg(long, global = true)]
    pub atomic: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the value stored at a dot-path
    Get {
        /// Dot-path to read (e.g., name.first)
        path: String,

        /// Value printed when nothing is stored at the path (JSON, or a plain string)
        #[arg(long, value_name = "JSON")]
        default: Option<String>,
    },

    /// Print the subset of the given dot-paths that hold values
    Only {
        /// Dot-paths to project
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Store a value at a dot-path and save the file
    Set {
        /// Dot-path to write
        path: String,

        /// Value as JSON; anything that is not valid JSON is stored as a string
        value: String,

        /// Only store the value when nothing is stored at the path yet
        #[arg(long)]
        if_absent: bool,
    },

    /// Remove the value at a dot-path and save the file
    Forget {
        /// Dot-path to remove
        path: String,
    },

    /// Check whether a value is stored at a dot-path (exit code 4 when absent)
    Has {
        /// Dot-path to check
        path: String,
    },

    /// Print the whole config tree
    Show,

    /// Remove every value and save the file
    Reset,

    /// Print the resolved config file path (without extension)
    Path,
}
