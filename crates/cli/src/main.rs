//! dotconf - command-line front end for nested, dot-addressable config files.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Run one store operation per invocation and print the result.
//!
//! Does NOT handle:
//! - Path addressing or file format details (see `crates/config`).
//!
//! Invariants:
//! - Results go to stdout; logs and error messages go to stderr.
//! - The process exit code follows `error::ExitCode`.

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
