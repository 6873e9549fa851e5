//! Command dispatch logic.
//!
//! Responsibilities:
//! - Open the config store named by the global options.
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Mapping errors to exit codes (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands::{self, StoreArgs, read, write};

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let store_args = StoreArgs {
        file: cli.file,
        base_dir: cli.base_dir,
        atomic: cli.atomic,
    };
    let mut store = commands::open_store(&store_args)?;

    match cli.command {
        Commands::Get { path, default } => read::get(&store, &path, default.as_deref()),
        Commands::Only { paths } => read::only(&store, &paths),
        Commands::Has { path } => read::has(&store, &path),
        Commands::Show => read::show(&store),
        Commands::Path => read::path(&store),
        Commands::Set {
            path,
            value,
            if_absent,
        } => write::set(&mut store, &path, &value, if_absent),
        Commands::Forget { path } => write::forget(&mut store, &path),
        Commands::Reset => write::reset(&mut store),
    }
}
