//! Terminal shell over the booking ledger.

pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
mod shell;

pub use self::core::{CliMode, CommandError, CommandResult, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
