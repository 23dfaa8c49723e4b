//! Interactive and script-mode shell over the liability tracker.

pub mod commands;
pub mod context;
pub mod format;
pub mod help;
pub mod io;
pub mod output;
pub mod shell;
pub mod table;

pub use context::{CliMode, CommandError, CommandResult, ShellContext};
pub use shell::run_cli;
