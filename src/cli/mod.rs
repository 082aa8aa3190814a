//! Command-line interface for launchkit.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations and dispatching

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, OpenArgs, RunArgs, WindowArg};
pub use commands::{Command, CommandDispatcher, CommandResult};
