//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, returning a [`CommandResult`] with the exit
    /// code to report.
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Create a result carrying a child's exit code.
    pub fn with_exit_code(exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    quiet: bool,
}

impl CommandDispatcher {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. With no subcommand, prints usage guidance.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Open(args)) => {
                let cmd = super::open::OpenCommand::new(args.clone(), self.quiet);
                cmd.execute()
            }
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(args.clone(), self.quiet);
                cmd.execute()
            }
            None => {
                eprintln!("No command given. Try 'launchkit open <target>' or 'launchkit run <program>'.");
                Ok(CommandResult::failure(2))
            }
        }
    }
}
