//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! dispatched via [`CommandDispatcher`].

pub mod dispatcher;
pub mod open;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
