//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::launch::WindowState;

/// Launchkit - launch programs and capture console output.
#[derive(Debug, Parser)]
#[command(name = "launchkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open a program, document, or URL through the platform shell
    Open(OpenArgs),

    /// Run a console program and capture its output lines
    Run(RunArgs),
}

/// Arguments for the `open` command.
#[derive(Debug, Clone, clap::Args)]
pub struct OpenArgs {
    /// Program path, bare program name, document, or URL
    pub target: String,

    /// Command-line arguments, as one string
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub args: String,

    /// Block until the process exits and report its exit code
    #[arg(short, long)]
    pub wait: bool,

    /// Launch elevated
    #[arg(long)]
    pub admin: bool,

    /// Keep the caller's elevation as-is (never broker a privilege drop)
    #[arg(long)]
    pub inherit_admin: bool,

    /// Shell verb (e.g. "runas")
    #[arg(long)]
    pub verb: Option<String>,

    /// Working directory for the new process
    #[arg(long, conflicts_with = "target_dir")]
    pub cwd: Option<PathBuf>,

    /// Derive the working directory from the resolved target
    #[arg(long)]
    pub target_dir: bool,

    /// Initial window state hint
    #[arg(long, value_enum, default_value_t = WindowArg::Normal)]
    pub window: WindowArg,

    /// Mark the target as frequently used
    #[arg(long)]
    pub most_used: bool,

    /// Treat launch failure as a warning instead of an error
    #[arg(long)]
    pub lenient: bool,
}

/// CLI spelling of the window state hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowArg {
    Normal,
    Hidden,
    Minimized,
    Maximized,
}

impl From<WindowArg> for WindowState {
    fn from(value: WindowArg) -> Self {
        match value {
            WindowArg::Normal => WindowState::Normal,
            WindowArg::Hidden => WindowState::Hidden,
            WindowArg::Minimized => WindowState::Minimized,
            WindowArg::Maximized => WindowState::Maximized,
        }
    }
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Console program to run
    pub program: String,

    /// Program arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Working directory for the program
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Output encoding (utf-8, latin1); default derives from the locale
    #[arg(long)]
    pub encoding: Option<String>,

    /// Collect all output and print it once the program exits,
    /// instead of streaming line by line
    #[arg(long)]
    pub collect: bool,
}
