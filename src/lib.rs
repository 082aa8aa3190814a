//! Launchkit - external process launching and console output capture.
//!
//! Launchkit launches other programs (GUI tools, documents, URLs, or console
//! programs) with correct privilege/elevation semantics, and for console
//! programs synchronously captures their interleaved stdout/stderr byte
//! stream, reassembling it into discrete text lines in real time regardless
//! of how the OS fragments pipe reads.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`console`] - Console execution, pipe capture, and line reassembly
//! - [`encoding`] - Output text encodings and the cached console default
//! - [`error`] - Error types and result aliases
//! - [`launch`] - Shell-style launching with elevation semantics
//!
//! # Example
//!
//! ```no_run
//! use launchkit::console;
//!
//! // Stream a program's output lines as they arrive.
//! let exit_code = console::run_streaming(
//!     "cargo",
//!     &["--version".to_string()],
//!     None,
//!     None,
//!     |line| println!("> {line}"),
//! )?;
//! assert_eq!(exit_code, 0);
//! # Ok::<(), launchkit::LaunchkitError>(())
//! ```

pub mod cli;
pub mod console;
pub mod encoding;
pub mod error;
pub mod launch;

pub use error::{LaunchkitError, Result};
