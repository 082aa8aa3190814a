//! Launching programs, documents, and URLs with elevation semantics.
//!
//! - [`request`] - Launch request/result types and the platform-flag mask
//! - [`resolve`] - Target resolution (paths, PATH search, URLs)
//! - [`elevation`] - Elevation decision and the privilege-drop broker
//! - [`shell`] - The launcher itself

pub mod elevation;
pub mod request;
pub mod resolve;
pub mod shell;

pub use elevation::{decide_elevation, is_elevated, ElevationPlan, ELEVATION_VERB};
pub use request::{
    effective_flags, LaunchFlags, LaunchRequest, LaunchResult, WindowState, WorkingDir,
};
pub use resolve::{PathResolver, ResolvedTarget, SystemResolver};
pub use shell::ShellLauncher;
