//! Error types for launchkit operations.
//!
//! This module defines [`LaunchkitError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `LaunchkitError` for launch failures that need distinct handling
//! - Use `anyhow::Error` (via `LaunchkitError::Other`) for unexpected errors
//! - Broken pipe during console capture is *not* an error: it is the normal
//!   end-of-stream signal once all write ends have closed

use thiserror::Error;

/// Core error type for launchkit operations.
#[derive(Debug, Error)]
pub enum LaunchkitError {
    /// Target reference could not be resolved to anything launchable.
    #[error("Cannot resolve '{target}' to a launchable program, document, or URL")]
    Resolution { target: String },

    /// The platform launch call failed. Carries the OS error code
    /// (0 when the platform did not report one).
    #[error("Failed to run '{target}' (OS error {code}): {message}")]
    Launch {
        target: String,
        code: i32,
        message: String,
    },

    /// Pipe or child creation for console capture failed. Distinct from
    /// normal end-of-stream on an established pipe.
    #[error("Console capture setup failed: {message}")]
    Pipe { message: String },

    /// Conflicting request fields detected before any OS call was made.
    #[error("Invalid launch request: {message}")]
    Argument { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LaunchkitError {
    /// Build a [`LaunchkitError::Launch`] from an IO error, capturing the
    /// raw OS code when the platform reported one.
    pub fn launch(target: impl Into<String>, err: &std::io::Error) -> Self {
        LaunchkitError::Launch {
            target: target.into(),
            code: err.raw_os_error().unwrap_or(0),
            message: err.to_string(),
        }
    }
}

/// Result type alias for launchkit operations.
pub type Result<T> = std::result::Result<T, LaunchkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_displays_target() {
        let err = LaunchkitError::Resolution {
            target: "no-such-tool".into(),
        };
        assert!(err.to_string().contains("no-such-tool"));
    }

    #[test]
    fn launch_error_displays_target_and_code() {
        let err = LaunchkitError::Launch {
            target: "frobnicate.exe".into(),
            code: 2,
            message: "not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("frobnicate.exe"));
        assert!(msg.contains("2"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn launch_error_from_io_captures_os_code() {
        let io_err = std::io::Error::from_raw_os_error(2);
        let err = LaunchkitError::launch("missing", &io_err);
        match err {
            LaunchkitError::Launch { code, .. } => assert_eq!(code, 2),
            other => panic!("expected Launch, got {other:?}"),
        }
    }

    #[test]
    fn launch_error_without_os_code_uses_zero() {
        let io_err = std::io::Error::other("synthetic");
        let err = LaunchkitError::launch("t", &io_err);
        match err {
            LaunchkitError::Launch { code, .. } => assert_eq!(code, 0),
            other => panic!("expected Launch, got {other:?}"),
        }
    }

    #[test]
    fn pipe_error_displays_message() {
        let err = LaunchkitError::Pipe {
            message: "pipe creation denied".into(),
        };
        assert!(err.to_string().contains("pipe creation denied"));
    }

    #[test]
    fn argument_error_displays_message() {
        let err = LaunchkitError::Argument {
            message: "verb 'print' conflicts with admin".into(),
        };
        assert!(err.to_string().contains("verb 'print'"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LaunchkitError = io_err.into();
        assert!(matches!(err, LaunchkitError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(LaunchkitError::Resolution { target: "x".into() })
        }
        assert!(returns_error().is_err());
    }
}
