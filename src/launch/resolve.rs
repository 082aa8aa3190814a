//! Target resolution.
//!
//! Turns a user-supplied target reference into something launchable. The
//! [`PathResolver`] trait is the seam; the default [`SystemResolver`]
//! expands environment references, classifies URLs, resolves paths, and
//! falls back to a PATH search for bare program names.

use std::path::{Path, PathBuf};

use crate::error::{LaunchkitError, Result};

/// What a target reference resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A program that can be spawned directly.
    Executable(PathBuf),

    /// A file or directory to open through the platform shell, the way a
    /// double-click would.
    Document(PathBuf),

    /// A URL to hand to the platform shell.
    Url(String),
}

impl ResolvedTarget {
    /// The directory a launch should derive its working directory from,
    /// when the request asks for target-relative.
    pub fn parent_dir(&self) -> Option<PathBuf> {
        match self {
            ResolvedTarget::Executable(p) | ResolvedTarget::Document(p) => {
                p.parent().map(Path::to_path_buf)
            }
            ResolvedTarget::Url(_) => None,
        }
    }
}

/// Resolves target references to launchable entities.
pub trait PathResolver {
    fn resolve(&self, target: &str) -> Result<ResolvedTarget>;
}

/// Default resolver backed by the filesystem and PATH.
#[derive(Debug, Default)]
pub struct SystemResolver;

impl PathResolver for SystemResolver {
    fn resolve(&self, target: &str) -> Result<ResolvedTarget> {
        let expanded = expand_env(target);
        let expanded = expanded.trim();
        if expanded.is_empty() {
            return Err(LaunchkitError::Resolution {
                target: target.to_string(),
            });
        }

        if is_url(expanded) {
            return Ok(ResolvedTarget::Url(expanded.to_string()));
        }

        let path = Path::new(expanded);
        if path.is_absolute() || expanded.contains(std::path::MAIN_SEPARATOR) {
            if path.is_file() {
                return Ok(if is_executable(path) {
                    ResolvedTarget::Executable(path.to_path_buf())
                } else {
                    ResolvedTarget::Document(path.to_path_buf())
                });
            }
            if path.is_dir() {
                return Ok(ResolvedTarget::Document(path.to_path_buf()));
            }
            return Err(LaunchkitError::Resolution {
                target: target.to_string(),
            });
        }

        // Bare name: search PATH.
        match which::which(expanded) {
            Ok(found) => Ok(ResolvedTarget::Executable(found)),
            Err(_) => Err(LaunchkitError::Resolution {
                target: target.to_string(),
            }),
        }
    }
}

/// Expand `$VAR` and `${VAR}` references from the process environment.
/// Unknown variables expand to nothing, matching shell behavior.
pub fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }
        let mut name = String::new();
        while let Some(&n) = chars.peek() {
            if n == '_' || n.is_ascii_alphanumeric() {
                name.push(n);
                chars.next();
            } else {
                break;
            }
        }
        if braced {
            if chars.peek() == Some(&'}') {
                chars.next();
            } else {
                // Unterminated brace: keep the literal text.
                out.push_str("${");
                out.push_str(&name);
                continue;
            }
        }
        if name.is_empty() {
            out.push('$');
            continue;
        }
        if let Ok(value) = std::env::var(&name) {
            out.push_str(&value);
        }
    }
    out
}

fn is_url(target: &str) -> bool {
    match target.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && !rest.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
        }
        None => false,
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref(),
        Some("exe" | "bat" | "cmd" | "com")
    )
}

#[cfg(not(any(unix, windows)))]
fn is_executable(_path: &Path) -> bool {
    false
}
