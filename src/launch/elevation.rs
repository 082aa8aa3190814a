//! Elevation decision logic and the privilege-drop broker.
//!
//! All privileged-vs-direct branching funnels through one decision
//! function returning a tagged [`ElevationPlan`], so every flag combination
//! is handled in one place and checked before any OS call.

use std::path::Path;
#[cfg(unix)]
use std::process::{Command, Stdio};

use crate::error::{LaunchkitError, Result};
use crate::launch::request::LaunchFlags;

/// The platform verb that requests an elevated launch.
pub const ELEVATION_VERB: &str = "runas";

/// How a launch should acquire (or shed) privilege.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElevationPlan {
    /// Launch directly. `elevate` means the platform elevation facility is
    /// engaged; `verb` is the shell verb carried through to the launch.
    Direct {
        elevate: bool,
        verb: Option<String>,
    },

    /// Caller is elevated but the target should not be: relaunch at
    /// standard-user privilege through the broker, falling back to a direct
    /// elevated launch (with a warning) if the broker fails.
    Brokered,
}

/// Check if the current process runs elevated (root/admin).
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        std::env::var("ADMIN").is_ok()
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

/// Decide the elevation strategy for a request.
///
/// Evaluated before any OS call. An explicit verb other than
/// [`ELEVATION_VERB`] combined with the admin flag is a conflict and is
/// rejected, whether or not the caller already runs elevated.
pub fn decide_elevation(
    flags: &LaunchFlags,
    verb: Option<&str>,
    caller_elevated: bool,
) -> Result<ElevationPlan> {
    if flags.admin {
        if let Some(v) = verb {
            if v != ELEVATION_VERB {
                return Err(LaunchkitError::Argument {
                    message: format!("verb '{v}' conflicts with the admin flag"),
                });
            }
        }
        // Already-elevated callers make the flag redundant but allowed.
        return Ok(ElevationPlan::Direct {
            elevate: !caller_elevated,
            verb: Some(ELEVATION_VERB.to_string()),
        });
    }

    if caller_elevated && !flags.inherit_admin {
        return Ok(ElevationPlan::Brokered);
    }

    let elevate = verb == Some(ELEVATION_VERB) && !caller_elevated;
    Ok(ElevationPlan::Direct {
        elevate,
        verb: verb.map(str::to_string),
    })
}

/// Relaunch a target at standard-user privilege from an elevated caller.
///
/// Returns the relayed process id on success. Failure never disappears
/// silently: the caller warns and falls back to the direct elevated launch.
pub fn broker_deprivileged_launch(
    exe: &Path,
    args: &[String],
    cwd: Option<&Path>,
) -> Result<u32> {
    #[cfg(unix)]
    {
        // The invoking user is recorded by sudo; without it there is no
        // identity to drop back to.
        let user = std::env::var("SUDO_USER").map_err(|_| LaunchkitError::Launch {
            target: exe.display().to_string(),
            code: 0,
            message: "no invoking user recorded (SUDO_USER unset)".to_string(),
        })?;

        let relay = ["runuser", "sudo"]
            .iter()
            .find_map(|bin| which::which(bin).ok())
            .ok_or_else(|| LaunchkitError::Launch {
                target: exe.display().to_string(),
                code: 0,
                message: "no privilege relay binary found".to_string(),
            })?;

        let mut cmd = Command::new(&relay);
        cmd.arg("-u")
            .arg(&user)
            .arg("--")
            .arg(exe)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        tracing::debug!(relay = %relay.display(), %user, exe = %exe.display(), "brokering privilege drop");
        let child = cmd
            .spawn()
            .map_err(|e| LaunchkitError::launch(exe.display().to_string(), &e))?;
        Ok(child.id())
    }

    #[cfg(not(unix))]
    {
        let _ = (args, cwd);
        Err(LaunchkitError::Launch {
            target: exe.display().to_string(),
            code: 0,
            message: "privilege-drop relay is not available on this platform".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(admin: bool, inherit_admin: bool) -> LaunchFlags {
        LaunchFlags {
            admin,
            inherit_admin,
            ..LaunchFlags::default()
        }
    }

    #[test]
    fn plain_launch_is_direct_and_unelevated() {
        let plan = decide_elevation(&flags(false, false), None, false).unwrap();
        assert_eq!(
            plan,
            ElevationPlan::Direct {
                elevate: false,
                verb: None
            }
        );
    }

    #[test]
    fn admin_from_unelevated_caller_uses_elevation_verb() {
        let plan = decide_elevation(&flags(true, false), None, false).unwrap();
        assert_eq!(
            plan,
            ElevationPlan::Direct {
                elevate: true,
                verb: Some(ELEVATION_VERB.to_string())
            }
        );
    }

    #[test]
    fn admin_with_runas_verb_is_allowed() {
        let plan = decide_elevation(&flags(true, false), Some("runas"), false).unwrap();
        assert!(matches!(plan, ElevationPlan::Direct { elevate: true, .. }));
    }

    #[test]
    fn admin_with_conflicting_verb_is_rejected() {
        let err = decide_elevation(&flags(true, false), Some("print"), false).unwrap_err();
        assert!(matches!(err, LaunchkitError::Argument { .. }));
    }

    #[test]
    fn admin_with_conflicting_verb_is_rejected_even_when_elevated() {
        let err = decide_elevation(&flags(true, false), Some("edit"), true).unwrap_err();
        assert!(matches!(err, LaunchkitError::Argument { .. }));
    }

    #[test]
    fn redundant_admin_from_elevated_caller_is_allowed() {
        let plan = decide_elevation(&flags(true, false), None, true).unwrap();
        assert_eq!(
            plan,
            ElevationPlan::Direct {
                elevate: false,
                verb: Some(ELEVATION_VERB.to_string())
            }
        );
    }

    #[test]
    fn elevated_caller_without_admin_flags_brokers_a_drop() {
        let plan = decide_elevation(&flags(false, false), None, true).unwrap();
        assert_eq!(plan, ElevationPlan::Brokered);
    }

    #[test]
    fn inherit_admin_keeps_elevation() {
        let plan = decide_elevation(&flags(false, true), None, true).unwrap();
        assert_eq!(
            plan,
            ElevationPlan::Direct {
                elevate: false,
                verb: None
            }
        );
    }

    #[test]
    fn runas_verb_without_admin_flag_elevates() {
        let plan = decide_elevation(&flags(false, false), Some("runas"), false).unwrap();
        assert!(matches!(plan, ElevationPlan::Direct { elevate: true, .. }));
    }

    #[test]
    fn ordinary_verb_is_carried_through() {
        let plan = decide_elevation(&flags(false, false), Some("edit"), false).unwrap();
        assert_eq!(
            plan,
            ElevationPlan::Direct {
                elevate: false,
                verb: Some("edit".to_string())
            }
        );
    }

    #[test]
    fn is_elevated_does_not_panic() {
        let _ = is_elevated();
    }
}
