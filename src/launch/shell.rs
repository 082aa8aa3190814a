//! Shell-style launching of programs, documents, and URLs.
//!
//! [`ShellLauncher`] drives the whole launch path: resolve the target,
//! decide the elevation strategy, build and spawn the platform command,
//! optionally wait for exit, and assemble a [`LaunchResult`]. Failures
//! surface immediately; no retries happen here.

use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use crate::console::runner::EXIT_CODE_UNKNOWN;
use crate::error::{LaunchkitError, Result};
use crate::launch::elevation::{
    broker_deprivileged_launch, decide_elevation, is_elevated, ElevationPlan,
};
use crate::launch::request::{
    effective_flags, flags, LaunchRequest, LaunchResult, WindowState, WorkingDir,
};
use crate::launch::resolve::{PathResolver, ResolvedTarget, SystemResolver};

/// Launches targets the way a user double-click would, with elevation
/// semantics applied first.
pub struct ShellLauncher<R = SystemResolver> {
    resolver: R,
}

impl ShellLauncher<SystemResolver> {
    pub fn new() -> Self {
        Self {
            resolver: SystemResolver,
        }
    }
}

impl Default for ShellLauncher<SystemResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PathResolver> ShellLauncher<R> {
    /// Build a launcher over a custom resolver.
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    /// Launch a target.
    ///
    /// Fails with [`LaunchkitError::Resolution`] when the target is not
    /// launchable, [`LaunchkitError::Argument`] for conflicting verb/admin
    /// combinations (checked before any OS call), and
    /// [`LaunchkitError::Launch`] carrying the OS error code when the
    /// platform call itself fails.
    pub fn launch(&self, request: &LaunchRequest) -> Result<LaunchResult> {
        let resolved = self.resolver.resolve(&request.target)?;
        let plan = decide_elevation(&request.flags, request.verb.as_deref(), is_elevated())?;
        let mut mask = effective_flags(request);
        if request.window == WindowState::Hidden {
            mask |= flags::NO_CONSOLE;
        }
        let cwd = working_dir(&request.cwd, &resolved);
        let args = split_args(&request.args)?;

        tracing::debug!(target = %request.target, ?resolved, ?plan, mask, "launching");

        let elevate = match plan {
            ElevationPlan::Brokered => {
                match try_brokered(&resolved, &args, cwd.as_deref()) {
                    Ok(pid) => {
                        tracing::debug!(pid, "privilege-dropped relaunch brokered");
                        return Ok(LaunchResult {
                            exit_code: None,
                            pid,
                            child: None,
                        });
                    }
                    Err(e) => {
                        // Never swallowed: warn, then fall back to the
                        // direct elevated launch.
                        tracing::warn!(
                            target = %request.target,
                            error = %e,
                            "privilege-drop broker failed, launching elevated"
                        );
                        false
                    }
                }
            }
            ElevationPlan::Direct { elevate, .. } => elevate,
        };

        let mut command = build_command(&resolved, &args, elevate, &request.target)?;
        if let Some(dir) = &cwd {
            command.current_dir(dir);
        }
        apply_platform_flags(&mut command, mask);

        let mut child = command
            .spawn()
            .map_err(|e| LaunchkitError::launch(&request.target, &e))?;
        let pid = child.id();

        // Best-effort: let the new process take the foreground. Never fatal.
        allow_foreground_activation(pid);

        let exit_code = if request.flags.wait_for_exit {
            Some(wait_for_exit(&mut child, &request.target))
        } else {
            None
        };

        // Any handle the caller did not ask for is released here, exactly
        // once, by dropping it.
        let child = request.flags.need_process_handle.then_some(child);

        Ok(LaunchResult {
            exit_code,
            pid,
            child,
        })
    }

    /// Non-throwing variant: an ordinary launch failure becomes a logged
    /// warning and `None`. Every other error kind still propagates.
    pub fn launch_quiet(&self, request: &LaunchRequest) -> Result<Option<LaunchResult>> {
        match self.launch(request) {
            Ok(result) => Ok(Some(result)),
            Err(err @ LaunchkitError::Launch { .. }) => {
                tracing::warn!(target = %request.target, "{err}");
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }
}

/// Resolve the tri-state working directory for a launch.
pub fn working_dir(cwd: &WorkingDir, resolved: &ResolvedTarget) -> Option<PathBuf> {
    match cwd {
        WorkingDir::Inherit => None,
        WorkingDir::FromTarget => resolved.parent_dir(),
        WorkingDir::Explicit(dir) => Some(dir.clone()),
    }
}

fn split_args(args: &str) -> Result<Vec<String>> {
    shell_words::split(args).map_err(|e| LaunchkitError::Argument {
        message: format!("malformed argument string: {e}"),
    })
}

fn try_brokered(
    resolved: &ResolvedTarget,
    args: &[String],
    cwd: Option<&Path>,
) -> Result<u32> {
    match resolved {
        ResolvedTarget::Executable(path) => broker_deprivileged_launch(path, args, cwd),
        // Documents and URLs have no process of their own to deprivilege.
        ResolvedTarget::Document(path) => Err(LaunchkitError::Launch {
            target: path.display().to_string(),
            code: 0,
            message: "cannot broker a privilege drop for a document target".to_string(),
        }),
        ResolvedTarget::Url(url) => Err(LaunchkitError::Launch {
            target: url.clone(),
            code: 0,
            message: "cannot broker a privilege drop for a URL target".to_string(),
        }),
    }
}

/// Build the platform command for a resolved target.
fn build_command(
    resolved: &ResolvedTarget,
    args: &[String],
    elevate: bool,
    target: &str,
) -> Result<Command> {
    match resolved {
        ResolvedTarget::Executable(path) => {
            if elevate {
                elevated_command(path, args, target)
            } else {
                let mut cmd = Command::new(path);
                cmd.args(args);
                Ok(cmd)
            }
        }
        ResolvedTarget::Document(path) => Ok(opener_command(path.as_os_str())),
        ResolvedTarget::Url(url) => Ok(opener_command(url.as_ref())),
    }
}

#[cfg(unix)]
fn elevated_command(path: &Path, args: &[String], target: &str) -> Result<Command> {
    let facility = ["pkexec", "sudo"]
        .iter()
        .find_map(|bin| which::which(bin).ok())
        .ok_or_else(|| LaunchkitError::Launch {
            target: target.to_string(),
            code: 0,
            message: "no elevation facility (pkexec/sudo) found".to_string(),
        })?;
    let mut cmd = Command::new(facility);
    cmd.arg(path).args(args);
    Ok(cmd)
}

#[cfg(windows)]
fn elevated_command(path: &Path, args: &[String], _target: &str) -> Result<Command> {
    // Start-Process with the runas verb is the shell elevation facility.
    let mut cmd = Command::new("powershell");
    cmd.arg("-NoProfile").arg("-Command").arg("Start-Process");
    cmd.arg("-Verb").arg("RunAs").arg("-FilePath").arg(path);
    if !args.is_empty() {
        cmd.arg("-ArgumentList").arg(args.join(","));
    }
    Ok(cmd)
}

#[cfg(not(any(unix, windows)))]
fn elevated_command(_path: &Path, _args: &[String], target: &str) -> Result<Command> {
    Err(LaunchkitError::Launch {
        target: target.to_string(),
        code: 0,
        message: "elevation is not supported on this platform".to_string(),
    })
}

/// Platform opener for documents and URLs: the double-click equivalent.
fn opener_command(target: &std::ffi::OsStr) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg("start").arg("").arg(target);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    }
}

fn apply_platform_flags(command: &mut Command, mask: u32) {
    let hide_console = mask & flags::NO_CONSOLE != 0;
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        if hide_console {
            command.creation_flags(flags::CREATE_NO_WINDOW);
        }
    }
    #[cfg(not(windows))]
    {
        // Console windows are a Windows concept; nothing to do here.
        let _ = (command, hide_console);
    }
}

/// Grant the launched process the right to take the foreground where the
/// platform gates it. Best-effort by contract; failure is invisible.
fn allow_foreground_activation(pid: u32) {
    tracing::trace!(pid, "foreground activation grant (best-effort)");
}

fn wait_for_exit(child: &mut Child, target: &str) -> i32 {
    match child.wait() {
        Ok(status) => status.code().unwrap_or(EXIT_CODE_UNKNOWN),
        Err(e) => {
            tracing::warn!(target, error = %e, "exit code unobtainable");
            EXIT_CODE_UNKNOWN
        }
    }
}
