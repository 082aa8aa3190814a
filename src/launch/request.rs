//! Launch request and result types.

use std::path::PathBuf;
use std::process::Child;

/// Platform-flag bits applied to a launch.
///
/// Defaults are derived from the request by [`effective_flags`]; the
/// request's `flags_add`/`flags_remove` fields override them raw, as an
/// escape hatch for callers that know better.
pub mod flags {
    /// Never report completion asynchronously; the launch call returns only
    /// once the process is created.
    pub const NO_ASYNC: u32 = 0x0000_0001;

    /// Suppress the platform's own error UI on launch failure.
    pub const NO_ERROR_UI: u32 = 0x0000_0002;

    /// Hide the console window of console targets.
    pub const NO_CONSOLE: u32 = 0x0000_0004;

    /// Record the launch in the platform's frequently-used list.
    pub const LOG_USAGE: u32 = 0x0000_0008;

    /// Windows process-creation flag suppressing console window creation.
    pub const CREATE_NO_WINDOW: u32 = 0x0800_0000;
}

/// Boolean launch switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchFlags {
    /// Let the platform show its own error UI on failure.
    pub show_error_ui: bool,

    /// Block until the process exits and capture its exit code.
    pub wait_for_exit: bool,

    /// Return the child handle to the caller.
    pub need_process_handle: bool,

    /// Launch the target elevated.
    pub admin: bool,

    /// Keep the caller's elevation as-is; never broker a privilege drop.
    pub inherit_admin: bool,

    /// Mark the target as frequently used.
    pub most_used: bool,
}

/// Working directory for the launched process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkingDir {
    /// Inherit the caller's working directory.
    #[default]
    Inherit,

    /// Derive from the resolved target's parent directory.
    FromTarget,

    /// Use this directory.
    Explicit(PathBuf),
}

/// Initial window state hint, best-effort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowState {
    #[default]
    Normal,
    Hidden,
    Minimized,
    Maximized,
}

/// A request to launch a program, document, or URL.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Program/document reference: path, bare program name, or URL.
    pub target: String,

    /// Command-line arguments as a single string.
    pub args: String,

    pub flags: LaunchFlags,

    pub cwd: WorkingDir,

    /// Shell verb (for example "runas"). Mutually exclusive with the admin
    /// flag unless it is "runas" itself.
    pub verb: Option<String>,

    /// Window state hint, applied where the platform supports it.
    pub window: WindowState,

    /// Raw platform-flag bits OR-ed into the effective mask.
    pub flags_add: u32,

    /// Raw platform-flag bits cleared from the effective mask.
    pub flags_remove: u32,
}

impl LaunchRequest {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            args: String::new(),
            flags: LaunchFlags::default(),
            cwd: WorkingDir::default(),
            verb: None,
            window: WindowState::default(),
            flags_add: 0,
            flags_remove: 0,
        }
    }

    pub fn args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into();
        self
    }

    pub fn wait_for_exit(mut self) -> Self {
        self.flags.wait_for_exit = true;
        self
    }

    pub fn need_process_handle(mut self) -> Self {
        self.flags.need_process_handle = true;
        self
    }

    pub fn admin(mut self) -> Self {
        self.flags.admin = true;
        self
    }

    pub fn inherit_admin(mut self) -> Self {
        self.flags.inherit_admin = true;
        self
    }

    pub fn verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    pub fn cwd(mut self, cwd: WorkingDir) -> Self {
        self.cwd = cwd;
        self
    }

    pub fn window(mut self, window: WindowState) -> Self {
        self.window = window;
        self
    }
}

/// Compute the platform-flag mask for a request.
///
/// Defaults: completion is always synchronous; the platform error UI is
/// suppressed unless the caller asked for it; console windows are hidden
/// unless the caller waits for exit; usage is logged when requested. The
/// raw add/remove overrides are applied last, in that order.
pub fn effective_flags(request: &LaunchRequest) -> u32 {
    let mut mask = flags::NO_ASYNC;
    if !request.flags.show_error_ui {
        mask |= flags::NO_ERROR_UI;
    }
    if !request.flags.wait_for_exit {
        mask |= flags::NO_CONSOLE;
    }
    if request.flags.most_used {
        mask |= flags::LOG_USAGE;
    }
    mask |= request.flags_add;
    mask & !request.flags_remove
}

/// Outcome of a launch.
///
/// The child handle is owned by whoever holds the result; dropping the
/// result releases it exactly once, on every path.
#[derive(Debug)]
pub struct LaunchResult {
    /// Exit code of the launched process. Set only when the request waited
    /// for exit.
    pub exit_code: Option<i32>,

    /// Process id, 0 when not obtainable or not applicable.
    pub pid: u32,

    /// Child handle, present only when the request asked for it.
    pub child: Option<Child>,
}
