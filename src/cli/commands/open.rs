//! The `open` command: shell-launch a program, document, or URL.

use console::style;

use crate::cli::args::OpenArgs;
use crate::cli::commands::{Command, CommandResult};
use crate::error::Result;
use crate::launch::{LaunchRequest, ShellLauncher, WorkingDir};

pub struct OpenCommand {
    args: OpenArgs,
    quiet: bool,
}

impl OpenCommand {
    pub fn new(args: OpenArgs, quiet: bool) -> Self {
        Self { args, quiet }
    }

    fn build_request(&self) -> LaunchRequest {
        let mut request = LaunchRequest::new(&self.args.target)
            .args(&self.args.args)
            .window(self.args.window.into());
        request.flags.wait_for_exit = self.args.wait;
        request.flags.admin = self.args.admin;
        request.flags.inherit_admin = self.args.inherit_admin;
        request.flags.most_used = self.args.most_used;
        request.verb = self.args.verb.clone();
        request.cwd = if let Some(dir) = &self.args.cwd {
            WorkingDir::Explicit(dir.clone())
        } else if self.args.target_dir {
            WorkingDir::FromTarget
        } else {
            WorkingDir::Inherit
        };
        request
    }
}

impl Command for OpenCommand {
    fn execute(&self) -> Result<CommandResult> {
        let launcher = ShellLauncher::new();
        let request = self.build_request();

        if self.args.lenient {
            return Ok(match launcher.launch_quiet(&request)? {
                Some(result) => report(&request, result.pid, result.exit_code, self.quiet),
                None => CommandResult::failure(1),
            });
        }

        let result = launcher.launch(&request)?;
        Ok(report(&request, result.pid, result.exit_code, self.quiet))
    }
}

fn report(
    request: &LaunchRequest,
    pid: u32,
    exit_code: Option<i32>,
    quiet: bool,
) -> CommandResult {
    match exit_code {
        Some(code) => {
            if !quiet {
                println!(
                    "{} '{}' exited with code {}",
                    style("done:").green().bold(),
                    request.target,
                    code
                );
            }
            CommandResult::with_exit_code(code)
        }
        None => {
            if !quiet {
                println!(
                    "{} '{}' (pid {})",
                    style("launched:").green().bold(),
                    request.target,
                    pid
                );
            }
            CommandResult::success()
        }
    }
}
