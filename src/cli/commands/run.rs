//! The `run` command: execute a console program and capture its output.

use console::style;

use crate::cli::args::RunArgs;
use crate::cli::commands::{Command, CommandResult};
use crate::console::{run_captured, run_streaming, EXIT_CODE_UNKNOWN};
use crate::encoding::OutputEncoding;
use crate::error::{LaunchkitError, Result};

pub struct RunCommand {
    args: RunArgs,
    quiet: bool,
}

impl RunCommand {
    pub fn new(args: RunArgs, quiet: bool) -> Self {
        Self { args, quiet }
    }

    fn encoding(&self) -> Result<Option<OutputEncoding>> {
        match &self.args.encoding {
            None => Ok(None),
            Some(name) => OutputEncoding::from_name(name).map(Some).ok_or_else(|| {
                LaunchkitError::Argument {
                    message: format!("unknown encoding '{name}'"),
                }
            }),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self) -> Result<CommandResult> {
        let encoding = self.encoding()?;
        let cur_dir = self.args.cwd.as_deref();

        let code = if self.args.collect {
            let (text, code) =
                run_captured(&self.args.program, &self.args.args, cur_dir, encoding)?;
            print!("{text}");
            code
        } else {
            run_streaming(&self.args.program, &self.args.args, cur_dir, encoding, |line| {
                println!("{line}");
            })?
        };

        if code == EXIT_CODE_UNKNOWN {
            if !self.quiet {
                eprintln!(
                    "{} '{}' ended without an exit code",
                    style("warning:").yellow().bold(),
                    self.args.program
                );
            }
            return Ok(CommandResult::failure(1));
        }

        Ok(CommandResult::with_exit_code(code))
    }
}
