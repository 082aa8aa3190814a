//! Synchronous console capture.
//!
//! Runs a console program with stdout and stderr interleaved onto a single
//! anonymous pipe and reassembles the byte stream into lines as it arrives.
//! The read loop blocks the calling thread; callers needing responsiveness
//! run it on a worker thread. Every invocation owns a private pipe, buffer,
//! and child, so concurrent captures need no locking between them.

use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::console::lines::LineReassembler;
use crate::console::sink::{Accumulator, LineSink, LogSink};
use crate::encoding::OutputEncoding;
use crate::error::{LaunchkitError, Result};

/// Exit code reported when the child's real code is unobtainable
/// (for example when it was killed by a signal). Deliberately the minimum
/// value so callers can tell "unknown" apart from any plausible exit code.
pub const EXIT_CODE_UNKNOWN: i32 = i32::MIN;

/// Read granularity for the pipe loop.
const READ_CHUNK_SIZE: usize = 8192;

/// Run a console program, delivering each output line to `sink`.
///
/// Both stdout and stderr are bound to the same pipe, so lines arrive in
/// the order the child flushed them. Lines are decoded with `encoding`, or
/// with the cached process default when `None`.
///
/// Returns the child's exit code, or [`EXIT_CODE_UNKNOWN`] when no code is
/// obtainable. Fails with [`LaunchkitError::Pipe`] when the pipe cannot be
/// created and [`LaunchkitError::Launch`] when the child cannot be spawned.
pub fn run(
    exe: &str,
    args: &[String],
    cur_dir: Option<&Path>,
    encoding: Option<OutputEncoding>,
    sink: &mut dyn LineSink,
) -> Result<i32> {
    let encoding = encoding.unwrap_or_else(OutputEncoding::console_default);

    let (mut reader, writer) = std::io::pipe().map_err(|e| LaunchkitError::Pipe {
        message: format!("cannot create capture pipe: {e}"),
    })?;
    let stderr_writer = writer.try_clone().map_err(|e| LaunchkitError::Pipe {
        message: format!("cannot clone pipe write end: {e}"),
    })?;

    let mut cmd = Command::new(exe);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(stderr_writer);
    if let Some(dir) = cur_dir {
        cmd.current_dir(dir);
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.creation_flags(crate::launch::request::flags::CREATE_NO_WINDOW);
    }

    tracing::debug!(exe, ?args, ?cur_dir, "spawning console child");
    let mut child = cmd.spawn().map_err(|e| LaunchkitError::launch(exe, &e))?;

    // Ordering invariant: the Command still holds the parent's copies of the
    // pipe write end. They must be closed before the read loop starts, or
    // end-of-stream never arrives and the loop blocks forever after the
    // child exits.
    drop(cmd);

    let mut reassembler = LineReassembler::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        match reader.read(&mut chunk) {
            // No writer handles remain anywhere: normal end-of-stream.
            Ok(0) => break,
            Ok(n) => {
                reassembler.push(&chunk[..n], |line| sink.line(&encoding.decode(line)));
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::BrokenPipe => break,
            Err(e) => {
                // Genuine read failure. Reap the child before propagating so
                // no zombie outlives the session.
                let _ = child.kill();
                let _ = child.wait();
                return Err(e.into());
            }
        }
    }

    // Final, possibly unterminated line.
    reassembler.finish(|line| sink.line(&encoding.decode(line)));

    match child.wait() {
        Ok(status) => Ok(status.code().unwrap_or(EXIT_CODE_UNKNOWN)),
        Err(e) => {
            tracing::warn!(exe, error = %e, "exit code unobtainable");
            Ok(EXIT_CODE_UNKNOWN)
        }
    }
}

/// Run a console program, forwarding each line to the ambient log channel.
pub fn run_logged(
    exe: &str,
    args: &[String],
    cur_dir: Option<&Path>,
    encoding: Option<OutputEncoding>,
) -> Result<i32> {
    let mut sink = LogSink::new(exe);
    run(exe, args, cur_dir, encoding, &mut sink)
}

/// Run a console program with a per-line streaming callback.
pub fn run_streaming(
    exe: &str,
    args: &[String],
    cur_dir: Option<&Path>,
    encoding: Option<OutputEncoding>,
    mut callback: impl FnMut(&str),
) -> Result<i32> {
    run(exe, args, cur_dir, encoding, &mut callback)
}

/// Run a console program, returning its full output text and exit code.
pub fn run_captured(
    exe: &str,
    args: &[String],
    cur_dir: Option<&Path>,
    encoding: Option<OutputEncoding>,
) -> Result<(String, i32)> {
    let mut acc = Accumulator::new();
    let code = run(exe, args, cur_dir, encoding, &mut acc)?;
    Ok((acc.into_text(), code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> (String, Vec<String>) {
        if cfg!(windows) {
            ("cmd".into(), vec!["/C".into(), script.into()])
        } else {
            ("sh".into(), vec!["-c".into(), script.into()])
        }
    }

    #[test]
    fn captures_lines_and_exit_code() {
        let (exe, args) = sh("printf 'hello\\r\\nworld\\r\\n'");
        let mut lines = Vec::new();
        let code = run_streaming(&exe, &args, None, Some(OutputEncoding::Utf8), |line| {
            lines.push(line.to_string());
        })
        .unwrap();
        assert_eq!(lines, vec!["hello", "world"]);
        assert_eq!(code, 0);
    }

    #[test]
    fn reports_nonzero_exit_code() {
        let (exe, args) = sh("exit 3");
        let code = run_captured(&exe, &args, None, None).map(|(_, c)| c).unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    fn interleaves_stdout_and_stderr() {
        let (exe, args) = sh("echo out; echo err 1>&2; echo out2");
        let (text, code) = run_captured(&exe, &args, None, Some(OutputEncoding::Utf8)).unwrap();
        assert_eq!(code, 0);
        assert!(text.contains("out\n"));
        assert!(text.contains("err\n"));
        assert!(text.contains("out2\n"));
    }

    #[test]
    fn unterminated_final_line_is_delivered() {
        let (exe, args) = sh("printf 'no newline'");
        let (text, _) = run_captured(&exe, &args, None, Some(OutputEncoding::Utf8)).unwrap();
        assert_eq!(text, "no newline\n");
    }

    #[test]
    fn deterministic_output_is_identical_across_runs() {
        let (exe, args) = sh("printf 'a\\nb\\nc\\n'");
        let (first, _) = run_captured(&exe, &args, None, Some(OutputEncoding::Utf8)).unwrap();
        let (second, _) = run_captured(&exe, &args, None, Some(OutputEncoding::Utf8)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let err = run_captured("definitely-not-a-real-binary-1870", &[], None, None).unwrap_err();
        match err {
            LaunchkitError::Launch { code, .. } => assert_ne!(code, 0),
            other => panic!("expected Launch, got {other:?}"),
        }
    }

    #[test]
    fn respects_working_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let (exe, args) = sh(if cfg!(windows) { "cd" } else { "pwd" });
        let (text, code) =
            run_captured(&exe, &args, Some(temp.path()), Some(OutputEncoding::Utf8)).unwrap();
        assert_eq!(code, 0);
        assert!(!text.trim().is_empty());
    }

    #[test]
    fn run_logged_succeeds() {
        let (exe, args) = sh("echo logged");
        let code = run_logged(&exe, &args, None, None).unwrap();
        assert_eq!(code, 0);
    }
}
