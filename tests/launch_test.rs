//! Launcher integration tests.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use launchkit::launch::{LaunchRequest, ShellLauncher, WorkingDir};
use launchkit::LaunchkitError;

/// Write a small executable script into `dir` and return its path.
fn script(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn waits_for_exit_and_reports_code() {
    let temp = tempfile::TempDir::new().unwrap();
    let exe = script(temp.path(), "exit5.sh", "exit 5");
    let request = LaunchRequest::new(exe.to_str().unwrap()).wait_for_exit();
    let result = ShellLauncher::new().launch(&request).unwrap();
    assert_eq!(result.exit_code, Some(5));
    assert!(result.child.is_none());
}

#[test]
fn argument_string_is_split_and_passed() {
    let temp = tempfile::TempDir::new().unwrap();
    let out = temp.path().join("out.txt");
    let exe = script(temp.path(), "echoargs.sh", "printf '%s|' \"$@\" > \"$1\"");
    let request = LaunchRequest::new(exe.to_str().unwrap())
        .args(format!("{} 'two words' three", out.display()))
        .wait_for_exit();
    let result = ShellLauncher::new().launch(&request).unwrap();
    assert_eq!(result.exit_code, Some(0));
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, format!("{}|two words|three|", out.display()));
}

#[test]
fn derived_working_directory_comes_from_target() {
    let temp = tempfile::TempDir::new().unwrap();
    let exe = script(temp.path(), "pwd.sh", "pwd > where.txt");
    let request = LaunchRequest::new(exe.to_str().unwrap())
        .cwd(WorkingDir::FromTarget)
        .wait_for_exit();
    let result = ShellLauncher::new().launch(&request).unwrap();
    assert_eq!(result.exit_code, Some(0));
    let recorded = std::fs::read_to_string(temp.path().join("where.txt")).unwrap();
    let recorded = PathBuf::from(recorded.trim());
    assert_eq!(
        recorded.canonicalize().unwrap(),
        temp.path().canonicalize().unwrap()
    );
}

#[test]
fn process_handle_is_returned_on_request() {
    let temp = tempfile::TempDir::new().unwrap();
    let exe = script(temp.path(), "ok.sh", "exit 0");
    let request = LaunchRequest::new(exe.to_str().unwrap()).need_process_handle();
    let mut result = ShellLauncher::new().launch(&request).unwrap();
    let mut child = result.child.take().expect("requested handle");
    assert_eq!(child.wait().unwrap().code(), Some(0));
}

#[test]
fn nonexistent_target_is_resolution_error() {
    let request = LaunchRequest::new("/no/such/dir/no-such-tool");
    let err = ShellLauncher::new().launch(&request).unwrap_err();
    assert!(matches!(err, LaunchkitError::Resolution { .. }));
}

#[test]
fn admin_with_conflicting_verb_is_argument_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let exe = script(temp.path(), "ok.sh", "exit 0");
    let request = LaunchRequest::new(exe.to_str().unwrap()).admin().verb("edit");
    let err = ShellLauncher::new().launch(&request).unwrap_err();
    assert!(matches!(err, LaunchkitError::Argument { .. }));
}

#[test]
fn quiet_variant_swallows_only_launch_errors() {
    // A script that exists but cannot be executed (no shebang, binary
    // garbage) produces a Launch error; the quiet variant maps it to None.
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("garbage.bin");
    std::fs::write(&path, [0x7f, 0x00, 0x01, 0x02]).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    let launcher = ShellLauncher::new();
    let request = LaunchRequest::new(path.to_str().unwrap()).wait_for_exit();

    match launcher.launch(&request) {
        Err(LaunchkitError::Launch { code, .. }) => assert_ne!(code, 0),
        other => panic!("expected Launch error, got {other:?}"),
    }
    assert!(launcher.launch_quiet(&request).unwrap().is_none());

    // Everything that is not a launch failure still propagates.
    let bad = LaunchRequest::new("/no/such/dir/no-such-tool");
    assert!(matches!(
        launcher.launch_quiet(&bad).unwrap_err(),
        LaunchkitError::Resolution { .. }
    ));
}
