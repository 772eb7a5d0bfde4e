//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::{Command, Output};

const ENV_VARS: [&str; 6] = [
    "SUBVERTED_REPO",
    "SUBVERTED_SVN",
    "SUBVERTED_TIMEOUT_SECS",
    "SUBVERTED_LENIENT",
    "SUBVERTED_RECORD",
    "SUBVERTED_LOG",
];

fn run_subverted(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_subverted");
    let mut cmd = Command::new(bin);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1").args(args).output().expect("failed to run subverted binary")
}

fn working_copy() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".svn")).unwrap();
    dir
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn help_lists_commands() {
    let output = run_subverted(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for command in ["overview", "status", "log", "commit", "branches", "blame"] {
        assert!(stdout.contains(command), "missing {command} in help:\n{stdout}");
    }
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_subverted(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn missing_working_copy_fails_early() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let output = run_subverted(&["--repo", path_str(&missing), "status"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Working copy not found"), "{stderr}");
}

#[test]
fn plain_directory_is_rejected_without_lenient() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_subverted(&["--repo", path_str(dir.path()), "--svn", "false", "status"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("not a valid repo"), "{stderr}");
}

#[test]
fn empty_commit_message_is_rejected() {
    let wc = working_copy();
    let output = run_subverted(&[
        "--repo",
        path_str(wc.path()),
        "--svn",
        "subverted-no-such-binary",
        "commit",
        "-m",
        "",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Must include a message"), "{stderr}");
}

#[test]
fn blame_is_not_supported() {
    let wc = working_copy();
    let output = run_subverted(&["--repo", path_str(wc.path()), "blame", "a.txt"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("not yet supported"), "{stderr}");
}

#[test]
fn missing_client_is_reported() {
    let wc = working_copy();
    let output = run_subverted(&[
        "--repo",
        path_str(wc.path()),
        "--svn",
        "subverted-no-such-binary",
        "status",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("not found on PATH"), "{stderr}");
}

#[cfg(unix)]
mod fake_client {
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::sync::OnceLock;

    use super::{path_str, run_subverted, working_copy};

    const SCRIPT: &str = r#"#!/bin/sh
case "$1" in
  status) echo "M       trunk/a.txt" ;;
  info) printf 'Path: .\nURL: https://svn.example.com/repo/trunk\nRevision: 42\n' ;;
  log) echo "r42 | alice | limit $3" ;;
  list) printf 'feature-a/\nfeature-b/\n' ;;
  commit) echo "Committed revision 43 with: $3" ;;
  *) echo "svn: E205000: Unknown subcommand: '$1'" >&2; exit 1 ;;
esac
"#;

    /// Writes the fake client once per test binary.
    fn fake_svn() -> &'static str {
        static SCRIPT_PATH: OnceLock<(tempfile::TempDir, PathBuf)> = OnceLock::new();
        let (_, path) = SCRIPT_PATH.get_or_init(|| {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("svn");
            std::fs::write(&path, SCRIPT).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            (dir, path)
        });
        path_str(path)
    }

    fn run_with_fake(args: &[&str]) -> (bool, String, String) {
        let wc = working_copy();
        let mut full = vec!["--repo", path_str(wc.path()), "--svn", fake_svn()];
        full.extend_from_slice(args);
        let output = run_subverted(&full);
        (
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        )
    }

    #[test]
    fn status_prints_client_output() {
        let (ok, stdout, _) = run_with_fake(&["status"]);
        assert!(ok);
        assert!(stdout.contains("M       trunk/a.txt"));
    }

    #[test]
    fn log_forwards_limit() {
        let (ok, stdout, _) = run_with_fake(&["log", "--limit", "5"]);
        assert!(ok);
        assert!(stdout.contains("r42 | alice | limit 5"));
    }

    #[test]
    fn overview_shows_info_table_and_logs() {
        let (ok, stdout, stderr) = run_with_fake(&[]);
        assert!(ok, "{stderr}");
        assert!(stdout.contains("Subversion Repository:"));
        assert!(stdout.contains("Property"));
        assert!(stdout.contains("https://svn.example.com/repo/trunk"));
        assert!(stdout.contains("Recent Log entries"));
        assert!(stdout.contains("limit 10"));
    }

    #[test]
    fn branches_are_listed() {
        let (ok, stdout, _) = run_with_fake(&["branches", "^/branches"]);
        assert!(ok);
        assert!(stdout.contains("feature-a"));
        assert!(stdout.contains("feature-b"));
    }

    #[test]
    fn commit_message_is_one_argument() {
        let (ok, stdout, _) = run_with_fake(&["commit", "-m", "two words; $(nope)"]);
        assert!(ok);
        assert!(stdout.contains("Committed revision 43 with: two words; $(nope)"));
    }

    #[test]
    fn client_failure_surfaces_stderr() {
        let (ok, _, stderr) = run_with_fake(&["update"]);
        assert!(!ok);
        assert!(stderr.contains("Subversion command failed: svn: E205000"), "{stderr}");
    }
}
