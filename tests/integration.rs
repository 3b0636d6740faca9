//! Integration tests for sgsync.
//!
//! These run the compiled binary and only exercise paths that need no AWS
//! credentials or network access.

use std::path::PathBuf;
use std::process::Command;

/// Helper to get the path to the compiled binary
fn get_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps directory
    path.push("sgsync");
    path
}

/// Run sgsync command and return output
fn run_sgsync(args: &[&str]) -> std::process::Output {
    let binary = get_binary_path();
    Command::new(&binary)
        .args(args)
        .env_remove("SGSYNC_SECURITY_GROUP_ID")
        .output()
        .expect("Failed to execute sgsync")
}

#[test]
fn test_version_command() {
    let output = run_sgsync(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sgsync"));
}

#[test]
fn test_help_command() {
    let output = run_sgsync(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sync"));
    assert!(stdout.contains("plan"));
    assert!(stdout.contains("status"));
}

#[test]
fn test_sync_help_mentions_dry_run() {
    let output = run_sgsync(&["sync", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dry-run"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_sgsync(&["frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn test_sync_without_group_id_fails_gracefully() {
    // No config file and no env override: validation must reject the run
    // before any network call is attempted.
    let output = run_sgsync(&["sync", "--config", "/nonexistent/sgsync.yaml"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("security group") || stderr.contains("SGSYNC_SECURITY_GROUP_ID"),
        "Unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_plan_with_malformed_config_fails_gracefully() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "security_group_id: [unterminated").unwrap();

    let output = run_sgsync(&["plan", "--config", file.path().to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("parse") || stderr.contains("config"),
        "Unexpected stderr: {}",
        stderr
    );
}
