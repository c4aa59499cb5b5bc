//! Integration tests for the command-line surface
//!
//! Runs the compiled binary and checks argument handling. Anything past
//! argument parsing needs nmcli, a keyring and an interactive terminal,
//! so those paths are covered by the core suites instead.

use std::process::Command;

const DARUMA_BINARY: &str = "target/debug/daruma";

#[test]
fn test_help_lists_every_flag() {
    let output = Command::new(DARUMA_BINARY)
        .arg("--help")
        .output()
        .expect("Failed to run daruma --help");

    assert!(output.status.success(), "Help should exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--debug",
        "--config",
        "--password",
        "--otp-secret",
        "--interval",
        "--no-secrets",
        "--strategy",
    ] {
        assert!(stdout.contains(flag), "Help should mention {}", flag);
    }
}

#[test]
fn test_version_names_the_binary() {
    let output = Command::new(DARUMA_BINARY)
        .arg("--version")
        .output()
        .expect("Failed to run daruma --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("daruma"), "Version output: {}", stdout);
}

#[test]
fn test_zero_interval_is_rejected_at_parse_time() {
    let output = Command::new(DARUMA_BINARY)
        .args(["--interval", "0"])
        .output()
        .expect("Failed to run daruma --interval 0");

    assert!(
        !output.status.success(),
        "A zero interval should never reach the keeper"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--interval"), "Error output: {}", stderr);
}

#[test]
fn test_unknown_flags_are_rejected() {
    let output = Command::new(DARUMA_BINARY)
        .arg("--frobnicate")
        .output()
        .expect("Failed to run daruma --frobnicate");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--frobnicate"), "Error output: {}", stderr);
}
