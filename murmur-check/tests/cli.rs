//! murmur-check command-line behaviour

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the user's config: points MURMUR_CONFIG into a
/// fresh temp dir that holds `config` if given, nothing otherwise.
fn check_cmd(config: Option<&str>) -> (TempDir, Command) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    if let Some(content) = config {
        fs::write(&config_path, content).unwrap();
    }

    let mut cmd = Command::cargo_bin("murmur-check").unwrap();
    cmd.env("MURMUR_CONFIG", &config_path)
        .env_remove("RUST_LOG")
        .env_remove("MURMUR_LOG_FORMAT")
        .env_remove("MURMUR_LOG_LEVEL");
    (temp_dir, cmd)
}

#[test]
fn test_valid_draft() {
    let (_temp_dir, mut cmd) = check_cmd(None);
    cmd.arg("Hello world")
        .arg("A short body")
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_short_title_fails_with_exit_3() {
    let (_temp_dir, mut cmd) = check_cmd(None);
    cmd.arg("ab")
        .assert()
        .code(3)
        .stdout(predicate::str::contains(
            "title: Must be at least 3 characters",
        ));
}

#[test]
fn test_empty_title_reports_required() {
    let (_temp_dir, mut cmd) = check_cmd(None);
    cmd.arg("")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("title: This field is required"));
}

#[test]
fn test_body_from_stdin() {
    let (_temp_dir, mut cmd) = check_cmd(Some("[composer]\nbody_max = 5\n"));
    cmd.arg("Hello")
        .write_stdin("this body is too long\n")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("body: Must be at most 5 characters"));
}

#[test]
fn test_stdin_trailing_newline_is_ignored() {
    let (_temp_dir, mut cmd) = check_cmd(Some("[composer]\nbody_max = 5\n"));
    cmd.arg("Hello").write_stdin("12345\n").assert().success();
}

#[test]
fn test_json_output() {
    let (_temp_dir, mut cmd) = check_cmd(None);
    let output = cmd
        .args(["--format", "json", "ab"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["language"], "en");
    assert_eq!(
        report["errors"]["title"],
        "Must be at least 3 characters"
    );
    assert!(report["errors"].get("body").is_none());
}

#[test]
fn test_config_bounds_apply() {
    let (_temp_dir, mut cmd) = check_cmd(Some("[composer]\ntitle_min = 1\ntitle_max = 4\n"));
    cmd.arg("Hello")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("title: Must be at most 4 characters"));
}

#[test]
fn test_invalid_config_exits_1() {
    let (_temp_dir, mut cmd) = check_cmd(Some("[composer]\ntitle_min = 10\ntitle_max = 5\n"));
    cmd.arg("Hello")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_malformed_config_exits_1() {
    let (_temp_dir, mut cmd) = check_cmd(Some("[composer\n"));
    cmd.arg("Hello").assert().code(1);
}

#[test]
fn test_explicit_config_flag() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("strict.toml");
    fs::write(&config_path, "[composer]\ntitle_min = 8\n").unwrap();

    let (_isolated, mut cmd) = check_cmd(None);
    cmd.arg("--config")
        .arg(&config_path)
        .arg("Hello")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Must be at least 8 characters"));
}

#[test]
fn test_unknown_language_falls_back_to_english() {
    let (_temp_dir, mut cmd) = check_cmd(None);
    let output = cmd
        .args(["--language", "fr", "--format", "json", ""])
        .output()
        .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["language"], "fr");
    assert_eq!(report["errors"]["title"], "This field is required");
}
