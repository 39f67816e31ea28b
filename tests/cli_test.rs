//! Integration tests for the ghfetch CLI.
//!
//! Tests argument parsing, help and version output, token reset and the
//! exit status of fatal errors. Every test points the config directory at a
//! temporary directory so a real token is never read or removed.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd(config_dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ghfetch");
    cmd.env("GHFETCH_CONFIG_DIR", config_dir.path())
        .env_remove("GITHUB_TOKEN")
        .env_remove("GHFETCH_API_URL")
        .env("NO_COLOR", "1");
    cmd
}

// --- Help and Version ---

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--heatmap"))
        .stdout(predicate::str::contains("--reset-token"))
        .stdout(predicate::str::contains("--api-url").not());
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// --- Argument errors ---

#[test]
fn test_missing_username_fails() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: No username provided"));
}

#[test]
fn test_config_with_username_is_rejected() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--config", "octocat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// --- Token reset ---

#[test]
fn test_reset_token_removes_file() {
    let dir = TempDir::new().unwrap();
    let token_path = dir.path().join("token.json");
    std::fs::write(&token_path, r#"{"token":"ghp_example"}"#).unwrap();

    cmd(&dir)
        .arg("--reset-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("Previous token deleted"));

    assert!(!token_path.exists());
}

#[test]
fn test_reset_token_without_file() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--reset-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("No stored token"));
}

// --- Fatal fetch errors ---

#[test]
fn test_network_failure_exits_with_error() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--api-url", "http://127.0.0.1:9", "--no-image", "octocat"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Network request failed"));
}

#[test]
fn test_impossible_username_is_not_found() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--api-url", "http://127.0.0.1:9", "not_a_login"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("was not found"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "image_height = 0\n").unwrap();

    cmd(&dir)
        .arg("octocat")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("image_height"));
}
