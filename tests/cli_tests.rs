//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn memo_relay_bin(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("memo-relay").expect("binary should build");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("MEMO_RELAY_ENDPOINT")
        .env_remove("MEMO_RELAY_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("duration"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--endpoint"));
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("memo-relay"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn duration_encode() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .args(["duration", "encode", "65"])
        .assert()
        .success()
        .stdout("1m 5s\n");
}

#[test]
fn duration_normalize() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .args(["duration", "normalize", "1h2m3s"])
        .assert()
        .success()
        .stdout("01:02:03\n");
}

#[test]
fn duration_ago_translates_and_passes_through() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .args(["duration", "ago", "5 minutes ago"])
        .assert()
        .success()
        .stdout("5 minutos atrás\n");

    memo_relay_bin(&home)
        .args(["duration", "ago", "yesterday"])
        .assert()
        .success()
        .stdout("yesterday\n");
}

#[test]
fn config_path_command() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("memo-relay"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_help() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .args(["config", "set", "endpoint", "https://api.example.com/presign"])
        .assert()
        .success();

    memo_relay_bin(&home)
        .args(["config", "get", "endpoint"])
        .assert()
        .success()
        .stdout("https://api.example.com/presign\n");
}

#[test]
fn config_token_is_masked() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .args(["config", "set", "auth_token", "tok_1234567890"])
        .assert()
        .success();

    memo_relay_bin(&home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tok_...7890"))
        .stdout(predicate::str::contains("tok_1234567890").not());
}

#[test]
fn config_retry_section() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .args(["config", "set", "retry.max_attempts", "3"])
        .assert()
        .success();

    memo_relay_bin(&home)
        .args(["config", "get", "retry.max_attempts"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn play_dry_run_finishes() {
    let home = TempDir::new().unwrap();
    memo_relay_bin(&home)
        .args(["play", "memo.webm", "--dry-run", "--length", "0.2"])
        .assert()
        .success();
}
