//! Integration tests for the depositor CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Helper function to create a clean command instance
fn depositor() -> Command { Command::cargo_bin("depositor").unwrap() }

#[test]
fn help_lists_commands() {
  depositor()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("init").and(predicate::str::contains("run")));
}

#[test]
fn init_writes_template() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("config.toml");

  depositor()
    .arg("--config")
    .arg(&path)
    .arg("init")
    .assert()
    .success()
    .stdout(predicate::str::contains("configuration template"));
  assert!(path.exists());

  // A second init without --force leaves the file alone.
  depositor()
    .arg("--config")
    .arg(&path)
    .arg("--accept-defaults")
    .arg("init")
    .assert()
    .success()
    .stdout(predicate::str::contains("leaving it alone"));
}

#[test]
fn run_without_config_fails() {
  let dir = tempdir().unwrap();
  let dois = dir.path().join("dois.txt");
  std::fs::write(&dois, "10.1/2\n").unwrap();

  depositor()
    .arg("--config")
    .arg(dir.path().join("missing.toml"))
    .arg("run")
    .arg("--dry-run")
    .arg(&dois)
    .assert()
    .failure();
}
