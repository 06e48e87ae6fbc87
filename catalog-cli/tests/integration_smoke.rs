//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("catalog").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("catalog").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CATALOG_DB_HOST"))
        .stdout(predicate::str::contains("--skip-migrations"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("catalog").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("DATABASE_URL"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("catalog").unwrap();
    cmd.arg("frobnicate");

    cmd.assert().failure();
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("catalog").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
