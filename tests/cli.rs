//! Black-box CLI tests against the compiled binary.
#![allow(clippy::panic)]

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("leanix-design-agent")
        .unwrap_or_else(|e| panic!("binary not built: {e}"));
    // Isolate from the developer's shell so config loading is deterministic
    cmd.env_clear();
    cmd
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("tools"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn query_help_shows_examples() {
    cmd()
        .args(["query", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Examples"));
}

#[test]
fn query_without_config_fails_with_missing_var() {
    cmd()
        .args(["query", "microservices"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn tools_without_config_fails_with_missing_var() {
    cmd()
        .arg("tools")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    cmd().arg("frobnicate").assert().failure();
}
