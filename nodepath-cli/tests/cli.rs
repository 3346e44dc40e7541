//! Integration tests for the nodepath CLI.
//!
//! These tests verify that the CLI binary behaves correctly, including
//! argument parsing, help text, and version output.

use assert_cmd::Command;
use predicates::prelude::*;

fn nodepath() -> Command {
    Command::cargo_bin("nodepath").expect("Failed to find nodepath binary")
}

/// Test that the binary runs without arguments and displays help/error.
#[test]
fn test_cli_no_arguments() {
    // With clap subcommands required, no arguments should fail and show usage
    nodepath()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

/// Test that the --version flag displays version information.
#[test]
fn test_cli_version_flag() {
    nodepath()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nodepath"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that the --help flag displays help text and every command.
#[test]
fn test_cli_help_flag() {
    nodepath()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains(
            "Parse and resolve node path expressions",
        ))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("check-name"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_unknown_subcommand() {
    nodepath()
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_completions_bash() {
    nodepath()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nodepath"))
        .stderr(predicate::str::contains("# Generating bash completion script"));
}

#[test]
fn test_completions_quiet_skips_instructions() {
    nodepath()
        .args(["--quiet", "completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef nodepath"))
        .stderr(predicate::str::is_empty());
}
