//! Integration tests for the CLI surface.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A project whose checks always pass, independent of the host machine.
fn setup_passing_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("corral.yml"),
        r#"
catalog_file: checks.yml
"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("checks.yml"),
        r#"
apps:
  - id: shell
    name: Shell
    command: echo shell is available
cluster:
  - id: nodes
    name: Nodes
    command: echo 3
"#,
    )
    .unwrap();
    temp
}

fn corral() -> Command {
    Command::new(cargo_bin("corral"))
}

#[test]
fn cli_shows_help() {
    corral()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "readiness diagnostics and provisioning",
        ));
}

#[test]
fn cli_shows_version() {
    corral()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn check_json_emits_a_report() {
    let temp = setup_passing_project();
    corral()
        .current_dir(temp.path())
        .args(["check", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready Instances: 3"))
        .stdout(predicate::str::contains("generated_at"));
}

#[test]
fn check_fails_when_a_check_is_not_configured() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("corral.yml"), "catalog_file: checks.yml\n").unwrap();
    fs::write(
        temp.path().join("checks.yml"),
        r#"
apps:
  - id: broken
    name: Broken Tool
    command: echo boom >&2
"#,
    )
    .unwrap();

    corral()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Not ready"));
}

#[test]
fn check_is_the_default_command() {
    let temp = setup_passing_project();
    corral()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready"));
}

#[test]
fn catalog_lists_builtin_checks() {
    let temp = TempDir::new().unwrap();
    corral()
        .current_dir(temp.path())
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Minikube"))
        .stdout(predicate::str::contains("Operating System"));
}

#[test]
fn catalog_json_includes_commands() {
    let temp = setup_passing_project();
    corral()
        .current_dir(temp.path())
        .args(["catalog", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("echo 3"));
}

#[test]
fn provision_runs_configured_script() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("setup.sh"),
        "#!/bin/sh\necho provisioning things\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("corral.yml"),
        "provision_script: setup.sh\n",
    )
    .unwrap();

    corral()
        .current_dir(temp.path())
        .args(["--verbose", "provision", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("provisioning things"))
        .stdout(predicate::str::contains("Provisioning complete"));
}

#[test]
fn provision_script_flag_overrides_config() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("other.sh"),
        "#!/bin/sh\necho from override\n",
    )
    .unwrap();

    corral()
        .current_dir(temp.path())
        .args(["--verbose", "provision", "--yes", "--script", "other.sh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from override"));
}

#[test]
fn dashboard_prints_ready_url() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("corral.yml"),
        "dashboard_command: echo http://127.0.0.1:54321\n",
    )
    .unwrap();

    corral()
        .current_dir(temp.path())
        .args(["dashboard", "--exit-on-ready"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dashboard ready: http://127.0.0.1:54321",
        ));
}

#[test]
fn dashboard_without_url_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("corral.yml"),
        "dashboard_command: echo starting tunnel...\n",
    )
    .unwrap();

    corral()
        .current_dir(temp.path())
        .arg("dashboard")
        .assert()
        .failure()
        .stdout(predicate::str::contains("without producing a URL"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    corral()
        .current_dir(temp.path())
        .args(["--config", "nope.yml", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
}

#[test]
fn malformed_catalog_aborts_the_pass() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("corral.yml"), "catalog_file: checks.yml\n").unwrap();
    fs::write(
        temp.path().join("checks.yml"),
        r#"
apps:
  - id: cpu
    name: CPU
    probe: cpu
"#,
    )
    .unwrap();

    corral()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("only valid in the system phase"));
}
