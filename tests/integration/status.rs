#[path = "common/mod.rs"]
mod common;

use std::fs;

use common::Sandbox;
use predicates::{prelude::PredicateBooleanExt, str::contains};

#[test]
fn status_before_install_is_not_running() {
    let sandbox = Sandbox::new();

    sandbox
        .aura()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Not installed"))
        .stdout(contains("Aura proxy is not running"));
}

#[test]
fn status_without_runtime_exits_zero() {
    let sandbox = Sandbox::new();
    fs::remove_file(sandbox.home().join("bin/docker")).unwrap();

    sandbox
        .aura()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Aura proxy is not running"));
}

#[test]
fn status_follows_start_and_stop() {
    let sandbox = Sandbox::new();
    sandbox.install();

    sandbox.aura().arg("start").assert().success();
    sandbox
        .aura()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Aura proxy is running"))
        .stdout(contains("aura-caddy").and(contains("Up 2 seconds")));

    sandbox.aura().arg("stop").assert().success();
    sandbox
        .aura()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Aura proxy is not running"))
        .stdout(contains("aura-caddy").not());
}

#[test]
fn status_reports_incomplete_install() {
    let sandbox = Sandbox::new();
    sandbox.install();
    fs::remove_file(sandbox.state_dir().join("setup-mkcert.sh")).unwrap();

    sandbox
        .aura()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("missing: setup-mkcert.sh"));
}

#[test]
fn failing_query_reads_as_not_running() {
    let sandbox = Sandbox::new();
    sandbox.install();
    sandbox.aura().arg("start").assert().success();

    sandbox
        .aura()
        .arg("status")
        .env("FAKE_PS_EXIT", "1")
        .assert()
        .success()
        .stdout(contains("Aura proxy is not running"));
}

#[test]
fn status_without_home_reports_not_running() {
    let sandbox = Sandbox::new();

    sandbox
        .aura()
        .env_remove("HOME")
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Aura proxy is not running"));
}

#[test]
fn status_with_unusable_config_reports_not_running() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.home().join(".config/aura/config.yaml"),
        "docker: \"${AURA_TEST_SURELY_UNDEFINED_VAR}/docker\"\n",
    )
    .unwrap();

    sandbox
        .aura()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Aura proxy is not running"));

    sandbox
        .aura()
        .arg("start")
        .assert()
        .code(1)
        .stderr(contains("AURA_TEST_SURELY_UNDEFINED_VAR"));
}
