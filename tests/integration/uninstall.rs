#[path = "common/mod.rs"]
mod common;

use std::fs;

use common::Sandbox;
use predicates::str::contains;

#[test]
fn declining_keeps_state_directory() {
    let sandbox = Sandbox::new();
    sandbox.install();

    sandbox
        .aura()
        .arg("uninstall")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Are you sure? (y/N)"))
        .stdout(contains("Cancelled"));

    assert!(sandbox.state_dir().join("docker-compose.yml").is_file());
    assert!(sandbox.docker_calls().is_empty());
}

#[test]
fn accepting_removes_state_even_if_stop_fails() {
    let sandbox = Sandbox::new();
    sandbox.install();
    fs::write(
        sandbox.state_dir().join("certs/domains/foo.aura.pem"),
        "cert",
    )
    .unwrap();

    sandbox
        .aura()
        .arg("uninstall")
        .env("FAKE_DOWN_EXIT", "1")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Aura proxy uninstalled"));

    assert!(!sandbox.state_dir().exists());
    let calls = sandbox.docker_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].ends_with("|compose down -v"), "{calls:?}");
}

#[test]
fn uninstall_without_install_is_a_no_op() {
    let sandbox = Sandbox::new();

    sandbox
        .aura()
        .arg("uninstall")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("nothing to remove"));
    assert!(sandbox.docker_calls().is_empty());
}

#[test]
fn install_after_uninstall_starts_fresh() {
    let sandbox = Sandbox::new();
    sandbox.install();
    sandbox
        .aura()
        .arg("uninstall")
        .write_stdin("Y\n")
        .assert()
        .success();

    sandbox.install();
    assert!(sandbox.state_dir().join("certs/domains").is_dir());
    assert!(!sandbox.state_dir().join("certs/domains/foo.aura.pem").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn removal_failure_exits_non_zero() {
    let sandbox = Sandbox::new();

    sandbox
        .aura()
        .args(["--state-dir", "/proc/self/fdinfo", "uninstall"])
        .write_stdin("y\n")
        .assert()
        .code(1)
        .stderr(contains("failed to remove aura directory /proc/self/fdinfo"));

    assert_eq!(sandbox.docker_calls().len(), 1);
}
