#[path = "common/mod.rs"]
mod common;

use common::Sandbox;
use predicates::str::contains;

#[test]
fn bare_and_suffixed_names_issue_the_same_certificate() {
    let sandbox = Sandbox::new();
    sandbox.install();
    let domains = sandbox.state_dir().join("certs/domains");

    sandbox
        .aura()
        .args(["cert", "foo"])
        .assert()
        .success()
        .stdout(contains("Certificate generated for foo.aura"));
    assert!(domains.join("foo.aura.pem").is_file());

    sandbox
        .aura()
        .args(["cert", "foo.aura"])
        .assert()
        .success()
        .stdout(contains("Certificate generated for foo.aura"));
    assert!(!domains.join("foo.aura.aura.pem").exists());

    let script = sandbox.state_dir().join("add-cert.sh");
    let cert_calls: Vec<String> = sandbox
        .shell_calls()
        .into_iter()
        .filter(|call| call.contains("add-cert.sh"))
        .collect();
    assert_eq!(cert_calls.len(), 2);
    for call in cert_calls {
        assert!(
            call.ends_with(&format!("{} foo.aura", script.display())),
            "{call}"
        );
    }
}

#[test]
fn cert_failure_exits_one() {
    let sandbox = Sandbox::new();
    sandbox.install();

    sandbox
        .aura()
        .args(["cert", "broken"])
        .env("FAKE_CERT_EXIT", "2")
        .assert()
        .code(1)
        .stderr(contains("failed to generate certificate"));
}

#[test]
fn cert_before_install_reports_not_installed() {
    let sandbox = Sandbox::new();

    sandbox
        .aura()
        .args(["cert", "foo"])
        .assert()
        .code(1)
        .stderr(contains("aura install"));
    assert!(sandbox.shell_calls().is_empty());
}
