//! Binary smoke tests against a throwaway kubeconfig.

mod support;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use support::kube::write_kubeconfig;

fn kubefan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kubefan").expect("binary built");
    cmd.env("KUBEFAN_HOME", home)
        .env("KUBECONFIG", write_kubeconfig(home))
        .env("RUST_LOG", "error")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = tempfile::tempdir().unwrap();
    kubefan(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("versions"))
        .stdout(predicate::str::contains("contexts"))
        .stdout(predicate::str::contains("exec"));
}

#[test]
fn contexts_list_reports_current_and_selection() {
    let home = tempfile::tempdir().unwrap();

    kubefan(home.path())
        .args(["contexts", "select", "beta", "gamma", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown context"));

    assert_eq!(
        fs::read_to_string(home.path().join("selected_contexts")).unwrap(),
        "beta\ngamma"
    );

    kubefan(home.path())
        .args(["--json", "contexts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""current":"alpha""#))
        .stdout(predicate::str::contains(r#""effective":["beta","gamma"]"#));
}

#[test]
fn unreachable_clusters_do_not_fail_batch_commands() {
    let home = tempfile::tempdir().unwrap();

    kubefan(home.path())
        .args(["--json", "list", "pods", "--context", "alpha,beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""items":[]"#));

    kubefan(home.path())
        .args(["--json", "versions", "--context", "alpha,beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""alpha":"N/A""#))
        .stdout(predicate::str::contains(r#""beta":"N/A""#));
}

#[cfg(unix)]
#[test]
fn exec_injects_context_and_keeps_order() {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join("config.toml"), "kubectl = \"echo\"\n").unwrap();

    kubefan(home.path())
        .args(["exec", "--context", "beta,alpha", "--", "get", "pods"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\nbeta\n----\nget pods --context beta\n\nalpha\n-----\nget pods --context alpha\n",
        ));
}

#[test]
fn malformed_config_exits_nonzero() {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join("config.toml"), "[fanout\nmax_parallel = 1\n").unwrap();

    kubefan(home.path())
        .args(["contexts", "list"])
        .assert()
        .failure();
}

#[test]
fn describe_without_known_context_fails() {
    let home = tempfile::tempdir().unwrap();

    kubefan(home.path())
        .args(["describe", "pods", "missing@@default/web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}
