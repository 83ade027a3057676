use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn converge_cmd() -> Command {
    let mut cmd = Command::cargo_bin("converge").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

const DIVERGING: &str = r#"{
  "group": "com.example", "artifact": "app", "version": "1.0",
  "dependencies": [
    { "group": "org.a", "artifact": "lib-a", "version": "1.0", "scope": "compile",
      "dependencies": [
        { "group": "org.slf4j", "artifact": "slf4j-api", "version": "1.7.30", "scope": "compile" },
        { "group": "com.fasterxml.jackson.core", "artifact": "jackson-databind", "version": "2.12.6.1", "scope": "compile" }
      ] },
    { "group": "org.b", "artifact": "lib-b", "version": "1.0", "scope": "compile",
      "dependencies": [
        { "group": "org.slf4j", "artifact": "slf4j-api", "version": "1.7.32", "scope": "compile" },
        { "group": "com.fasterxml.jackson.core", "artifact": "jackson-databind", "version": "2.12.6.1", "scope": "compile" }
      ] }
  ]
}"#;

const TEST_SCOPED: &str = r#"{
  "group": "com.example", "artifact": "app", "version": "1.0",
  "dependencies": [
    { "group": "org.slf4j", "artifact": "slf4j-api", "version": "1.7.30", "scope": "compile" },
    { "group": "org.test", "artifact": "harness", "version": "2.0", "scope": "test",
      "dependencies": [
        { "group": "org.slf4j", "artifact": "slf4j-api", "version": "1.7.32", "scope": "test" }
      ] }
  ]
}"#;

fn write_tree(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("tree.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_check_fails_on_duplicates() {
    let tmp = TempDir::new().unwrap();
    let tree = write_tree(&tmp, DIVERGING);

    converge_cmd()
        .current_dir(tmp.path())
        .args(["check", "--tree"])
        .arg(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Dependency convergence error for 'org.slf4j:slf4j-api:jar:1.7.30:compile'",
        ))
        .stderr(predicate::str::contains("jackson-databind").not())
        .stderr(predicate::str::contains(
            "Failed while enforcing duplicated versions",
        ));
}

#[test]
fn test_check_unique_versions_reports_identical_versions() {
    let tmp = TempDir::new().unwrap();
    let tree = write_tree(&tmp, DIVERGING);

    converge_cmd()
        .current_dir(tmp.path())
        .args(["check", "--unique-versions", "--tree"])
        .arg(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Dependency convergence error for \
             'com.fasterxml.jackson.core:jackson-databind:jar:2.12.6.1:compile'",
        ));
}

#[test]
fn test_check_no_fail_reports_and_passes() {
    let tmp = TempDir::new().unwrap();
    let tree = write_tree(&tmp, DIVERGING);

    converge_cmd()
        .current_dir(tmp.path())
        .args(["check", "--no-fail", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "DependencyConvergence rule is running in reporting-only mode",
        ))
        .stderr(predicate::str::contains(
            "Dependency convergence error for 'org.slf4j:slf4j-api:jar:1.7.30:compile'",
        ))
        .stdout(predicate::str::contains(
            "DependencyConvergence rule passed with 1 conflict(s) reported",
        ));
}

#[test]
fn test_check_ignores_test_scope() {
    let tmp = TempDir::new().unwrap();
    let tree = write_tree(&tmp, TEST_SCOPED);

    converge_cmd()
        .current_dir(tmp.path())
        .args(["check", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stderr(predicate::str::contains("convergence error").not());
}

#[test]
fn test_check_reads_descriptor_from_current_dir() {
    let tmp = TempDir::new().unwrap();
    let tree = write_tree(&tmp, DIVERGING);
    fs::write(
        tmp.path().join("Converge.toml"),
        "[dependency-convergence]\nexcludes = [\"org.slf4j:*\"]\n",
    )
    .unwrap();

    converge_cmd()
        .current_dir(tmp.path())
        .args(["check", "--tree"])
        .arg(&tree)
        .assert()
        .success();
}

#[test]
fn test_check_exclude_flag() {
    let tmp = TempDir::new().unwrap();
    let tree = write_tree(&tmp, DIVERGING);

    converge_cmd()
        .current_dir(tmp.path())
        .args(["check", "--exclude", "org.slf4j:slf4j-api", "--tree"])
        .arg(&tree)
        .assert()
        .success()
        .stderr(predicate::str::contains("slf4j").not());
}

#[test]
fn test_check_explicit_config_with_fail_disabled() {
    let tmp = TempDir::new().unwrap();
    let tree = write_tree(&tmp, DIVERGING);
    let config = tmp.path().join("rules.toml");
    fs::write(&config, "[dependency-convergence]\nfail = false\n").unwrap();

    converge_cmd()
        .current_dir(tmp.path())
        .args(["check", "--tree"])
        .arg(&tree)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("reporting-only mode"));
}

#[test]
fn test_check_malformed_exclude_fails() {
    let tmp = TempDir::new().unwrap();
    let tree = write_tree(&tmp, DIVERGING);

    converge_cmd()
        .current_dir(tmp.path())
        .args(["check", "--no-fail", "--exclude", "org.slf4j:slf4j-api:jar:[1.0", "--tree"])
        .arg(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid exclude pattern"))
        .stderr(predicate::str::contains("convergence error").not());
}

#[test]
fn test_check_missing_tree_fails() {
    let tmp = TempDir::new().unwrap();

    converge_cmd()
        .current_dir(tmp.path())
        .args(["check", "--tree", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not build dependency tree"));
}
