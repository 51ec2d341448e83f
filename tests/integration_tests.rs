//! Integration tests for the hookrun CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn git_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    git2::Repository::init(dir.path()).unwrap();
    dir
}

const POLICY: &str = r#"
repos:
  - repo: local
    hooks:
      - id: echo-files
        name: echo files
        entry: echo
        types: [text]
"#;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pre-commit hook runner"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hookrun"));
}

#[test]
fn test_invalid_subcommand() {
    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_validate_accepts_good_policy() {
    let dir = git_repo();
    fs::write(dir.path().join(".hookrun.yaml"), POLICY).unwrap();

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("policy is valid"));
}

#[test]
fn test_validate_rejects_missing_rev() {
    let dir = git_repo();
    fs::write(
        dir.path().join(".hookrun.yaml"),
        "repos:\n  - repo: https://example.com/hooks\n    hooks:\n      - id: x\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("rev"));
}

#[test]
fn test_validate_requires_a_policy_file() {
    let dir = git_repo();

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no policy file found"));
}

#[test]
fn test_init_writes_default_policy() {
    let dir = git_repo();

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path()).arg("init").assert().success();

    let written = fs::read_to_string(dir.path().join(".hookrun.yaml")).unwrap();
    assert!(written.contains("repo: local"));

    // Second init without --force must refuse.
    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_list_text_and_json() {
    let dir = git_repo();
    fs::write(dir.path().join(".hookrun.yaml"), POLICY).unwrap();

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("echo-files"));

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"echo-files\""));
}

#[test]
fn test_install_and_uninstall() {
    let dir = git_repo();
    fs::write(dir.path().join(".hookrun.yaml"), POLICY).unwrap();

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path()).arg("install").assert().success();

    let script = dir.path().join(".git/hooks/pre-commit");
    let content = fs::read_to_string(&script).unwrap();
    assert!(content.contains("hookrun run pre-commit"));

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .arg("uninstall")
        .assert()
        .success();
    assert!(!script.exists());
}

#[test]
fn test_run_with_explicit_files() {
    let dir = git_repo();
    fs::write(dir.path().join(".hookrun.yaml"), POLICY).unwrap();
    fs::write(dir.path().join("note.md"), "# hi\n").unwrap();

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .env("HOOKRUN_CACHE", dir.path().join("cache"))
        .args(["run", "pre-commit", "--files", "note.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("echo files"));
}

#[test]
fn test_files_flag_repeats_and_keeps_commas() {
    let dir = git_repo();
    fs::write(
        dir.path().join(".hookrun.yaml"),
        r#"
repos:
  - repo: local
    hooks:
      - id: ls-files
        name: ls files
        entry: ls
        types: [text]
"#,
    )
    .unwrap();
    fs::write(dir.path().join("a,b.md"), "# comma\n").unwrap();
    fs::write(dir.path().join("note.md"), "# hi\n").unwrap();

    // `ls` exits non-zero on any missing path, so this only passes if the
    // comma path reaches the hook as one filename.
    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .env("HOOKRUN_CACHE", dir.path().join("cache"))
        .args([
            "run",
            "pre-commit",
            "--files",
            "a,b.md",
            "--files",
            "note.md",
        ])
        .assert()
        .success();
}

#[test]
fn test_run_unknown_hook_id_fails() {
    let dir = git_repo();
    fs::write(dir.path().join(".hookrun.yaml"), POLICY).unwrap();

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .env("HOOKRUN_CACHE", dir.path().join("cache"))
        .args(["run", "pre-commit", "--hook", "no-such-hook"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no hook with id"));
}

#[test]
fn test_run_reports_hook_failure() {
    let dir = git_repo();
    fs::write(
        dir.path().join(".hookrun.yaml"),
        r#"
repos:
  - repo: local
    hooks:
      - id: always-fails
        name: always fails
        entry: "false"
        pass_filenames: false
        always_run: true
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("hookrun").unwrap();
    cmd.current_dir(dir.path())
        .env("HOOKRUN_CACHE", dir.path().join("cache"))
        .args(["run", "pre-commit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("always fails"));
}
