use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("regscope").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("titles"))
        .stdout(predicate::str::contains("latest"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_titles_on_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("regscope.db");

    let mut cmd = Command::cargo_bin("regscope").unwrap();
    cmd.env("DATABASE_URL", format!("sqlite:{}", db_path.display()))
        .arg("titles")
        .assert()
        .success()
        .stdout(predicate::str::contains("No snapshots recorded yet."));
}

#[test]
fn test_latest_on_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("regscope.db");

    let mut cmd = Command::cargo_bin("regscope").unwrap();
    cmd.env("DATABASE_URL", format!("sqlite:{}", db_path.display()))
        .args(["latest", "29"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No snapshots for title 29."));
}

#[test]
fn test_history_on_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("regscope.db");

    let mut cmd = Command::cargo_bin("regscope").unwrap();
    cmd.env("DATABASE_URL", format!("sqlite:{}", db_path.display()))
        .args(["history", "29"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No snapshots for title 29."));
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("regscope").unwrap();
    cmd.arg("frobnicate").assert().failure();
}

#[test]
fn test_rejects_zero_concurrency() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("regscope.db");

    let mut cmd = Command::cargo_bin("regscope").unwrap();
    cmd.env("DATABASE_URL", format!("sqlite:{}", db_path.display()))
        .env("REGSCOPE_MAX_CONCURRENCY", "0")
        .arg("titles")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REGSCOPE_MAX_CONCURRENCY"));
}
