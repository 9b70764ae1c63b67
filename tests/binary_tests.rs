// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use std::io::Write;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    cargo_bin_cmd!("sql-query-advisor")
}

fn queries_file(sql: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    writeln!(f, "{}", sql).unwrap();
    f
}

#[test]
fn test_analyze_clean_query_succeeds() {
    let queries = queries_file("SELECT id FROM users WHERE id = 1;");
    cmd()
        .args(["analyze", "-q", queries.path().to_str().unwrap(), "--no-color"])
        .assert()
        .success();
}

#[test]
fn test_analyze_reports_a_violation() {
    let queries = queries_file("SELECT * FROM users;");
    cmd()
        .args(["analyze", "-q", queries.path().to_str().unwrap(), "--no-color"])
        .assert()
        .stdout(predicate::str::contains("CLA.001"));
}

#[test]
fn test_analyze_missing_queries_file_fails() {
    cmd()
        .args(["analyze", "-q", "/nonexistent/queries.sql"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_analyze_json_format() {
    let queries = queries_file("SELECT * FROM users;");
    cmd()
        .args(["analyze", "-q", queries.path().to_str().unwrap(), "-f", "json", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{"));
}

#[test]
fn test_analyze_sarif_format() {
    let queries = queries_file("SELECT * FROM users;");
    cmd()
        .args(["analyze", "-q", queries.path().to_str().unwrap(), "-f", "sarif", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$schema"));
}

#[test]
fn test_analyze_with_schema_enables_catalog_aware_rules() {
    let mut schema = NamedTempFile::new().unwrap();
    writeln!(
        schema,
        "CREATE TABLE t (id INT PRIMARY KEY, updated_at TIMESTAMP ON UPDATE CURRENT_TIMESTAMP);"
    )
    .unwrap();
    let queries = queries_file("UPDATE t SET id = 1 WHERE id = 1;");

    cmd()
        .args([
            "analyze",
            "-q",
            queries.path().to_str().unwrap(),
            "-s",
            schema.path().to_str().unwrap(),
            "--no-color"
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("RES.011"));
}

#[test]
fn test_analyze_fail_at_threshold_sets_exit_code() {
    let queries = queries_file("DROP TABLE users;");
    cmd()
        .args(["analyze", "-q", queries.path().to_str().unwrap(), "--fail-at", "L1", "--no-color"])
        .assert()
        .failure();
}

#[test]
fn test_analyze_reads_from_stdin() {
    cmd()
        .args(["analyze", "-q", "-", "--no-color"])
        .write_stdin("SELECT * FROM users;")
        .assert()
        .success()
        .stdout(predicate::str::contains("CLA.001"));
}

#[test]
fn test_help() {
    cmd().arg("--help").assert().success();
}

#[test]
fn test_version() {
    cmd().arg("--version").assert().success();
}
