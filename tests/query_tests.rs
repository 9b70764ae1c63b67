// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_advisor::{
    parser::{SqlDialect, parse_statements},
    statement::StatementKind
};

#[test]
fn parses_a_simple_select() {
    let stmts = parse_statements("SELECT id, name FROM users WHERE id = 1", SqlDialect::MySql);
    assert_eq!(stmts.len(), 1);
    assert_eq!(stmts[0].kind, StatementKind::Select);
    assert!(stmts[0].ast.is_some());
    assert!(stmts[0].parse_error.is_none());
}

#[test]
fn parses_an_insert() {
    let stmts = parse_statements("INSERT INTO users (id, name) VALUES (1, 'a')", SqlDialect::MySql);
    assert_eq!(stmts[0].kind, StatementKind::Insert);
}

#[test]
fn parses_an_update() {
    let stmts = parse_statements("UPDATE users SET name = 'b' WHERE id = 1", SqlDialect::MySql);
    assert_eq!(stmts[0].kind, StatementKind::Update);
}

#[test]
fn parses_a_delete() {
    let stmts = parse_statements("DELETE FROM users WHERE id = 1", SqlDialect::MySql);
    assert_eq!(stmts[0].kind, StatementKind::Delete);
}

#[test]
fn splits_multiple_statements_on_semicolons() {
    let stmts = parse_statements("SELECT * FROM a; SELECT * FROM b;", SqlDialect::MySql);
    assert_eq!(stmts.len(), 2);
}

#[test]
fn a_statement_that_fails_to_parse_still_yields_a_statement_value() {
    let stmts = parse_statements("SELEC * FORM t", SqlDialect::MySql);
    assert_eq!(stmts.len(), 1);
    assert!(stmts[0].ast.is_none());
    assert!(stmts[0].parse_error.is_some());
}

#[test]
fn truncate_is_classified_as_ddl_truncate() {
    let stmts = parse_statements("TRUNCATE TABLE users", SqlDialect::MySql);
    assert_eq!(stmts[0].kind, StatementKind::DdlTruncate);
}

#[test]
fn create_table_is_classified_as_ddl_create_table() {
    let stmts = parse_statements("CREATE TABLE users (id INT PRIMARY KEY)", SqlDialect::MySql);
    assert_eq!(stmts[0].kind, StatementKind::DdlCreateTable);
}

#[test]
fn identical_statements_share_a_fingerprint() {
    let a = parse_statements("SELECT * FROM t WHERE id = 1", SqlDialect::MySql);
    let b = parse_statements("SELECT * FROM t WHERE id = 1", SqlDialect::MySql);
    assert_eq!(a[0].fingerprint, b[0].fingerprint);
}

#[test]
fn distinct_statements_do_not_share_a_fingerprint() {
    let a = parse_statements("SELECT * FROM t WHERE id = 1", SqlDialect::MySql);
    let b = parse_statements("SELECT * FROM u WHERE id = 2", SqlDialect::MySql);
    assert_ne!(a[0].fingerprint, b[0].fingerprint);
}
