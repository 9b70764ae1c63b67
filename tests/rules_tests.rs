// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_advisor::{analyze, parser::SqlDialect, settings::Settings};

fn rule_ids(sql: &str) -> Vec<&'static str> {
    let report = analyze(sql, SqlDialect::MySql, &Settings::default());
    report.statements[0].findings.iter().map(|f| f.rule_id).collect()
}

#[test]
fn select_star_without_where_fires_cla_001() {
    assert!(rule_ids("SELECT * FROM users").contains(&"CLA.001"));
}

#[test]
fn delete_without_where_fires_cla_014_not_cla_001() {
    let ids = rule_ids("DELETE FROM users");
    assert!(ids.contains(&"CLA.014"));
    assert!(!ids.contains(&"CLA.001"));
}

#[test]
fn insert_select_without_where_fires_cla_015() {
    assert!(rule_ids("INSERT INTO archive SELECT * FROM users").contains(&"CLA.015"));
}

#[test]
fn order_by_rand_fires_cla_002() {
    assert!(rule_ids("SELECT id FROM users ORDER BY RAND() LIMIT 1").contains(&"CLA.002"));
}

#[test]
fn group_by_across_tables_fires_cla_006() {
    let sql = "SELECT a.x, b.y FROM a JOIN b ON a.id = b.id GROUP BY a.x, b.y";
    assert!(rule_ids(sql).contains(&"CLA.006"));
}

#[test]
fn impossible_where_on_string_literals_fires_res_006() {
    assert!(rule_ids("SELECT * FROM t WHERE 'a' = 'b'").contains(&"RES.006"));
}

#[test]
fn distinct_literal_equality_does_not_fire_res_006() {
    assert!(!rule_ids("SELECT * FROM t WHERE 'a' = 'a'").contains(&"RES.006"));
}

#[test]
fn bare_truthy_literal_where_fires_res_007() {
    assert!(rule_ids("SELECT * FROM t WHERE 1").contains(&"RES.007"));
    assert!(rule_ids("SELECT * FROM t WHERE true").contains(&"RES.007"));
    assert!(rule_ids("SELECT * FROM t WHERE 'a'").contains(&"RES.007"));
}

#[test]
fn bare_falsy_literal_where_does_not_fire_res_007() {
    assert!(!rule_ids("SELECT * FROM t WHERE 0").contains(&"RES.007"));
}

#[test]
fn cross_database_join_fires_joi_008() {
    assert!(rule_ids("SELECT * FROM db1.a JOIN db2.b ON a.id = b.id").contains(&"JOI.008"));
}

#[test]
fn duplicate_joined_table_fires_joi_002() {
    assert!(rule_ids("SELECT * FROM a JOIN a AS a2 ON a.id = a2.id JOIN a ON a.id = a.id").contains(&"JOI.002"));
}

#[test]
fn destructive_delete_suppresses_the_no_where_finding() {
    let ids = rule_ids("DELETE FROM users");
    assert!(ids.contains(&"SEC.003"));
    assert!(!ids.contains(&"CLA.014"));
}

#[test]
fn select_with_where_has_no_clause_findings() {
    let ids = rule_ids("SELECT * FROM users WHERE id = 1");
    assert!(!ids.contains(&"CLA.001"));
    assert!(!ids.contains(&"RES.006"));
    assert!(!ids.contains(&"RES.007"));
}

#[test]
fn disabled_rule_never_appears_in_the_report() {
    let mut settings = Settings::default();
    settings.disabled_rules.insert("CLA.001".to_string());
    let report = analyze("SELECT * FROM users", SqlDialect::MySql, &settings);
    assert!(!report.statements[0].findings.iter().any(|f| f.rule_id == "CLA.001"));
}
