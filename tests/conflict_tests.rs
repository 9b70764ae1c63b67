// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_advisor::{
    conflict::resolve,
    report::Finding,
    rules::meta::{CLA_001, CLA_014, CLA_015, COL_001, RES_006, RES_007, SEC_001, SEC_002, SEC_003}
};

#[test]
fn destructive_statement_suppresses_no_where() {
    let findings = vec![Finding::new(SEC_003, 0, "destructive"), Finding::new(CLA_001, 0, "no where")];
    let resolved = resolve(findings);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].rule_id, "SEC.003");
}

#[test]
fn destructive_statement_suppresses_delete_without_where_too() {
    let findings = vec![Finding::new(SEC_003, 0, "destructive"), Finding::new(CLA_014, 0, "delete no where")];
    let resolved = resolve(findings);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].rule_id, "SEC.003");
}

#[test]
fn truncate_suppresses_insert_select_without_where() {
    let findings = vec![Finding::new(SEC_001, 0, "truncate"), Finding::new(CLA_015, 0, "insert select no where")];
    let resolved = resolve(findings);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].rule_id, "SEC.001");
}

#[test]
fn meaningless_where_suppresses_no_where() {
    let findings = vec![Finding::new(RES_007, 0, "meaningless"), Finding::new(CLA_001, 0, "no where")];
    let resolved = resolve(findings);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].rule_id, "RES.007");
}

#[test]
fn impossible_where_suppresses_no_where() {
    let findings = vec![Finding::new(RES_006, 0, "impossible"), Finding::new(CLA_001, 0, "no where")];
    let resolved = resolve(findings);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].rule_id, "RES.006");
}

#[test]
fn unhashed_password_does_not_suppress_unrelated_findings() {
    let findings = vec![Finding::new(SEC_002, 0, "password"), Finding::new(COL_001, 0, "unrelated")];
    let resolved = resolve(findings);
    assert_eq!(resolved.len(), 2);
}

#[test]
fn no_dominator_present_leaves_findings_untouched() {
    let findings = vec![Finding::new(CLA_001, 0, "no where"), Finding::new(COL_001, 0, "unrelated")];
    let resolved = resolve(findings);
    assert_eq!(resolved.len(), 2);
}

#[test]
fn resolving_twice_is_idempotent() {
    let findings = vec![Finding::new(SEC_003, 0, "destructive"), Finding::new(CLA_001, 0, "no where")];
    let once = resolve(findings);
    let twice = resolve(once.clone());
    assert_eq!(once.len(), twice.len());
}
