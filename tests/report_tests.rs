// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_advisor::{
    report::{Finding, assemble},
    rules::meta::{CLA_001, COL_001, SEC_001},
    settings::Settings,
    severity::Severity
};

#[test]
fn dedups_repeated_rule_id_keeping_first_content() {
    let findings = vec![vec![Finding::new(CLA_001, 0, "first"), Finding::new(CLA_001, 0, "second")]];
    let report = assemble(&[0], findings, &Settings::default());
    assert_eq!(report.statements[0].findings.len(), 1);
    assert_eq!(report.statements[0].findings[0].content, "first");
}

#[test]
fn sorts_findings_by_severity_descending_then_id_ascending() {
    let findings = vec![vec![Finding::new(COL_001, 0, "a"), Finding::new(SEC_001, 0, "b")]];
    let report = assemble(&[0], findings, &Settings::default());
    assert_eq!(report.statements[0].findings[0].rule_id, "SEC.001");
}

#[test]
fn stamps_statement_index_across_multiple_statements() {
    let findings = vec![
        vec![Finding::new(CLA_001, 0, "first statement")],
        vec![Finding::new(CLA_001, 0, "second statement")],
    ];
    let report = assemble(&[0, 0], findings, &Settings::default());
    assert_eq!(report.statements[0].findings[0].statement_index, 0);
    assert_eq!(report.statements[1].findings[0].statement_index, 1);
}

#[test]
fn severity_override_replaces_the_rules_default_severity() {
    let mut settings = Settings::default();
    settings.severity_overrides.insert("CLA.001".to_string(), Severity::L8);
    let findings = vec![vec![Finding::new(CLA_001, 0, "x")]];
    let report = assemble(&[0], findings, &settings);
    assert_eq!(report.statements[0].findings[0].severity, Severity::L8);
}

#[test]
fn carries_the_fingerprint_through_to_the_statement_report() {
    let findings = vec![vec![]];
    let report = assemble(&[0xDEAD_BEEF], findings, &Settings::default());
    assert_eq!(report.statements[0].fingerprint, 0xDEAD_BEEF);
}

#[test]
fn max_severity_is_none_for_an_empty_report() {
    let report = assemble(&[], vec![], &Settings::default());
    assert!(report.max_severity().is_none());
}

#[test]
fn max_severity_and_total_findings_across_statements() {
    let findings = vec![
        vec![Finding::new(COL_001, 0, "a")],
        vec![Finding::new(SEC_001, 0, "b"), Finding::new(CLA_001, 0, "c")],
    ];
    let report = assemble(&[0, 0], findings, &Settings::default());
    assert_eq!(report.total_findings(), 3);
    assert_eq!(report.max_severity(), Some(SEC_001.severity));
}
