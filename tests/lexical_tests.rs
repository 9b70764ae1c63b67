// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_advisor::{lexical::probe, settings::Settings};

#[test]
fn invisible_unicode_outside_literal_fires_kwr_005() {
    let sql = "SELECT\u{200B} 1 FROM t";
    let findings = probe(sql, &Settings::default());
    assert!(findings.iter().any(|f| f.rule_id == "KWR.005"));
}

#[test]
fn missing_delimiter_between_statements_fires_lit_004() {
    let sql = "SELECT * FROM t)\nSELECT * FROM u";
    let findings = probe(sql, &Settings::default());
    assert!(findings.iter().any(|f| f.rule_id == "LIT.004"));
}

#[test]
fn ip_literal_in_insert_value_fires_lit_001() {
    let sql = "INSERT INTO hosts (ip) VALUES ('10.0.0.1')";
    let findings = probe(sql, &Settings::default());
    assert!(findings.iter().any(|f| f.rule_id == "LIT.001"));
}

#[test]
fn ip_literal_in_grant_host_is_not_flagged() {
    let sql = "GRANT ALL ON db.* TO 'user'@'10.0.0.1'";
    let findings = probe(sql, &Settings::default());
    assert!(!findings.iter().any(|f| f.rule_id == "LIT.001"));
}

#[test]
fn load_data_infile_fires_res_008() {
    let sql = "LOAD DATA INFILE '/tmp/x.csv' INTO TABLE t";
    let findings = probe(sql, &Settings::default());
    assert!(findings.iter().any(|f| f.rule_id == "RES.008"));
}

#[test]
fn select_into_outfile_fires_res_008() {
    let sql = "SELECT * FROM t INTO OUTFILE '/tmp/out.csv'";
    let findings = probe(sql, &Settings::default());
    assert!(findings.iter().any(|f| f.rule_id == "RES.008"));
}

#[test]
fn full_width_quote_in_literal_fires_arg_013() {
    let sql = "SELECT \u{201C}abc\u{201D} FROM t";
    let findings = probe(sql, &Settings::default());
    assert!(findings.iter().any(|f| f.rule_id == "ARG.013"));
}

#[test]
fn ordinary_statement_produces_no_lexical_findings() {
    let sql = "SELECT id, name FROM users WHERE id = 1";
    let findings = probe(sql, &Settings::default());
    assert!(findings.is_empty());
}

#[test]
fn disabling_a_lexical_rule_suppresses_it() {
    let sql = "SELECT\u{200B} 1 FROM t";
    let mut settings = Settings::default();
    settings.disabled_rules.insert("KWR.005".to_string());
    let findings = probe(sql, &settings);
    assert!(!findings.iter().any(|f| f.rule_id == "KWR.005"));
}
