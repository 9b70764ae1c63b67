//! Component A: the lexical probe. Cheap regex/scan checks over raw
//! statement text that run before (and independent of) parsing. These are
//! all *absolute* rules — they fire even when the statement fails to parse.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::meta::{ARG_013, KWR_005, LIT_001, LIT_004, RES_008},
    settings::Settings
};

static INVISIBLE_CHARS: &[char] = &[
    '\u{00A0}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}', '\u{2060}', '\u{180E}'
];

static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b").unwrap());

static LOAD_DATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)LOAD\s+(?:/\*.*?\*/\s*)?DATA").unwrap());

static INTO_OUTFILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SELECT\b[\s\S]*\bINTO\s+OUTFILE").unwrap());

static STRING_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*""#).unwrap());

static FULL_WIDTH_QUOTE_CHARS: &[char] = &['\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Run every lexical-probe inspection against `raw`. Never fails.
pub fn probe(raw: &str, settings: &Settings) -> Vec<Finding> {
    let mut findings = Vec::new();

    if !settings.is_disabled(KWR_005.id) {
        if let Some(f) = invisible_unicode(raw) {
            findings.push(f);
        }
    }
    if !settings.is_disabled(LIT_004.id) {
        if let Some(f) = missing_delimiter(raw) {
            findings.push(f);
        }
    }
    if !settings.is_disabled(LIT_001.id) {
        if let Some(f) = ip_literal_in_value(raw) {
            findings.push(f);
        }
    }
    if !settings.is_disabled(RES_008.id) {
        if let Some(f) = file_load(raw) {
            findings.push(f);
        }
    }
    if !settings.is_disabled(ARG_013.id) {
        if let Some(f) = full_width_quote(raw) {
            findings.push(f);
        }
    }

    findings
}

/// `KWR.005` — invisible/zero-width Unicode outside string literals.
fn invisible_unicode(raw: &str) -> Option<Finding> {
    for (start, _) in STRING_LITERAL_RE.find_iter(raw).map(|m| (m.start(), m.end())) {
        let _ = start;
    }
    let masked = mask_string_literals(raw);
    if masked.chars().any(|c| INVISIBLE_CHARS.contains(&c)) {
        Some(Finding::new(KWR_005, 0, "invisible Unicode code point outside a string literal"))
    } else {
        None
    }
}

/// `LIT.004` — apparent multiple statements without an intervening `;`, or a
/// single unterminated statement followed by another statement keyword.
fn missing_delimiter(raw: &str) -> Option<Finding> {
    static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)\)\s*\n\s*(SELECT|INSERT|UPDATE|DELETE|REPLACE|CREATE|DROP|ALTER|TRUNCATE)\b").unwrap()
    });
    let masked = mask_string_literals(raw);
    if KEYWORD_RE.is_match(&masked) {
        return Some(Finding::new(LIT_004, 0, "statement boundary without a terminating `;`"));
    }
    None
}

/// `LIT.001` — IPv4 literal inside an INSERT/REPLACE/UPDATE string value,
/// suppressed for GRANT/CREATE USER host parts.
fn ip_literal_in_value(raw: &str) -> Option<Finding> {
    let upper = raw.to_ascii_uppercase();
    if upper.contains("GRANT") || upper.contains("CREATE USER") {
        return None;
    }
    if !(upper.contains("INSERT") || upper.contains("REPLACE") || upper.contains("UPDATE")) {
        return None;
    }
    for m in STRING_LITERAL_RE.find_iter(raw) {
        if IPV4_RE.is_match(m.as_str()) {
            return Some(Finding::new(LIT_001, 0, "IPv4 literal stored as a string value"));
        }
    }
    None
}

/// `RES.008` — `LOAD DATA` or `SELECT ... INTO OUTFILE`.
fn file_load(raw: &str) -> Option<Finding> {
    if LOAD_DATA_RE.is_match(raw) || INTO_OUTFILE_RE.is_match(raw) {
        Some(Finding::new(RES_008, 0, "statement reads or writes a server-side file"))
    } else {
        None
    }
}

/// `ARG.013` — full-width/curly quote characters inside string literals.
fn full_width_quote(raw: &str) -> Option<Finding> {
    for m in STRING_LITERAL_RE.find_iter(raw) {
        if m.as_str().chars().any(|c| FULL_WIDTH_QUOTE_CHARS.contains(&c)) {
            return Some(Finding::new(
                ARG_013,
                0,
                "full-width quote character inside a string literal"
            ));
        }
    }
    None
}

/// Replace the contents of string literals with spaces, preserving length,
/// so regex scans that should ignore literal contents (or should only see
/// literal contents) can run without a real tokenizer.
fn mask_string_literals(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last = 0;
    for m in STRING_LITERAL_RE.find_iter(raw) {
        out.push_str(&raw[last..m.start()]);
        out.push_str(&" ".repeat(m.as_str().chars().count()));
        last = m.end();
    }
    out.push_str(&raw[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_invisible_unicode_outside_literal() {
        let sql = "SELECT\u{200B} 1 FROM t";
        let settings = Settings::default();
        let findings = probe(sql, &settings);
        assert!(findings.iter().any(|f| f.rule_id == "KWR.005"));
    }

    #[test]
    fn ignores_invisible_unicode_inside_literal() {
        let sql = "SELECT '\u{00A0}' FROM t";
        let settings = Settings::default();
        let findings = probe(sql, &settings);
        assert!(!findings.iter().any(|f| f.rule_id == "KWR.005"));
    }

    #[test]
    fn detects_ip_literal_in_insert() {
        let sql = "INSERT INTO hosts (ip) VALUES ('192.168.1.1')";
        let settings = Settings::default();
        let findings = probe(sql, &settings);
        assert!(findings.iter().any(|f| f.rule_id == "LIT.001"));
    }

    #[test]
    fn ignores_ip_literal_in_grant() {
        let sql = "GRANT ALL ON db.* TO 'user'@'192.168.1.1'";
        let settings = Settings::default();
        let findings = probe(sql, &settings);
        assert!(!findings.iter().any(|f| f.rule_id == "LIT.001"));
    }

    #[test]
    fn detects_load_data() {
        let sql = "LOAD DATA INFILE '/tmp/x.csv' INTO TABLE t";
        let settings = Settings::default();
        let findings = probe(sql, &settings);
        assert!(findings.iter().any(|f| f.rule_id == "RES.008"));
    }

    #[test]
    fn detects_full_width_quote() {
        let sql = "SELECT \u{201C}abc\u{201D} FROM t";
        let settings = Settings::default();
        let findings = probe(sql, &settings);
        assert!(findings.iter().any(|f| f.rule_id == "ARG.013"));
    }

    #[test]
    fn disabled_rule_is_skipped() {
        let sql = "SELECT\u{200B} 1 FROM t";
        let mut settings = Settings::default();
        settings.disabled_rules.insert("KWR.005".to_string());
        let findings = probe(sql, &settings);
        assert!(!findings.iter().any(|f| f.rule_id == "KWR.005"));
    }
}
