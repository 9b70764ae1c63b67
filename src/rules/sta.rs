//! STA — style/convention rules. `STA.001` and `STA.002` are marked
//! absolute in the catalog: they are plain text checks that do not need a
//! parsed AST, so they still run on statements the parser rejected.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{STA_001, STA_002, STA_003, STA_004}
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(STA_001, nonstandard_inequality)),
        Box::new(FnRule(STA_002, whitespace_after_dot)),
        Box::new(FnRule(STA_003, index_naming_convention)),
        Box::new(FnRule(STA_004, noncanonical_identifier_chars))
    ]
}

static BANG_EQ_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!=").unwrap());
static WHITESPACE_DOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w\s+\.\s*\w|\w\s*\.\s+\w").unwrap());
static CREATE_INDEX_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CREATE\s+(?:UNIQUE\s+)?INDEX\s+[`\"]?(\w+)[`\"]?").unwrap());
static BACKTICKED_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static CANONICAL_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

fn nonstandard_inequality(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if BANG_EQ_RE.is_match(&stmt.stripped) {
        Some(Finding::new(STA_001, 0, "!= is used instead of the standard <>"))
    } else {
        None
    }
}

fn whitespace_after_dot(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if WHITESPACE_DOT_RE.is_match(&stmt.stripped) {
        Some(Finding::new(STA_002, 0, "qualified identifier has whitespace around its `.` separator"))
    } else {
        None
    }
}

fn index_naming_convention(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateIndex {
        return None;
    }
    let name = CREATE_INDEX_NAME_RE.captures(&stmt.stripped)?.get(1)?.as_str();
    let lower = name.to_ascii_lowercase();
    if lower.starts_with("idx_") || lower.starts_with("uk_") {
        None
    } else {
        Some(Finding::new(STA_003, 0, format!("index name `{}` lacks the idx_/uk_ prefix convention", name)))
    }
}

fn noncanonical_identifier_chars(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    for cap in BACKTICKED_IDENT_RE.captures_iter(&stmt.stripped) {
        if !CANONICAL_IDENT_RE.is_match(&cap[1]) {
            return Some(Finding::new(STA_004, 0, format!("identifier `{}` contains characters outside [A-Za-z0-9_]", &cap[1])));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SqlDialect, parse_statements};

    fn stmt(sql: &str) -> Statement {
        parse_statements(sql, SqlDialect::MySql).remove(0)
    }

    #[test]
    fn flags_bang_eq() {
        let s = stmt("SELECT * FROM t WHERE a != 1");
        assert!(nonstandard_inequality(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_whitespace_after_dot() {
        let s = stmt("SELECT t. a FROM t");
        assert!(whitespace_after_dot(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_index_without_prefix() {
        let s = stmt("CREATE INDEX a_idx ON t (a)");
        assert!(index_naming_convention(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_noncanonical_identifier() {
        let s = stmt("CREATE TABLE `my-table` (a INT)");
        assert!(noncanonical_identifier_chars(&s, &Settings::default()).is_some());
    }
}
