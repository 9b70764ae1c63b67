//! LIT — literal-value rules. `LIT.001` (IP literal) and `LIT.004` (missing
//! statement delimiter) are lexical-probe rules and live in `lexical.rs`.
//!
//! `LIT.002` is a known false-positive source: a bare date-shaped token
//! inside a multi-row `INSERT ... VALUES (...), (...)` list can sit next to
//! punctuation the quote-adjacency check does not recognize, and numeric
//! literals that merely look date-shaped (a phone extension, a version
//! string) are not distinguished from a genuine column of type DATE.
//! Opt out per-statement-kind via the disabled-rule list rather than special
//! casing `INSERT` here.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{LIT_002, LIT_003}
    },
    settings::Settings,
    statement::Statement
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(FnRule(LIT_002, unquoted_date_literal)), Box::new(FnRule(LIT_003, csv_in_a_column))]
}

static DATE_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());
static QUOTED_CSV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*,[^']*)'").unwrap());

fn unquoted_date_literal(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let text = &stmt.stripped;
    for m in DATE_SHAPE_RE.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        if !matches!(before, Some('\'') | Some('"')) && !matches!(after, Some('\'') | Some('"')) {
            return Some(Finding::new(LIT_002, 0, "date/time-shaped literal is not quoted as a string"));
        }
    }
    None
}

fn csv_in_a_column(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    for cap in QUOTED_CSV_RE.captures_iter(&stmt.stripped) {
        if cap[1].split(',').all(|part| !part.trim().is_empty()) {
            return Some(Finding::new(LIT_003, 0, "string literal looks like a comma-separated list stored in one column"));
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
    fn flags_unquoted_date() {
        let s = stmt("SELECT * FROM t WHERE d = 2024-01-01");
        assert!(unquoted_date_literal(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_quoted_date() {
        let s = stmt("SELECT * FROM t WHERE d = '2024-01-01'");
        assert!(unquoted_date_literal(&s, &Settings::default()).is_none());
    }

    #[test]
    fn flags_csv_in_column() {
        let s = stmt("INSERT INTO t (tags) VALUES ('a,b,c')");
        assert!(csv_in_a_column(&s, &Settings::default()).is_some());
    }
}
