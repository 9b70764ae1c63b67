//! LCK — locking behavior rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{LCK_001, LCK_002}
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(FnRule(LCK_001, insert_select)), Box::new(FnRule(LCK_002, insert_on_duplicate_key_update))]
}

static INSERT_SELECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)^\s*(?:REPLACE|INSERT)\b[^;]*\bSELECT\b").unwrap());
static ON_DUPLICATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bON\s+DUPLICATE\s+KEY\s+UPDATE\b").unwrap());

fn insert_select(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if !stmt.kind.is_insert_like() {
        return None;
    }
    if INSERT_SELECT_RE.is_match(&stmt.stripped) {
        Some(Finding::new(LCK_001, 0, "INSERT ... SELECT holds locks on the source rows for the duration of the copy"))
    } else {
        None
    }
}

fn insert_on_duplicate_key_update(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if !stmt.kind.is_insert_like() {
        return None;
    }
    if ON_DUPLICATE_RE.is_match(&stmt.stripped) {
        Some(Finding::new(LCK_002, 0, "ON DUPLICATE KEY UPDATE takes a row lock even on the no-op branch"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SqlDialect, parse_statements};

    fn stmt(sql: &str) -> Statement {
        parse_statements(sql, SqlDialect::MySql).remove(0)
    }

    #[test]
    fn flags_insert_select() {
        let s = stmt("INSERT INTO t SELECT * FROM src");
        assert!(insert_select(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_on_duplicate_key_update() {
        let s = stmt("INSERT INTO t (id,a) VALUES (1,2) ON DUPLICATE KEY UPDATE a = 2");
        assert!(insert_on_duplicate_key_update(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_plain_insert() {
        let s = stmt("INSERT INTO t (id,a) VALUES (1,2)");
        assert!(insert_select(&s, &Settings::default()).is_none());
        assert!(insert_on_duplicate_key_update(&s, &Settings::default()).is_none());
    }
}
