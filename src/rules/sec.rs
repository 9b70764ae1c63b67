//! SEC — security-relevant rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{SEC_001, SEC_002, SEC_003, SEC_004}
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(SEC_001, truncate_usage)),
        Box::new(FnRule(SEC_002, unhashed_password_column)),
        Box::new(FnRule(SEC_003, destructive_statement)),
        Box::new(FnRule(SEC_004, suspect_function_call))
    ]
}

static PASSWORD_COLUMN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[`\"]?\bpassword\b[`\"]?\s+(VARCHAR|CHAR|TEXT)").unwrap());
static SUSPECT_FN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(BENCHMARK|SLEEP|GET_LOCK|RELEASE_LOCK)\s*\(").unwrap());

fn truncate_usage(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind == StatementKind::DdlTruncate {
        Some(Finding::new(SEC_001, 0, "TRUNCATE bypasses row-level triggers and cannot be scoped with WHERE"))
    } else {
        None
    }
}

fn unhashed_password_column(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    if PASSWORD_COLUMN_RE.is_match(&stmt.stripped) {
        Some(Finding::new(SEC_002, 0, "column named `password` appears to store a value directly rather than a hash"))
    } else {
        None
    }
}

fn destructive_statement(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    let destructive = match stmt.kind {
        StatementKind::Delete | StatementKind::DdlTruncate => true,
        StatementKind::DdlDrop => !settings.allow_drop,
        _ => false
    };
    if destructive {
        Some(Finding::new(SEC_003, 0, "statement is a destructive operation"))
    } else {
        None
    }
}

fn suspect_function_call(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if SUSPECT_FN_RE.is_match(&stmt.stripped) {
        Some(Finding::new(SEC_004, 0, "statement calls a function commonly used to probe timing or locking behavior"))
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
    fn flags_truncate() {
        let s = stmt("TRUNCATE TABLE t");
        assert!(truncate_usage(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_password_column() {
        let s = stmt("CREATE TABLE users (password VARCHAR(255))");
        assert!(unhashed_password_column(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_drop_as_destructive() {
        let s = stmt("DROP TABLE t");
        assert!(destructive_statement(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_sleep_call() {
        let s = stmt("SELECT SLEEP(5)");
        assert!(suspect_function_call(&s, &Settings::default()).is_some());
    }
}
