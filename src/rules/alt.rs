//! ALT — `ALTER TABLE` rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{ALT_001, ALT_003, ALT_004}
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(ALT_001, charset_change_without_column_change)),
        Box::new(FnRule(ALT_003, drop_column)),
        Box::new(FnRule(ALT_004, drop_key))
    ]
}

static CHARSET_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:CHARACTER\s+SET|CHARSET)\s*=?\s*\w+").unwrap());
static COLUMN_MODIFY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(MODIFY|CHANGE)\s+(?:COLUMN\s+)?\w+").unwrap());
static DROP_COLUMN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bDROP\s+COLUMN\b").unwrap());
static DROP_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bDROP\s+(?:PRIMARY\s+KEY|FOREIGN\s+KEY)\b").unwrap());

fn charset_change_without_column_change(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlAlterTable {
        return None;
    }
    if CHARSET_CLAUSE_RE.is_match(&stmt.stripped) && !COLUMN_MODIFY_RE.is_match(&stmt.stripped) {
        Some(Finding::new(ALT_001, 0, "ALTER TABLE changes the table's default charset without converting existing columns"))
    } else {
        None
    }
}

fn drop_column(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlAlterTable {
        return None;
    }
    if DROP_COLUMN_RE.is_match(&stmt.stripped) {
        Some(Finding::new(ALT_003, 0, "ALTER TABLE ... DROP COLUMN is a destructive, hard-to-reverse schema change"))
    } else {
        None
    }
}

fn drop_key(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlAlterTable {
        return None;
    }
    if DROP_KEY_RE.is_match(&stmt.stripped) {
        Some(Finding::new(ALT_004, 0, "ALTER TABLE ... DROP PRIMARY/FOREIGN KEY removes a structural constraint"))
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
    fn flags_charset_change() {
        let s = stmt("ALTER TABLE t CHARACTER SET utf8mb4");
        assert!(charset_change_without_column_change(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_drop_column() {
        let s = stmt("ALTER TABLE t DROP COLUMN a");
        assert!(drop_column(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_drop_primary_key() {
        let s = stmt("ALTER TABLE t DROP PRIMARY KEY");
        assert!(drop_key(&s, &Settings::default()).is_some());
    }
}
