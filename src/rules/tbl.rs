//! TBL — table-level DDL rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{TBL_001, TBL_002, TBL_003, TBL_004, TBL_005, TBL_006, TBL_007, TBL_008}
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(TBL_001, partitioned_table)),
        Box::new(FnRule(TBL_002, engine_not_allowlisted)),
        Box::new(FnRule(TBL_003, table_named_dual)),
        Box::new(FnRule(TBL_004, unexpected_auto_increment_start)),
        Box::new(FnRule(TBL_005, charset_not_allowlisted)),
        Box::new(FnRule(TBL_006, create_view)),
        Box::new(FnRule(TBL_007, create_temporary_table)),
        Box::new(FnRule(TBL_008, collation_not_allowlisted))
    ]
}

static PARTITION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bPARTITION\s+BY\b").unwrap());
static ENGINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bENGINE\s*=\s*(\w+)").unwrap());
static CREATE_TABLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CREATE\s+(?:TEMPORARY\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?[`\"]?([\w.]+)[`\"]?").unwrap());
static AUTO_INCREMENT_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bAUTO_INCREMENT\s*=\s*(\d+)").unwrap());
static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:DEFAULT\s+)?CHARSET\s*=\s*(\w+)").unwrap());
static TEMPORARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bCREATE\s+TEMPORARY\s+TABLE\b").unwrap());
static COLLATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bCOLLATE\s*=?\s*(\w+)").unwrap());

const EXPECTED_AUTO_INCREMENT_START: u64 = 1;

fn partitioned_table(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    if PARTITION_RE.is_match(&stmt.stripped) {
        Some(Finding::new(TBL_001, 0, "table is partitioned; confirm the partition key matches actual query patterns"))
    } else {
        None
    }
}

fn engine_not_allowlisted(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let cap = ENGINE_RE.captures(&stmt.stripped)?;
    let engine = &cap[1];
    if settings.allow_engines.iter().any(|e| e.eq_ignore_ascii_case(engine)) {
        None
    } else {
        Some(Finding::new(TBL_002, 0, format!("storage engine `{}` is not on the configured allow-list", engine)))
    }
}

fn table_named_dual(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let name = CREATE_TABLE_NAME_RE.captures(&stmt.stripped)?.get(1)?.as_str();
    let short = name.rsplit('.').next().unwrap_or(name);
    if short.eq_ignore_ascii_case("dual") {
        Some(Finding::new(TBL_003, 0, "table is literally named `dual`, shadowing MySQL's pseudo-table"))
    } else {
        None
    }
}

fn unexpected_auto_increment_start(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let cap = AUTO_INCREMENT_START_RE.captures(&stmt.stripped)?;
    let start: u64 = cap[1].parse().ok()?;
    if start != EXPECTED_AUTO_INCREMENT_START {
        Some(Finding::new(TBL_004, 0, format!("AUTO_INCREMENT starts at {}, not the expected {}", start, EXPECTED_AUTO_INCREMENT_START)))
    } else {
        None
    }
}

fn charset_not_allowlisted(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let cap = CHARSET_RE.captures(&stmt.stripped)?;
    let charset = &cap[1];
    if settings.allow_charsets.iter().any(|c| c.eq_ignore_ascii_case(charset)) {
        None
    } else {
        Some(Finding::new(TBL_005, 0, format!("character set `{}` is not on the configured allow-list", charset)))
    }
}

fn create_view(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind == StatementKind::DdlCreateView {
        Some(Finding::new(TBL_006, 0, "statement creates a view; confirm it is tracked the same as table schema"))
    } else {
        None
    }
}

fn create_temporary_table(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind == StatementKind::DdlCreateTable && TEMPORARY_RE.is_match(&stmt.stripped) {
        Some(Finding::new(TBL_007, 0, "temporary table is invisible to schema tooling and most catalogs"))
    } else {
        None
    }
}

fn collation_not_allowlisted(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let cap = COLLATE_RE.captures(&stmt.stripped)?;
    let collation = &cap[1];
    if settings.allow_collations.iter().any(|c| c.eq_ignore_ascii_case(collation)) {
        None
    } else {
        Some(Finding::new(TBL_008, 0, format!("collation `{}` is not on the configured allow-list", collation)))
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
    fn flags_partitioned_table() {
        let s = stmt("CREATE TABLE t (a INT) PARTITION BY HASH(a)");
        assert!(partitioned_table(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_disallowed_engine() {
        let s = stmt("CREATE TABLE t (a INT) ENGINE=MyISAM");
        assert!(engine_not_allowlisted(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_allowed_engine() {
        let s = stmt("CREATE TABLE t (a INT) ENGINE=InnoDB");
        assert!(engine_not_allowlisted(&s, &Settings::default()).is_none());
    }

    #[test]
    fn flags_table_named_dual() {
        let s = stmt("CREATE TABLE dual (a INT)");
        assert!(table_named_dual(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_temporary_table() {
        let s = stmt("CREATE TEMPORARY TABLE t (a INT)");
        assert!(create_temporary_table(&s, &Settings::default()).is_some());
    }
}
