//! KWR — keyword/identifier rules. `KWR.005` (invisible Unicode) is a
//! lexical-probe rule and lives in `lexical.rs`, not here.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{KWR_001, KWR_002, KWR_003, KWR_004}
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(KWR_001, sql_calc_found_rows)),
        Box::new(FnRule(KWR_002, reserved_word_identifier)),
        Box::new(FnRule(KWR_003, plural_table_name)),
        Box::new(FnRule(KWR_004, multi_byte_identifier))
    ]
}

static SQL_CALC_FOUND_ROWS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSQL_CALC_FOUND_ROWS\b").unwrap());
static CREATE_TABLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?[`\"]?([\w.]+)[`\"]?").unwrap());
static BACKTICKED_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(\w+)`").unwrap());

const RESERVED_WORDS: &[&str] = &[
    "ORDER", "GROUP", "SELECT", "FROM", "WHERE", "TABLE", "KEY", "INDEX", "CHECK", "CONDITION",
    "LIMIT", "OFFSET", "MATCH", "RANGE", "ROW", "ROWS", "USER", "DESC", "ASC", "ADD", "ALL"
];

fn sql_calc_found_rows(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if SQL_CALC_FOUND_ROWS_RE.is_match(&stmt.stripped) {
        Some(Finding::new(KWR_001, 0, "SQL_CALC_FOUND_ROWS forces a second pass over the unfiltered result"))
    } else {
        None
    }
}

fn reserved_word_identifier(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    for cap in BACKTICKED_IDENT_RE.captures_iter(&stmt.stripped) {
        let word = cap[1].to_ascii_uppercase();
        if RESERVED_WORDS.contains(&word.as_str()) {
            return Some(Finding::new(
                KWR_002,
                0,
                format!("identifier `{}` is a SQL reserved word and needs quoting everywhere", &cap[1])
            ));
        }
    }
    None
}

fn plural_table_name(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let name = CREATE_TABLE_NAME_RE.captures(&stmt.stripped)?.get(1)?.as_str();
    let short = name.rsplit('.').next().unwrap_or(name);
    if short.len() > 1 && short.to_ascii_lowercase().ends_with('s') && !short.to_ascii_lowercase().ends_with("ss") {
        Some(Finding::new(KWR_003, 0, format!("table name `{}` is plural; consider a singular name", short)))
    } else {
        None
    }
}

fn multi_byte_identifier(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    for cap in BACKTICKED_IDENT_RE.captures_iter(&stmt.stripped) {
        if !cap[1].is_ascii() {
            return Some(Finding::new(KWR_004, 0, "identifier contains multi-byte characters"));
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
    fn flags_sql_calc_found_rows() {
        let s = stmt("SELECT SQL_CALC_FOUND_ROWS * FROM t LIMIT 10");
        assert!(sql_calc_found_rows(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_reserved_word_identifier() {
        let s = stmt("SELECT * FROM t WHERE `order` = 1");
        assert!(reserved_word_identifier(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_plural_table_name() {
        let s = stmt("CREATE TABLE users (id INT)");
        assert!(plural_table_name(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_singular_table_name() {
        let s = stmt("CREATE TABLE user (id INT)");
        assert!(plural_table_name(&s, &Settings::default()).is_none());
    }
}
