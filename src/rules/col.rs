//! COL — column-definition rules. `CREATE TABLE`'s column list is split into
//! individual definitions (bracket-depth aware, so `DECIMAL(10,2)` and
//! `ENUM('a','b')` survive intact) and each is inspected with a regex, the
//! same texture as the teacher's own DDL-shape checks.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{
            COL_001, COL_002, COL_003, COL_004, COL_005, COL_006, COL_007, COL_008, COL_009,
            COL_010, COL_011, COL_012, COL_013, COL_014, COL_015, COL_016, COL_017, COL_018,
            COL_019
        }
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(COL_001, select_star)),
        Box::new(FnRule(COL_002, insert_without_columns)),
        Box::new(FnRule(COL_003, signed_auto_increment)),
        Box::new(FnRule(COL_004, column_without_default)),
        Box::new(FnRule(COL_005, column_without_comment)),
        Box::new(FnRule(COL_006, too_many_columns)),
        Box::new(FnRule(COL_007, too_many_text_columns)),
        Box::new(FnRule(COL_008, char_for_variable_data)),
        Box::new(FnRule(COL_009, float_for_exact_values)),
        Box::new(FnRule(COL_010, enum_or_set_column)),
        Box::new(FnRule(COL_011, not_equal_null)),
        Box::new(FnRule(COL_012, text_not_null)),
        Box::new(FnRule(COL_013, timestamp_without_default)),
        Box::new(FnRule(COL_014, column_level_charset)),
        Box::new(FnRule(COL_015, blob_non_null_default)),
        Box::new(FnRule(COL_016, non_canonical_integer_width)),
        Box::new(FnRule(COL_017, varchar_above_threshold)),
        Box::new(FnRule(COL_018, forbidden_column_type)),
        Box::new(FnRule(COL_019, time_without_precision))
    ]
}

/// Split a `CREATE TABLE`'s parenthesized body into individual column/
/// constraint definitions, respecting nested parens so `DECIMAL(10,2)` and
/// `ENUM('a','b')` are not split apart.
fn column_defs(raw: &str) -> Vec<String> {
    let Some(open) = raw.find('(') else {
        return Vec::new();
    };
    let bytes = raw.as_bytes();
    let mut depth = 0i32;
    let mut close = raw.len();
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    close = i;
                    break;
                }
            }
            _ => {}
        }
    }
    let body = &raw[open + 1..close.min(raw.len())];

    let mut defs = Vec::new();
    let mut current = String::new();
    let mut d = 0i32;
    let mut in_quote: Option<char> = None;
    for c in body.chars() {
        match in_quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    in_quote = None;
                }
            }
            None => match c {
                '\'' | '"' | '`' => {
                    in_quote = Some(c);
                    current.push(c);
                }
                '(' => {
                    d += 1;
                    current.push(c);
                }
                ')' => {
                    d -= 1;
                    current.push(c);
                }
                ',' if d == 0 => {
                    defs.push(std::mem::take(&mut current));
                }
                _ => current.push(c)
            }
        }
    }
    if !current.trim().is_empty() {
        defs.push(current);
    }
    defs
}

/// Column (not constraint) definitions: those starting with an identifier
/// rather than `PRIMARY`/`UNIQUE`/`FOREIGN`/`KEY`/`CONSTRAINT`/`INDEX`.
fn field_defs(raw: &str) -> Vec<String> {
    static CONSTRAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)^\s*(PRIMARY|UNIQUE|FOREIGN|KEY|CONSTRAINT|INDEX|FULLTEXT|CHECK)\b").unwrap()
    });
    column_defs(raw).into_iter().filter(|d| !CONSTRAINT_RE.is_match(d)).collect()
}

static SELECT_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)SELECT\s+\*").unwrap());
static INSERT_NO_COLS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)INSERT\s+INTO\s+[`"]?[\w.]+[`"]?\s+VALUES"#).unwrap());
static VARCHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)VARCHAR\s*\(\s*(\d+)").unwrap());
static INT_WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(TINY|SMALL|MEDIUM|BIG)?INT\s*\(\s*\d+\s*\)").unwrap());

fn select_star(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind == StatementKind::Select && SELECT_STAR_RE.is_match(&stmt.stripped) {
        Some(Finding::new(COL_001, 0, "projection uses `*` instead of an explicit column list"))
    } else {
        None
    }
}

fn insert_without_columns(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind.is_insert_like() && INSERT_NO_COLS_RE.is_match(&stmt.stripped) {
        Some(Finding::new(COL_002, 0, "INSERT omits the explicit column list"))
    } else {
        None
    }
}

fn signed_auto_increment(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        if upper.contains("AUTO_INCREMENT") && !upper.contains("UNSIGNED") {
            return Some(Finding::new(COL_003, 0, "AUTO_INCREMENT column is not UNSIGNED"));
        }
    }
    None
}

fn column_without_default(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        if upper.contains("TEXT") || upper.contains("BLOB") || upper.contains("JSON") {
            continue;
        }
        if upper.contains("AUTO_INCREMENT") {
            continue;
        }
        if !upper.contains("DEFAULT") {
            return Some(Finding::new(COL_004, 0, "column has no DEFAULT"));
        }
    }
    None
}

fn column_without_comment(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        if !def.to_ascii_uppercase().contains("COMMENT") {
            return Some(Finding::new(COL_005, 0, "column has no COMMENT"));
        }
    }
    None
}

fn too_many_columns(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let count = field_defs(&stmt.stripped).len();
    if count > settings.max_col_count {
        Some(Finding::new(COL_006, 0, format!("table has {} columns, above the configured threshold", count)))
    } else {
        None
    }
}

fn too_many_text_columns(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let count = field_defs(&stmt.stripped)
        .iter()
        .filter(|d| {
            let upper = d.to_ascii_uppercase();
            upper.contains("TEXT") || upper.contains("BLOB") || upper.contains("JSON")
        })
        .count();
    if count > settings.max_text_cols {
        Some(Finding::new(COL_007, 0, format!("table has {} TEXT/BLOB/JSON columns, above the configured threshold", count)))
    } else {
        None
    }
}

fn char_for_variable_data(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        if upper.contains("CHAR(") && !upper.contains("VARCHAR(") {
            return Some(Finding::new(COL_008, 0, "CHAR used where VARCHAR suits variable-length data better"));
        }
    }
    None
}

fn float_for_exact_values(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        let type_token = upper.split_whitespace().nth(1).unwrap_or("");
        if type_token.starts_with("FLOAT") || type_token.starts_with("DOUBLE") {
            return Some(Finding::new(COL_009, 0, "FLOAT/DOUBLE cannot represent exact decimal values"));
        }
    }
    None
}

fn enum_or_set_column(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        if upper.contains("ENUM(") || upper.contains("SET(") {
            return Some(Finding::new(COL_010, 0, "ENUM/SET encodes business rules in schema metadata"));
        }
    }
    None
}

fn not_equal_null(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if !matches!(stmt.kind, StatementKind::Select | StatementKind::Update | StatementKind::Delete) {
        return None;
    }
    if Regex::new(r"(?i)<>\s*NULL").unwrap().is_match(&stmt.stripped) {
        Some(Finding::new(COL_011, 0, "`<> NULL` never matches in SQL's three-valued logic"))
    } else {
        None
    }
}

fn text_not_null(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        if (upper.contains("TEXT") || upper.contains("BLOB") || upper.contains("JSON")) && upper.contains("NOT NULL") {
            return Some(Finding::new(COL_012, 0, "TEXT/BLOB/JSON column is declared NOT NULL"));
        }
    }
    None
}

fn timestamp_without_default(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        if upper.contains("TIMESTAMP") && !upper.contains("DEFAULT") {
            return Some(Finding::new(COL_013, 0, "TIMESTAMP column has no DEFAULT"));
        }
    }
    None
}

fn column_level_charset(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        if def.to_ascii_uppercase().contains("CHARACTER SET") {
            return Some(Finding::new(COL_014, 0, "column overrides the table's CHARACTER SET"));
        }
    }
    None
}

fn blob_non_null_default(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        if (upper.contains("BLOB") || upper.contains("JSON")) && upper.contains("DEFAULT") && !upper.contains("DEFAULT NULL") {
            return Some(Finding::new(COL_015, 0, "BLOB/JSON column has a non-null DEFAULT"));
        }
    }
    None
}

fn non_canonical_integer_width(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        if INT_WIDTH_RE.is_match(&def) {
            return Some(Finding::new(COL_016, 0, "integer type carries a non-canonical display-width specifier"));
        }
    }
    None
}

fn varchar_above_threshold(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        if let Some(cap) = VARCHAR_RE.captures(&def) {
            if let Ok(len) = cap[1].parse::<u64>() {
                if len > settings.max_varchar_length {
                    return Some(Finding::new(COL_017, 0, format!("VARCHAR({}) exceeds the configured threshold", len)));
                }
            }
        }
    }
    None
}

static FORBIDDEN_TYPES: &[&str] = &["BOOLEAN", "BOOL"];

fn forbidden_column_type(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        for forbidden in FORBIDDEN_TYPES {
            if upper.split_whitespace().nth(1).map(|t| t.trim_end_matches(',')) == Some(*forbidden) {
                return Some(Finding::new(COL_018, 0, format!("column uses forbidden type {}", forbidden)));
            }
        }
    }
    None
}

fn time_without_precision(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    for def in field_defs(&stmt.stripped) {
        let upper = def.to_ascii_uppercase();
        let has_time_type = upper.split_whitespace().nth(1).map(|t| t == "TIME" || t == "DATETIME").unwrap_or(false);
        if has_time_type && !upper.contains('(') {
            return Some(Finding::new(COL_019, 0, "TIME/DATETIME has no fractional-seconds precision"));
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
    fn flags_select_star() {
        let s = stmt("SELECT * FROM t");
        assert!(select_star(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_signed_auto_increment() {
        let s = stmt("CREATE TABLE t (id INT AUTO_INCREMENT PRIMARY KEY)");
        assert!(signed_auto_increment(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_unsigned_auto_increment() {
        let s = stmt("CREATE TABLE t (id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY)");
        assert!(signed_auto_increment(&s, &Settings::default()).is_none());
    }

    #[test]
    fn flags_enum_column() {
        let s = stmt("CREATE TABLE t (status ENUM('a','b'))");
        assert!(enum_or_set_column(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_varchar_above_threshold() {
        let s = stmt("CREATE TABLE t (a VARCHAR(4000))");
        assert!(varchar_above_threshold(&s, &Settings::default()).is_some());
    }

    #[test]
    fn column_defs_respects_nested_parens() {
        let defs = column_defs("CREATE TABLE t (a DECIMAL(10,2), b ENUM('a,b','c'))");
        assert_eq!(defs.len(), 2);
    }
}
