//! KEY — index/key rules. Operates over `CREATE TABLE`/`CREATE INDEX` raw
//! text; sqlparser's DDL AST does not expose MySQL-specific index
//! attributes (prefix length, visibility, key-block-size) richly enough to
//! be worth the extra indirection for this category.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{
            KEY_001, KEY_002, KEY_003, KEY_004, KEY_005, KEY_006, KEY_007, KEY_008, KEY_009,
            KEY_010
        }
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(KEY_001, primary_key_not_unsigned_auto_increment)),
        Box::new(FnRule(KEY_002, missing_primary_or_unique_key)),
        Box::new(FnRule(KEY_003, self_referencing_foreign_key)),
        Box::new(FnRule(KEY_004, index_attribute_ordering)),
        Box::new(FnRule(KEY_005, too_many_indexes)),
        Box::new(FnRule(KEY_006, composite_index_too_wide)),
        Box::new(FnRule(KEY_007, primary_key_wrong_type_class)),
        Box::new(FnRule(KEY_008, mixed_direction_composite_index)),
        Box::new(FnRule(KEY_009, duplicate_unique_and_primary)),
        Box::new(FnRule(KEY_010, full_text_index))
    ]
}

static PRIMARY_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)PRIMARY\s+KEY").unwrap());
static UNIQUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bUNIQUE\b").unwrap());
static FULLTEXT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bFULLTEXT\b").unwrap());
static INDEX_COLS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:CREATE\s+(?:UNIQUE\s+)?INDEX\s+\S+\s+ON\s+\S+|KEY|INDEX)\s*\(([^)]*)\)").unwrap());
static FK_REFERENCES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)REFERENCES\s+[`\"]?(\w+)[`\"]?").unwrap());
static CREATE_TABLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?[`\"]?([\w.]+)[`\"]?").unwrap());
static PK_CANONICAL_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(TINY|SMALL|MEDIUM|BIG)?INT\b").unwrap());
static INDEX_DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:UNIQUE\s+)?(?:KEY|INDEX)\b").unwrap());

fn primary_key_not_unsigned_auto_increment(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let upper = stmt.stripped.to_ascii_uppercase();
    if !PRIMARY_KEY_RE.is_match(&upper) {
        return None;
    }
    if upper.contains("UNSIGNED") && upper.contains("AUTO_INCREMENT") {
        None
    } else {
        Some(Finding::new(KEY_001, 0, "primary key is not an unsigned, auto-incrementing integer"))
    }
}

fn missing_primary_or_unique_key(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let upper = stmt.stripped.to_ascii_uppercase();
    if PRIMARY_KEY_RE.is_match(&upper) || UNIQUE_RE.is_match(&upper) {
        None
    } else {
        Some(Finding::new(KEY_002, 0, "table has no primary or unique key"))
    }
}

fn self_referencing_foreign_key(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let table_name = CREATE_TABLE_NAME_RE
        .captures(&stmt.stripped)?
        .get(1)?
        .as_str()
        .rsplit('.')
        .next()?
        .to_ascii_lowercase();
    for cap in FK_REFERENCES_RE.captures_iter(&stmt.stripped) {
        if cap[1].eq_ignore_ascii_case(&table_name) {
            return Some(Finding::new(KEY_003, 0, "foreign key references its own table, forming a cycle"));
        }
    }
    None
}

fn index_attribute_ordering(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable && stmt.kind != StatementKind::DdlCreateIndex {
        return None;
    }
    static LOW_CARDINALITY_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)^(status|type|flag|is_|has_|enabled|active)").unwrap());
    for cap in INDEX_COLS_RE.captures_iter(&stmt.stripped) {
        let cols: Vec<&str> = cap[1].split(',').map(|c| c.trim()).filter(|c| !c.is_empty()).collect();
        if cols.len() > 1 && LOW_CARDINALITY_RE.is_match(cols[0]) {
            return Some(Finding::new(
                KEY_004,
                0,
                "composite index leads with a low-cardinality column"
            ));
        }
    }
    None
}

fn too_many_indexes(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    let count = INDEX_DEF_RE.find_iter(&stmt.stripped).count();
    if count > settings.max_idx_count {
        Some(Finding::new(KEY_005, 0, format!("table declares {} indexes, above the configured threshold", count)))
    } else {
        None
    }
}

fn composite_index_too_wide(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable && stmt.kind != StatementKind::DdlCreateIndex {
        return None;
    }
    for cap in INDEX_COLS_RE.captures_iter(&stmt.stripped) {
        let count = cap[1].split(',').filter(|c| !c.trim().is_empty()).count();
        if count > settings.max_idx_cols {
            return Some(Finding::new(KEY_006, 0, format!("composite index has {} columns, above the configured threshold", count)));
        }
    }
    None
}

fn primary_key_wrong_type_class(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    static INLINE_PK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)(\w+)\s+([A-Z]+(?:\([^)]*\))?)[^,]*\bPRIMARY\s+KEY\b").unwrap());
    if let Some(cap) = INLINE_PK_RE.captures(&stmt.stripped) {
        let type_text = &cap[2];
        if !PK_CANONICAL_TYPE_RE.is_match(type_text) {
            return Some(Finding::new(KEY_007, 0, "primary key uses a type wider or less canonical than an unsigned integer"));
        }
    }
    None
}

fn mixed_direction_composite_index(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable && stmt.kind != StatementKind::DdlCreateIndex {
        return None;
    }
    for cap in INDEX_COLS_RE.captures_iter(&stmt.stripped) {
        let upper = cap[1].to_ascii_uppercase();
        if upper.contains("ASC") && upper.contains("DESC") {
            return Some(Finding::new(KEY_008, 0, "composite index mixes ascending and descending column order"));
        }
    }
    None
}

fn duplicate_unique_and_primary(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    static PK_COLS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)PRIMARY\s+KEY\s*\(([^)]*)\)").unwrap());
    static UNIQUE_COLS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)UNIQUE\s+(?:KEY|INDEX)?\s*\w*\s*\(([^)]*)\)").unwrap());

    let pk_cols = PK_COLS_RE.captures(&stmt.stripped).map(|c| normalize_col_list(&c[1]));
    let Some(pk_cols) = pk_cols else {
        return None;
    };
    for cap in UNIQUE_COLS_RE.captures_iter(&stmt.stripped) {
        if normalize_col_list(&cap[1]) == pk_cols {
            return Some(Finding::new(KEY_009, 0, "a unique index duplicates the primary key's column set"));
        }
    }
    None
}

fn normalize_col_list(s: &str) -> Vec<String> {
    s.split(',').map(|c| c.trim().trim_matches(|ch| ch == '`' || ch == '"').to_ascii_lowercase()).collect()
}

fn full_text_index(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if FULLTEXT_RE.is_match(&stmt.stripped) {
        Some(Finding::new(KEY_010, 0, "FULLTEXT index created"))
    } else {
        None
    }
}
