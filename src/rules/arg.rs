//! ARG — predicate/argument rules. Most of this category reads `stmt.raw`
//! with regex, the same way the teacher's own performance/style rules do,
//! since the shapes involved (a `LIKE` pattern's literal text, an `IN` list's
//! item count) are about surface syntax sqlparser does not preserve in a
//! convenient form.

use std::sync::LazyLock;

use regex::Regex;
use sqlparser::ast::Expr;

use crate::{
    ast_util::{flatten_or, where_expr},
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{
            ARG_001, ARG_002, ARG_004, ARG_005, ARG_006, ARG_007, ARG_008, ARG_009, ARG_010,
            ARG_011, ARG_012
        }
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(ARG_001, leading_wildcard)),
        Box::new(FnRule(ARG_002, like_without_wildcard)),
        Box::new(FnRule(ARG_004, large_in_list)),
        Box::new(FnRule(ARG_005, in_list_with_null)),
        Box::new(FnRule(ARG_006, is_null_predicate)),
        Box::new(FnRule(ARG_007, regexp_predicate)),
        Box::new(FnRule(ARG_008, redundant_or)),
        Box::new(FnRule(ARG_009, padded_string_literal)),
        Box::new(FnRule(ARG_010, explicit_index_hint)),
        Box::new(FnRule(ARG_011, index_defeating_negation)),
        Box::new(FnRule(ARG_012, large_values_list))
    ]
}

static LIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bLIKE\s+'([^']*)'"#).unwrap());
static IN_LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bIN\s*\(([^()]*)\)").unwrap());
static IS_NULL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bIS\s+(NOT\s+)?NULL\b").unwrap());
static REGEXP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(REGEXP|RLIKE)\b").unwrap());
static INDEX_HINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(USE|IGNORE|FORCE)\s+INDEX\b").unwrap());
static NOT_IN_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bNOT\s+(IN|LIKE)\b").unwrap());
static VALUES_TUPLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\)\s*,\s*\(").unwrap());
static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*)'").unwrap());

fn leading_wildcard(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    for cap in LIKE_RE.captures_iter(&stmt.stripped) {
        if cap[1].starts_with('%') {
            return Some(Finding::new(ARG_001, 0, "LIKE pattern begins with a wildcard"));
        }
    }
    None
}

fn like_without_wildcard(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    for cap in LIKE_RE.captures_iter(&stmt.stripped) {
        let pattern = &cap[1];
        if !pattern.contains('%') && !pattern.contains('_') {
            return Some(Finding::new(ARG_002, 0, "LIKE pattern has no wildcard character"));
        }
    }
    None
}

fn large_in_list(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    for cap in IN_LIST_RE.captures_iter(&stmt.stripped) {
        let body = cap[1].trim();
        if body.is_empty() || body.to_ascii_uppercase().starts_with("SELECT") {
            continue;
        }
        let count = body.split(',').count();
        if count > settings.max_in_count {
            return Some(Finding::new(
                ARG_004,
                0,
                format!("IN list has {} items, above the configured threshold", count)
            ));
        }
    }
    None
}

fn in_list_with_null(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    for cap in IN_LIST_RE.captures_iter(&stmt.stripped) {
        let upper = cap[1].to_ascii_uppercase();
        if upper.split(',').any(|item| item.trim() == "NULL") {
            return Some(Finding::new(ARG_005, 0, "IN/NOT IN list contains a literal NULL"));
        }
    }
    None
}

fn is_null_predicate(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if matches!(stmt.kind, StatementKind::Select | StatementKind::Update | StatementKind::Delete)
        && IS_NULL_RE.is_match(&stmt.stripped)
    {
        Some(Finding::new(ARG_006, 0, "predicate explicitly tests nullability"))
    } else {
        None
    }
}

fn regexp_predicate(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if REGEXP_RE.is_match(&stmt.stripped) {
        Some(Finding::new(ARG_007, 0, "REGEXP/RLIKE predicate cannot use a standard index"))
    } else {
        None
    }
}

fn redundant_or(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let expr = where_expr(ast)?;
    let mut leaves = Vec::new();
    flatten_or(expr, &mut leaves);
    let texts: Vec<String> = leaves.iter().map(|e| e.to_string()).collect();
    for i in 0..texts.len() {
        for j in (i + 1)..texts.len() {
            if texts[i] == texts[j] {
                return Some(Finding::new(ARG_008, 0, format!("`{}` is repeated across OR branches", texts[i])));
            }
        }
    }
    None
}

fn padded_string_literal(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    for cap in QUOTED_RE.captures_iter(&stmt.stripped) {
        let content = &cap[1];
        if !content.is_empty() && content.trim() != content {
            return Some(Finding::new(ARG_009, 0, "string literal has leading or trailing whitespace"));
        }
    }
    None
}

fn explicit_index_hint(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if INDEX_HINT_RE.is_match(&stmt.stripped) {
        Some(Finding::new(ARG_010, 0, "explicit index hint pins the query plan"))
    } else {
        None
    }
}

fn index_defeating_negation(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if NOT_IN_LIKE_RE.is_match(&stmt.stripped) {
        Some(Finding::new(ARG_011, 0, "NOT IN/NOT LIKE cannot use an index efficiently"))
    } else {
        None
    }
}

fn large_values_list(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if !stmt.kind.is_insert_like() {
        return None;
    }
    let count = VALUES_TUPLE_RE.find_iter(&stmt.stripped).count() + 1;
    if count > settings.max_value_count {
        Some(Finding::new(ARG_012, 0, format!("INSERT has {} value rows, above the configured threshold", count)))
    } else {
        None
    }
}

#[allow(dead_code)]
fn is_or_leaf(expr: &Expr) -> bool {
    !matches!(expr, Expr::BinaryOp { op: sqlparser::ast::BinaryOperator::Or, .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SqlDialect, parse_statements};

    fn stmt(sql: &str) -> Statement {
        parse_statements(sql, SqlDialect::MySql).remove(0)
    }

    #[test]
    fn flags_leading_wildcard() {
        let s = stmt("SELECT * FROM t WHERE name LIKE '%abc'");
        assert!(leading_wildcard(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_like_without_wildcard() {
        let s = stmt("SELECT * FROM t WHERE name LIKE 'abc'");
        assert!(like_without_wildcard(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_large_in_list() {
        let items: Vec<String> = (0..25).map(|i| i.to_string()).collect();
        let sql = format!("SELECT * FROM t WHERE id IN ({})", items.join(","));
        let s = stmt(&sql);
        assert!(large_in_list(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_redundant_or() {
        let s = stmt("SELECT * FROM t WHERE a = 1 OR a = 1");
        assert!(redundant_or(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_distinct_or_branches() {
        let s = stmt("SELECT * FROM t WHERE a = 1 OR a = 2");
        assert!(redundant_or(&s, &Settings::default()).is_none());
    }
}
