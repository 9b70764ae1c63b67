//! DIS — `DISTINCT` usage rules.

use regex::Regex;
use std::sync::LazyLock;

use crate::{
    ast_util::{from_clause, group_by_exprs, is_distinct, where_expr},
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{DIS_001, DIS_002, DIS_003}
    },
    settings::Settings,
    statement::Statement
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(DIS_001, distinct_overuse)),
        Box::new(FnRule(DIS_002, multi_column_count_distinct)),
        Box::new(FnRule(DIS_003, distinct_star_single_table))
    ]
}

static COUNT_DISTINCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)COUNT\s*\(\s*DISTINCT\s+([^)]*)\)").unwrap());

fn distinct_overuse(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if !is_distinct(ast) {
        return None;
    }
    if from_clause(ast).len() == 1 && where_expr(ast).is_some() && group_by_exprs(ast).is_empty() {
        Some(Finding::new(DIS_001, 0, "DISTINCT is layered onto a query whose result is already unique"))
    } else {
        None
    }
}

fn multi_column_count_distinct(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    for cap in COUNT_DISTINCT_RE.captures_iter(&stmt.stripped) {
        if cap[1].contains(',') {
            return Some(Finding::new(DIS_002, 0, "COUNT(DISTINCT a, b) counts distinct tuples"));
        }
    }
    None
}

fn distinct_star_single_table(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if !is_distinct(ast) {
        return None;
    }
    if from_clause(ast).len() != 1 || !group_by_exprs(ast).is_empty() {
        return None;
    }
    if stmt.stripped.to_ascii_uppercase().contains("DISTINCT *") {
        Some(Finding::new(DIS_003, 0, "SELECT DISTINCT * on a single table usually means filter by key instead"))
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
    fn flags_multi_column_count_distinct() {
        let s = stmt("SELECT COUNT(DISTINCT a, b) FROM t");
        assert!(multi_column_count_distinct(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_distinct_star() {
        let s = stmt("SELECT DISTINCT * FROM t");
        assert!(distinct_star_single_table(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_single_column_count_distinct() {
        let s = stmt("SELECT COUNT(DISTINCT a) FROM t");
        assert!(multi_column_count_distinct(&s, &Settings::default()).is_none());
    }
}
