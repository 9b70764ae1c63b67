//! FUN — function/expression rules.

use std::sync::LazyLock;

use regex::Regex;
use sqlparser::ast::{BinaryOperator, Expr};

use crate::{
    ast_util::where_expr,
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{FUN_001, FUN_002, FUN_003, FUN_004, FUN_005, FUN_006, FUN_007, FUN_008, FUN_009}
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(FUN_001, function_on_column_predicate)),
        Box::new(FnRule(FUN_002, having_filters_grouped_column)),
        Box::new(FnRule(FUN_003, pipe_concatenation)),
        Box::new(FnRule(FUN_004, sysdate_usage)),
        Box::new(FnRule(FUN_005, count_literal_instead_of_star)),
        Box::new(FnRule(FUN_006, bare_sum_null_propagation)),
        Box::new(FnRule(FUN_007, forbidden_trigger)),
        Box::new(FnRule(FUN_008, forbidden_procedure)),
        Box::new(FnRule(FUN_009, forbidden_function))
    ]
}

static PIPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\|\|").unwrap());
static SYSDATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bSYSDATE\s*\(").unwrap());
static COUNT_LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)COUNT\s*\(\s*\d+\s*\)").unwrap());
static SUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bSUM\s*\(\s*[\w.]+\s*\)").unwrap());
static COALESCE_SUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)COALESCE\s*\(\s*SUM").unwrap());
static HAVING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)\bHAVING\b(.*)$").unwrap());
static GROUP_BY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)\bGROUP\s+BY\b(.*?)(?:\bHAVING\b|\bORDER\b|\bLIMIT\b|$)").unwrap());

fn is_comparison_on_function(expr: &Expr) -> bool {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Eq | BinaryOperator::NotEq | BinaryOperator::Lt | BinaryOperator::Gt
                | BinaryOperator::LtEq | BinaryOperator::GtEq,
            right
        } => matches!(left.as_ref(), Expr::Function(_)) || matches!(right.as_ref(), Expr::Function(_)),
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And | BinaryOperator::Or,
            right
        } => is_comparison_on_function(left) || is_comparison_on_function(right),
        Expr::Nested(inner) => is_comparison_on_function(inner),
        _ => false
    }
}

fn function_on_column_predicate(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let expr = where_expr(ast)?;
    if is_comparison_on_function(expr) {
        Some(Finding::new(FUN_001, 0, "predicate wraps a column in a function call, defeating index usage"))
    } else {
        None
    }
}

fn having_filters_grouped_column(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let having = HAVING_RE.captures(&stmt.stripped)?;
    let group = GROUP_BY_RE.captures(&stmt.stripped)?;
    let having_text = having[1].to_ascii_uppercase();
    let group_cols: Vec<&str> = group[1].split(',').map(|s| s.trim()).collect();
    for col in group_cols {
        if col.is_empty() {
            continue;
        }
        if having_text.contains(&col.to_ascii_uppercase()) && !having_text.contains("COUNT(*)") {
            continue;
        }
        if having_text.contains(&col.to_ascii_uppercase()) {
            return Some(Finding::new(
                FUN_002,
                0,
                "HAVING filters on a column already present in GROUP BY; a WHERE predicate would run earlier"
            ));
        }
    }
    None
}

fn pipe_concatenation(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if PIPE_RE.is_match(&stmt.stripped) {
        Some(Finding::new(FUN_003, 0, "`||` is non-standard string concatenation"))
    } else {
        None
    }
}

fn sysdate_usage(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if SYSDATE_RE.is_match(&stmt.stripped) {
        Some(Finding::new(FUN_004, 0, "SYSDATE() is non-deterministic within a statement"))
    } else {
        None
    }
}

fn count_literal_instead_of_star(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if COUNT_LITERAL_RE.is_match(&stmt.stripped) {
        Some(Finding::new(FUN_005, 0, "COUNT(literal) intent differs from COUNT(*) and should be explicit"))
    } else {
        None
    }
}

fn bare_sum_null_propagation(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if SUM_RE.is_match(&stmt.stripped) && !COALESCE_SUM_RE.is_match(&stmt.stripped) {
        Some(Finding::new(FUN_006, 0, "SUM(col) returns NULL when every input row is NULL"))
    } else {
        None
    }
}

fn forbidden_trigger(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind == StatementKind::DdlCreateTrigger {
        Some(Finding::new(FUN_007, 0, "CREATE TRIGGER adds implicit, invisible behavior"))
    } else {
        None
    }
}

fn forbidden_procedure(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind == StatementKind::DdlCreateProcedure {
        Some(Finding::new(FUN_008, 0, "CREATE PROCEDURE moves logic into the database"))
    } else {
        None
    }
}

fn forbidden_function(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind == StatementKind::DdlCreateFunction {
        Some(Finding::new(FUN_009, 0, "CREATE FUNCTION moves logic into the database"))
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
    fn flags_function_on_column() {
        let s = stmt("SELECT * FROM t WHERE YEAR(created_at) = 2024");
        assert!(function_on_column_predicate(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_pipe_concat() {
        let s = stmt("SELECT a || b FROM t");
        assert!(pipe_concatenation(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_sysdate() {
        let s = stmt("SELECT SYSDATE() FROM t");
        assert!(sysdate_usage(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_count_literal() {
        let s = stmt("SELECT COUNT(1) FROM t");
        assert!(count_literal_instead_of_star(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_coalesce_sum() {
        let s = stmt("SELECT COALESCE(SUM(amount), 0) FROM t");
        assert!(bare_sum_null_propagation(&s, &Settings::default()).is_none());
    }
}
