//! CLA — clause rules.

use std::sync::LazyLock;

use regex::Regex;
use sqlparser::ast::Expr;

use crate::{
    ast_util::{NameSet, group_by_exprs, having_expr, order_by_exprs, where_expr},
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{
            CLA_001, CLA_002, CLA_003, CLA_004, CLA_005, CLA_006, CLA_007, CLA_008, CLA_009,
            CLA_010, CLA_011, CLA_012, CLA_013, CLA_014, CLA_015
        }
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(CLA_001, dml_without_where)),
        Box::new(FnRule(CLA_002, order_by_rand)),
        Box::new(FnRule(CLA_003, large_offset)),
        Box::new(FnRule(CLA_004, positional_group_by)),
        Box::new(FnRule(CLA_005, positional_order_by)),
        Box::new(FnRule(CLA_006, group_by_across_tables)),
        Box::new(FnRule(CLA_007, mixed_order_direction)),
        Box::new(FnRule(CLA_008, group_by_without_order_by)),
        Box::new(FnRule(CLA_009, order_by_expression)),
        Box::new(FnRule(CLA_010, group_by_expression)),
        Box::new(FnRule(CLA_011, table_without_comment)),
        Box::new(FnRule(CLA_012, spaghetti_query)),
        Box::new(FnRule(CLA_013, having_clause)),
        Box::new(FnRule(CLA_014, delete_without_where)),
        Box::new(FnRule(CLA_015, insert_select_without_where))
    ]
}

static POSITIONAL_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bGROUP\s+BY\s+\d+").unwrap());
static POSITIONAL_ORDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bORDER\s+BY\s+\d+").unwrap());
static OFFSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bLIMIT\s+(\d+)\s*,\s*\d+|\bOFFSET\s+(\d+)").unwrap()
});
static TABLE_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\)[^;]*\bCOMMENT\s*=?\s*'").unwrap());
static SELECT_WITHOUT_WHERE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bINSERT\s+INTO\b[\s\S]*\bSELECT\b").unwrap()
});

fn dml_without_where(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if !matches!(stmt.kind, StatementKind::Select | StatementKind::Update) {
        return None;
    }
    if where_expr(ast).is_none() {
        Some(Finding::new(CLA_001, 0, "statement has no WHERE clause"))
    } else {
        None
    }
}

fn order_by_rand(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    for expr in order_by_exprs(ast) {
        if let Expr::Function(f) = expr {
            if let Some(name) = f.name.0.last() {
                if name.value.eq_ignore_ascii_case("RAND") {
                    return Some(Finding::new(CLA_002, 0, "ORDER BY RAND() forces a full sort"));
                }
            }
        }
    }
    None
}

fn large_offset(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    for cap in OFFSET_RE.captures_iter(&stmt.stripped) {
        let raw = cap.get(1).or_else(|| cap.get(2))?;
        if let Ok(offset) = raw.as_str().parse::<u64>() {
            if offset > settings.max_offset {
                return Some(Finding::new(
                    CLA_003,
                    0,
                    format!("LIMIT/OFFSET of {} is above the configured threshold", offset)
                ));
            }
        }
    }
    None
}

fn positional_group_by(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if POSITIONAL_GROUP_RE.is_match(&stmt.stripped) {
        Some(Finding::new(CLA_004, 0, "GROUP BY references a column by ordinal position"))
    } else {
        None
    }
}

fn positional_order_by(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if POSITIONAL_ORDER_RE.is_match(&stmt.stripped) {
        Some(Finding::new(CLA_005, 0, "ORDER BY references a column by ordinal position"))
    } else {
        None
    }
}

fn group_by_across_tables(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let mut prefixes: NameSet = NameSet::new();
    for expr in group_by_exprs(ast) {
        if let Expr::CompoundIdentifier(idents) = expr {
            if idents.len() >= 2 {
                prefixes.insert(idents[0].value.to_ascii_lowercase().into());
            }
        }
    }
    if prefixes.len() > 1 {
        Some(Finding::new(CLA_006, 0, "GROUP BY references columns from more than one table"))
    } else {
        None
    }
}

static ORDER_BY_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bORDER\s+BY\s+(.*?)(?:\bLIMIT\b|$)").unwrap());

fn mixed_order_direction(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if order_by_exprs(ast).len() < 2 {
        return None;
    }
    let clause = ORDER_BY_CLAUSE_RE.captures(&stmt.stripped)?;
    let text = clause.get(1)?.as_str().to_ascii_uppercase();
    let has_asc = text.contains(" ASC");
    let has_desc = text.contains(" DESC");
    if has_asc && has_desc {
        Some(Finding::new(CLA_007, 0, "ORDER BY mixes ascending and descending directions"))
    } else {
        None
    }
}

fn group_by_without_order_by(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if !group_by_exprs(ast).is_empty() && order_by_exprs(ast).is_empty() {
        Some(Finding::new(CLA_008, 0, "GROUP BY has no explicit ORDER BY"))
    } else {
        None
    }
}

fn is_bare_column(expr: &Expr) -> bool {
    matches!(expr, Expr::Identifier(_) | Expr::CompoundIdentifier(_))
}

fn order_by_expression(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if order_by_exprs(ast).iter().any(|e| !is_bare_column(e)) {
        Some(Finding::new(CLA_009, 0, "ORDER BY sorts by an expression rather than a bare column"))
    } else {
        None
    }
}

fn group_by_expression(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if group_by_exprs(ast).iter().any(|e| !is_bare_column(e)) {
        Some(Finding::new(CLA_010, 0, "GROUP BY groups by an expression rather than a bare column"))
    } else {
        None
    }
}

fn table_without_comment(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    if TABLE_COMMENT_RE.is_match(&stmt.stripped) {
        None
    } else {
        Some(Finding::new(CLA_011, 0, "CREATE TABLE has no table-level COMMENT"))
    }
}

fn spaghetti_query(stmt: &Statement, settings: &Settings) -> Option<Finding> {
    if stmt.raw.chars().count() > settings.spaghetti_query_length {
        Some(Finding::new(CLA_012, 0, "statement text exceeds the configured length threshold"))
    } else {
        None
    }
}

fn having_clause(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if having_expr(ast).is_some() {
        Some(Finding::new(CLA_013, 0, "HAVING filters post-aggregation"))
    } else {
        None
    }
}

fn delete_without_where(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if stmt.kind == StatementKind::Delete && where_expr(ast).is_none() {
        Some(Finding::new(CLA_014, 0, "DELETE omits WHERE under a policy that normally requires one"))
    } else {
        None
    }
}

fn insert_select_without_where(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if !stmt.kind.is_insert_like() {
        return None;
    }
    if SELECT_WITHOUT_WHERE_RE.is_match(&stmt.stripped)
        && !Regex::new(r"(?i)\bWHERE\b").unwrap().is_match(&stmt.stripped)
    {
        Some(Finding::new(CLA_015, 0, "INSERT ... SELECT copies from a source with no WHERE clause"))
    } else {
        None
    }
}
