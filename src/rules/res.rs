//! RES — result-determinism and predicate-sanity rules. `RES.008` (file
//! load/dump) is a lexical-probe rule and lives in `lexical.rs`; `RES.011`
//! (UPDATE overwrites an auto-update column) is catalog-dependent and lives
//! in `schema_aware.rs`.

use std::sync::LazyLock;

use regex::Regex;
use sqlparser::ast::{BinaryOperator, Expr, Value, ValueWithSpan};

use crate::{
    ast_util::{flatten_and, flatten_or, group_by_exprs, literal_number, literal_text, order_by_exprs, where_expr},
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{RES_001, RES_002, RES_003, RES_004, RES_005, RES_006, RES_007, RES_009, RES_010}
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(RES_001, nondeterministic_group_by)),
        Box::new(FnRule(RES_002, limit_without_order_by)),
        Box::new(FnRule(RES_003, dml_limit_without_order_by)),
        Box::new(FnRule(RES_004, dml_order_by_without_limit)),
        Box::new(FnRule(RES_005, and_as_set_separator)),
        Box::new(FnRule(RES_006, impossible_where)),
        Box::new(FnRule(RES_007, meaningless_where)),
        Box::new(FnRule(RES_009, chained_comparison)),
        Box::new(FnRule(RES_010, on_update_current_timestamp))
    ]
}

static LIMIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").unwrap());
static SET_CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)\bSET\b(.*?)(?:\bWHERE\b|$)").unwrap());
static ON_UPDATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bON\s+UPDATE\s+CURRENT_TIMESTAMP\b").unwrap());

fn nondeterministic_group_by(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::Select {
        return None;
    }
    let ast = stmt.ast.as_ref()?;
    if !group_by_exprs(ast).is_empty() && order_by_exprs(ast).is_empty() {
        Some(Finding::new(RES_001, 0, "GROUP BY without ORDER BY leaves row order/content undetermined"))
    } else {
        None
    }
}

fn limit_without_order_by(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::Select {
        return None;
    }
    let ast = stmt.ast.as_ref()?;
    if LIMIT_RE.is_match(&stmt.stripped) && order_by_exprs(ast).is_empty() {
        Some(Finding::new(RES_002, 0, "LIMIT without ORDER BY returns an arbitrary subset of rows"))
    } else {
        None
    }
}

fn dml_limit_without_order_by(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if !matches!(stmt.kind, StatementKind::Update | StatementKind::Delete) {
        return None;
    }
    if LIMIT_RE.is_match(&stmt.stripped) {
        Some(Finding::new(RES_003, 0, "LIMIT on UPDATE/DELETE affects an unspecified subset of matching rows"))
    } else {
        None
    }
}

fn dml_order_by_without_limit(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if !matches!(stmt.kind, StatementKind::Update | StatementKind::Delete) {
        return None;
    }
    let upper = stmt.stripped.to_ascii_uppercase();
    if upper.contains("ORDER BY") && !LIMIT_RE.is_match(&stmt.stripped) {
        Some(Finding::new(RES_004, 0, "ORDER BY on UPDATE/DELETE only matters paired with LIMIT"))
    } else {
        None
    }
}

fn and_as_set_separator(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::Update {
        return None;
    }
    let cap = SET_CLAUSE_RE.captures(&stmt.stripped)?;
    if cap[1].to_ascii_uppercase().contains(" AND ") {
        Some(Finding::new(RES_005, 0, "AND inside SET parses as a boolean assignment, not two column assignments"))
    } else {
        None
    }
}

fn is_eq_like(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Eq | BinaryOperator::NotEq)
}

/// Whether both sides of a comparison are literals with the same textual
/// value, comparing across types (`'a'` and `a` compare equal, `1` and `'1'`
/// compare equal) the way [`literal_text`] normalizes them.
fn literal_eq(left: &Expr, right: &Expr) -> Option<bool> {
    let (l, r) = (literal_text(left)?, literal_text(right)?);
    Some(l == r)
}

fn impossible_where(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let expr = where_expr(ast)?;
    let mut conjuncts = Vec::new();
    flatten_and(expr, &mut conjuncts);
    for c in conjuncts {
        match c {
            Expr::BinaryOp {
                left,
                op: BinaryOperator::NotEq,
                right
            } => {
                if literal_eq(left, right) == Some(true) {
                    return Some(Finding::new(RES_006, 0, "WHERE predicate compares a literal to itself with !=, which is never true"));
                }
            }
            Expr::BinaryOp {
                left,
                op: BinaryOperator::Eq,
                right
            } => {
                if literal_eq(left, right) == Some(false) {
                    return Some(Finding::new(RES_006, 0, "WHERE predicate compares two distinct literals with =, which is never true"));
                }
            }
            Expr::Between {
                low,
                high,
                negated: false,
                ..
            } => {
                if let (Some(l), Some(h)) = (literal_number(low), literal_number(high)) {
                    if l > h {
                        return Some(Finding::new(RES_006, 0, "BETWEEN's low bound is greater than its high bound"));
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Truthiness of a bare literal under the same loose coercion a string-typed
/// predicate gets in a boolean context: a number is truthy unless zero, a
/// boolean is itself, and a string is truthy unless empty or spelling `"0"`
/// or `"false"` (case-insensitive).
fn literal_truthiness(expr: &Expr) -> Option<bool> {
    match expr {
        Expr::Value(ValueWithSpan {
            value, ..
        }) => match value {
            Value::Number(n, _) => Some(n.parse::<f64>().map(|f| f != 0.0).unwrap_or(true)),
            Value::Boolean(b) => Some(*b),
            Value::SingleQuotedString(s) | Value::DoubleQuotedString(s) => {
                Some(!(s.is_empty() || s.eq_ignore_ascii_case("false") || s == "0"))
            }
            Value::Null => Some(false),
            _ => None
        },
        _ => None
    }
}

fn meaningless_where(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let expr = where_expr(ast)?;
    let mut conjuncts = Vec::new();
    flatten_and(expr, &mut conjuncts);
    for c in conjuncts {
        let mut disjuncts = Vec::new();
        flatten_or(c, &mut disjuncts);
        for d in disjuncts {
            if literal_truthiness(d) == Some(true) {
                return Some(Finding::new(RES_007, 0, "WHERE predicate contains a constant truthy term and filters nothing"));
            }
            match d {
                Expr::BinaryOp {
                    left,
                    op: BinaryOperator::Eq,
                    right
                } if literal_eq(left, right) == Some(true) => {
                    return Some(Finding::new(RES_007, 0, "WHERE predicate is a constant truthy comparison and filters nothing"));
                }
                Expr::BinaryOp {
                    left,
                    op: BinaryOperator::NotEq,
                    right
                } if literal_eq(left, right) == Some(false) => {
                    return Some(Finding::new(RES_007, 0, "WHERE predicate compares two distinct literals with !=, which is always true"));
                }
                _ => {}
            }
        }
    }
    None
}

fn chained_comparison(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let expr = where_expr(ast)?;
    if has_chained_comparison(expr) {
        Some(Finding::new(RES_009, 0, "chained comparison evaluates left-to-right rather than pairwise"))
    } else {
        None
    }
}

fn has_chained_comparison(expr: &Expr) -> bool {
    match expr {
        Expr::BinaryOp {
            left,
            op,
            right
        } if is_eq_like(*op) => {
            let left_is_comparison =
                matches!(left.as_ref(), Expr::BinaryOp { op: inner_op, .. } if is_eq_like(*inner_op));
            let right_is_comparison =
                matches!(right.as_ref(), Expr::BinaryOp { op: inner_op, .. } if is_eq_like(*inner_op));
            left_is_comparison || right_is_comparison
        }
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And | BinaryOperator::Or,
            right
        } => has_chained_comparison(left) || has_chained_comparison(right),
        Expr::Nested(inner) => has_chained_comparison(inner),
        _ => false
    }
}

fn on_update_current_timestamp(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if stmt.kind != StatementKind::DdlCreateTable {
        return None;
    }
    if ON_UPDATE_RE.is_match(&stmt.stripped) {
        Some(Finding::new(RES_010, 0, "column auto-updates on every write via ON UPDATE CURRENT_TIMESTAMP"))
    } else {
        None
    }
}
