//! Shared AST-reading helpers used across the rule catalog. Rules that can
//! be expressed precisely over the parsed AST use these; rules over DDL
//! shapes sqlparser does not expose richly (charset clauses, index
//! prefixes, `AUTO_INCREMENT =`) read `Statement.raw` with a regex instead,
//! the same mix the rule catalog's origin (a Go heuristic advisor) uses.

use compact_str::CompactString;
use indexmap::IndexSet;
use smallvec::SmallVec;
use sqlparser::ast::{
    Expr, GroupByExpr, Ident, Join, JoinConstraint, JoinOperator, OrderByKind, Select, SelectItem,
    SetExpr, Statement as Ast, TableFactor, TableWithJoins, Value, ValueWithSpan
};

/// A small, stack-allocated list of column/identifier names — most column
/// lists a rule inspects (a composite index, a `GROUP BY`) are a handful of
/// names, so this avoids a heap allocation for the common case.
pub type ColumnVec = SmallVec<[CompactString; 8]>;

/// An insertion-ordered, deduplicated set of column/table/database names —
/// used wherever a rule needs "every distinct name referenced here" while
/// still reporting them in source order.
pub type NameSet = IndexSet<CompactString>;

/// Drill down to the innermost `Select` of a top-level `Query` statement,
/// stopping at the first `SetExpr::SetOperation` (a `UNION`/`INTERSECT`) —
/// callers that need per-branch selects should recurse on `set_operation_branches`.
pub fn top_select(stmt: &Ast) -> Option<&Select> {
    match stmt {
        Ast::Query(q) => select_from_set_expr(&q.body),
        _ => None
    }
}

fn select_from_set_expr(set_expr: &SetExpr) -> Option<&Select> {
    match set_expr {
        SetExpr::Select(s) => Some(s.as_ref()),
        SetExpr::Query(q) => select_from_set_expr(&q.body),
        _ => None
    }
}

/// True when the top-level query body is a `UNION`/`INTERSECT`/`EXCEPT`.
pub fn is_set_operation(stmt: &Ast) -> bool {
    matches!(stmt, Ast::Query(q) if matches!(q.body.as_ref(), SetExpr::SetOperation { .. }))
}

/// Both branches of a top-level set operation, recursively flattened.
pub fn set_operation_branches(stmt: &Ast) -> Vec<&SetExpr> {
    fn walk<'a>(expr: &'a SetExpr, out: &mut Vec<&'a SetExpr>) {
        match expr {
            SetExpr::SetOperation {
                left,
                right,
                ..
            } => {
                walk(left, out);
                walk(right, out);
            }
            other => out.push(other)
        }
    }
    let mut out = Vec::new();
    if let Ast::Query(q) = stmt {
        walk(&q.body, &mut out);
    }
    out
}

/// `WHERE` predicate for `SELECT`, `UPDATE`, or `DELETE`.
pub fn where_expr(stmt: &Ast) -> Option<&Expr> {
    match stmt {
        Ast::Update {
            selection, ..
        } => selection.as_ref(),
        Ast::Delete(delete) => delete.selection.as_ref(),
        Ast::Query(_) => top_select(stmt).and_then(|s| s.selection.as_ref()),
        _ => None
    }
}

pub fn having_expr(stmt: &Ast) -> Option<&Expr> {
    top_select(stmt).and_then(|s| s.having.as_ref())
}

pub fn group_by_exprs(stmt: &Ast) -> Vec<&Expr> {
    match top_select(stmt).map(|s| &s.group_by) {
        Some(GroupByExpr::Expressions(exprs, _)) => exprs.iter().collect(),
        _ => Vec::new()
    }
}

pub fn order_by_exprs(stmt: &Ast) -> Vec<&Expr> {
    let order_by = match stmt {
        Ast::Query(q) => q.order_by.as_ref(),
        _ => None
    };
    match order_by.map(|o| &o.kind) {
        Some(OrderByKind::Expressions(exprs)) => exprs.iter().map(|e| &e.expr).collect(),
        _ => Vec::new()
    }
}

pub fn projection_items(stmt: &Ast) -> &[SelectItem] {
    top_select(stmt).map(|s| s.projection.as_slice()).unwrap_or(&[])
}

pub fn from_clause(stmt: &Ast) -> &[TableWithJoins] {
    top_select(stmt).map(|s| s.from.as_slice()).unwrap_or(&[])
}

pub fn is_distinct(stmt: &Ast) -> bool {
    top_select(stmt).map(|s| s.distinct.is_some()).unwrap_or(false)
}

/// Every `Join` across every `FROM` item, flattened.
pub fn all_joins(stmt: &Ast) -> Vec<&Join> {
    from_clause(stmt).iter().flat_map(|t| t.joins.iter()).collect()
}

/// Table name for a `TableFactor::Table`, if that's what it is.
pub fn table_factor_name(tf: &TableFactor) -> Option<String> {
    match tf {
        TableFactor::Table {
            name, ..
        } => Some(name.to_string()),
        _ => None
    }
}

/// The `ON` predicate of a join, for the join kinds that carry one.
pub fn join_on_expr(join: &Join) -> Option<&Expr> {
    match &join.join_operator {
        JoinOperator::Inner(c)
        | JoinOperator::LeftOuter(c)
        | JoinOperator::RightOuter(c)
        | JoinOperator::FullOuter(c) => match c {
            JoinConstraint::On(e) => Some(e),
            _ => None
        },
        _ => None
    }
}

/// Whether `expr` is a bare literal (number, string, boolean, null).
pub fn is_literal(expr: &Expr) -> bool {
    matches!(expr, Expr::Value(_))
}

/// Render a `Value` as plain text for literal-vs-literal comparisons,
/// stripping quotes so `'a'` and `a` compare equal as values.
pub fn literal_text(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Value(ValueWithSpan {
            value, ..
        }) => Some(match value {
            Value::Number(n, _) => n.clone(),
            Value::SingleQuotedString(s) | Value::DoubleQuotedString(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Null => "NULL".to_string(),
            other => other.to_string()
        }),
        _ => None
    }
}

/// Numeric value of a literal, if it parses as a number.
pub fn literal_number(expr: &Expr) -> Option<f64> {
    literal_text(expr).and_then(|t| t.parse().ok())
}

/// Recursively collect every function name called anywhere inside `expr`.
pub fn function_calls<'a>(expr: &'a Expr, out: &mut Vec<&'a str>) {
    match expr {
        Expr::Function(f) => {
            if let Some(last) = f.name.0.last() {
                out.push(ident_value(last));
            }
            if let sqlparser::ast::FunctionArguments::List(list) = &f.args {
                for arg in &list.args {
                    if let sqlparser::ast::FunctionArg::Unnamed(
                        sqlparser::ast::FunctionArgExpr::Expr(e)
                    ) = arg
                    {
                        function_calls(e, out);
                    }
                }
            }
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            function_calls(left, out);
            function_calls(right, out);
        }
        Expr::UnaryOp {
            expr, ..
        }
        | Expr::Nested(expr)
        | Expr::IsNull(expr)
        | Expr::IsNotNull(expr) => function_calls(expr, out),
        Expr::Between {
            expr,
            low,
            high,
            ..
        } => {
            function_calls(expr, out);
            function_calls(low, out);
            function_calls(high, out);
        }
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            if let Some(o) = operand {
                function_calls(o, out);
            }
            for cw in conditions {
                function_calls(&cw.condition, out);
                function_calls(&cw.result, out);
            }
            if let Some(e) = else_result {
                function_calls(e, out);
            }
        }
        _ => {}
    }
}

fn ident_value(ident: &Ident) -> &str {
    ident.value.as_str()
}

/// Flatten a `BinaryOp` chain of `Or`s into its leaf comparisons.
pub fn flatten_or<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::BinaryOp {
            left,
            op: sqlparser::ast::BinaryOperator::Or,
            right
        } => {
            flatten_or(left, out);
            flatten_or(right, out);
        }
        Expr::Nested(inner) => flatten_or(inner, out),
        other => out.push(other)
    }
}

/// Flatten a `BinaryOp` chain of `And`s into its leaf conjuncts.
pub fn flatten_and<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::BinaryOp {
            left,
            op: sqlparser::ast::BinaryOperator::And,
            right
        } => {
            flatten_and(left, out);
            flatten_and(right, out);
        }
        Expr::Nested(inner) => flatten_and(inner, out),
        other => out.push(other)
    }
}

#[cfg(test)]
mod tests {
    use sqlparser::{dialect::MySqlDialect, parser::Parser};

    use super::*;

    fn parse_one(sql: &str) -> Ast {
        Parser::parse_sql(&MySqlDialect {}, sql).unwrap().remove(0)
    }

    #[test]
    fn where_expr_found_on_select() {
        let stmt = parse_one("SELECT * FROM t WHERE id = 1");
        assert!(where_expr(&stmt).is_some());
    }

    #[test]
    fn where_expr_missing_on_bare_select() {
        let stmt = parse_one("SELECT * FROM t");
        assert!(where_expr(&stmt).is_none());
    }

    #[test]
    fn detects_union() {
        let stmt = parse_one("SELECT a FROM t1 UNION SELECT a FROM t2");
        assert!(is_set_operation(&stmt));
    }

    #[test]
    fn literal_text_strips_quotes() {
        let stmt = parse_one("SELECT * FROM t WHERE a = '1'");
        let where_e = where_expr(&stmt).unwrap();
        if let Expr::BinaryOp {
            right, ..
        } = where_e
        {
            assert_eq!(literal_text(right).as_deref(), Some("1"));
        } else {
            panic!("expected binary op");
        }
    }
}
