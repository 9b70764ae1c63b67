//! ALI — alias rules.

use regex::Regex;
use sqlparser::ast::{Expr, SelectItem, TableFactor};
use std::sync::LazyLock;

use crate::{
    ast_util::{from_clause, projection_items},
    report::Finding,
    rules::{FnRule, Rule, meta::{ALI_001, ALI_002, ALI_003}},
    settings::Settings,
    statement::Statement
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(ALI_001, implicit_alias)),
        Box::new(FnRule(ALI_002, star_with_alias)),
        Box::new(FnRule(ALI_003, alias_identical_to_source))
    ]
}

fn has_any_alias(stmt: &Statement) -> bool {
    let ast = match &stmt.ast {
        Some(a) => a,
        None => return false
    };
    let proj_alias = projection_items(ast)
        .iter()
        .any(|item| matches!(item, SelectItem::ExprWithAlias { .. }));
    let table_alias = from_clause(ast).iter().any(|t| {
        matches!(&t.relation, TableFactor::Table { alias: Some(_), .. })
    });
    proj_alias || table_alias
}

static AS_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bAS\b").unwrap());

fn implicit_alias(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if !has_any_alias(stmt) {
        return None;
    }
    if AS_KEYWORD_RE.is_match(&stmt.raw) {
        return None;
    }
    let _ = ast;
    Some(Finding::new(ALI_001, 0, "alias given without the `AS` keyword"))
}

static STAR_ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\*\s+AS\s+\w+").unwrap());

fn star_with_alias(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if STAR_ALIAS_RE.is_match(&stmt.raw) {
        Some(Finding::new(ALI_002, 0, "`*` projection is given an alias"))
    } else {
        None
    }
}

fn alias_identical_to_source(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;

    for item in projection_items(ast) {
        if let SelectItem::ExprWithAlias {
            expr,
            alias
        } = item
        {
            let source_name = match expr {
                Expr::Identifier(ident) => Some(ident.value.clone()),
                Expr::CompoundIdentifier(idents) => idents.last().map(|i| i.value.clone()),
                _ => None
            };
            if let Some(name) = source_name {
                if name.eq_ignore_ascii_case(&alias.value) {
                    return Some(Finding::new(
                        ALI_003,
                        0,
                        format!("column alias `{}` matches its source column name", alias.value)
                    ));
                }
            }
        }
    }

    for table in from_clause(ast) {
        if let TableFactor::Table {
            name,
            alias: Some(alias),
            ..
        } = &table.relation
        {
            if name.to_string().eq_ignore_ascii_case(&alias.name.value) {
                return Some(Finding::new(
                    ALI_003,
                    0,
                    format!("table alias `{}` matches its source table name", alias.name.value)
                ));
            }
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
    fn flags_implicit_column_alias() {
        let s = stmt("SELECT name n FROM t");
        assert!(implicit_alias(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_explicit_as_alias() {
        let s = stmt("SELECT name AS n FROM t");
        assert!(implicit_alias(&s, &Settings::default()).is_none());
    }

    #[test]
    fn flags_alias_identical_to_column() {
        let s = stmt("SELECT name AS name FROM t");
        assert!(alias_identical_to_source(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_distinct_alias() {
        let s = stmt("SELECT name AS n FROM t");
        assert!(alias_identical_to_source(&s, &Settings::default()).is_none());
    }
}
