//! JOI — join rules.

use regex::Regex;
use std::sync::LazyLock;

use crate::{
    ast_util::{NameSet, all_joins, from_clause, table_factor_name},
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{JOI_001, JOI_002, JOI_005, JOI_006, JOI_007, JOI_008}
    },
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(JOI_001, mixed_comma_and_ansi_join)),
        Box::new(FnRule(JOI_002, duplicate_joined_table)),
        Box::new(FnRule(JOI_005, too_many_joins)),
        Box::new(FnRule(JOI_006, nested_subqueries)),
        Box::new(FnRule(JOI_007, multi_table_dml)),
        Box::new(FnRule(JOI_008, cross_database_join))
    ]
}

/// Join count above which `JOI.005` fires. Not settings-driven since
/// spec.md does not carry a configurable threshold for it.
const MAX_JOINS: usize = 3;
const MAX_SUBQUERY_DEPTH: usize = 2;

fn mixed_comma_and_ansi_join(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let from = from_clause(ast);
    if from.len() > 1 && from.iter().any(|t| !t.joins.is_empty()) {
        Some(Finding::new(JOI_001, 0, "statement mixes comma-style joins with ANSI JOIN ... ON"))
    } else {
        None
    }
}

fn duplicate_joined_table(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let mut names = Vec::new();
    for t in from_clause(ast) {
        if let Some(name) = table_factor_name(&t.relation) {
            names.push(name.to_ascii_lowercase());
        }
        for j in &t.joins {
            if let Some(name) = table_factor_name(&j.relation) {
                names.push(name.to_ascii_lowercase());
            }
        }
    }
    let mut seen: NameSet = NameSet::new();
    for name in &names {
        if !seen.insert(name.as_str().into()) {
            return Some(Finding::new(JOI_002, 0, format!("table `{}` is joined more than once", name)));
        }
    }
    None
}

fn too_many_joins(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let count = all_joins(ast).len();
    if count > MAX_JOINS {
        Some(Finding::new(JOI_005, 0, format!("statement has {} joins, above the configured threshold", count)))
    } else {
        None
    }
}

static SUBQUERY_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\(\s*SELECT\b").unwrap());

fn nested_subqueries(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let count = SUBQUERY_OPEN_RE.find_iter(&stmt.stripped).count();
    if count >= MAX_SUBQUERY_DEPTH {
        Some(Finding::new(JOI_006, 0, "statement nests subqueries beyond a readable depth"))
    } else {
        None
    }
}

static MULTI_TABLE_UPDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*UPDATE\b[\s\S]*\bJOIN\b[\s\S]*\bSET\b").unwrap());

fn multi_table_dml(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if !matches!(stmt.kind, StatementKind::Update | StatementKind::Delete) {
        return None;
    }
    if MULTI_TABLE_UPDATE_RE.is_match(&stmt.stripped) {
        return Some(Finding::new(JOI_007, 0, "UPDATE/DELETE spans multiple tables in one statement"));
    }
    if let Some(ast) = &stmt.ast {
        if from_clause(ast).len() > 1 {
            return Some(Finding::new(JOI_007, 0, "UPDATE/DELETE spans multiple tables in one statement"));
        }
    }
    None
}

fn cross_database_join(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    let mut dbs: NameSet = NameSet::new();
    for t in from_clause(ast) {
        collect_db(&t.relation, &mut dbs);
        for j in &t.joins {
            collect_db(&j.relation, &mut dbs);
        }
    }
    if dbs.len() > 1 {
        Some(Finding::new(JOI_008, 0, "join references tables from more than one database"))
    } else {
        None
    }
}

fn collect_db(tf: &sqlparser::ast::TableFactor, out: &mut NameSet) {
    if let Some(name) = table_factor_name(tf) {
        if let Some((db, _)) = name.split_once('.') {
            out.insert(db.to_ascii_lowercase().into());
        }
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
    fn flags_mixed_join_style() {
        let s = stmt("SELECT * FROM a, b JOIN c ON b.id = c.id");
        assert!(mixed_comma_and_ansi_join(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_too_many_joins() {
        let s = stmt(
            "SELECT * FROM a JOIN b ON a.id=b.id JOIN c ON a.id=c.id JOIN d ON a.id=d.id JOIN e ON a.id=e.id"
        );
        assert!(too_many_joins(&s, &Settings::default()).is_some());
    }

    #[test]
    fn flags_cross_database_join() {
        let s = stmt("SELECT * FROM db1.a JOIN db2.b ON a.id = b.id");
        assert!(cross_database_join(&s, &Settings::default()).is_some());
    }

    #[test]
    fn accepts_single_database_join() {
        let s = stmt("SELECT * FROM a JOIN b ON a.id = b.id");
        assert!(cross_database_join(&s, &Settings::default()).is_none());
    }
}
