//! # SQL Query Advisor
//!
//! A heuristic static-analysis engine for MySQL-dialect SQL: ~150 named
//! rules across naming, indexing, literal-shape, subquery, security and
//! DDL categories, plus a small set of catalog-aware rules that only fire
//! when a schema is supplied.
//!
//! # Architecture
//!
//! 1. [`parser`] splits raw SQL text into individual statements and wraps
//!    each as a [`statement::Statement`], parsing with `sqlparser` where
//!    possible and falling back to a keyword guess when parsing fails.
//! 2. [`lexical`] runs a handful of rules that operate on raw text before
//!    (or regardless of) parsing.
//! 3. [`rules`] runs the full rule catalog against every statement in
//!    parallel (via `rayon`), plus the [`catalog::Catalog`]-aware subset
//!    when a catalog is supplied.
//! 4. [`conflict`] drops findings that a stronger, overlapping finding on
//!    the same statement already subsumes.
//! 5. [`report`] deduplicates, applies severity overrides, sorts, and
//!    assembles the final [`report::Report`].
//!
//! # Configuration
//!
//! [`config::Config::load`] reads [`settings::Settings`] from
//! `~/.config/sql-query-advisor/config.toml`, then `.sql-query-advisor.toml`
//! in the current directory, then the `SQL_ADVISOR_DISABLED_RULES`
//! environment variable, each layer overriding the previous.

pub mod ast_util;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod conflict;
pub mod error;
pub mod lexical;
pub mod output;
pub mod parser;
pub mod report;
pub mod rules;
pub mod schema;
pub mod settings;
pub mod severity;
pub mod statement;

use catalog::{Catalog, NullCatalog};
use report::Report;
use settings::Settings;
use statement::Statement;

/// Parse `sql` under `dialect` and run the full rule catalog against it,
/// without any schema/catalog awareness.
pub fn analyze(sql: &str, dialect: parser::SqlDialect, settings: &Settings) -> Report {
    analyze_with_catalog(sql, dialect, settings, &NullCatalog)
}

/// Parse `sql` under `dialect` and run the full rule catalog, including the
/// catalog-aware subset, against the supplied [`Catalog`].
pub fn analyze_with_catalog(
    sql: &str,
    dialect: parser::SqlDialect,
    settings: &Settings,
    catalog: &dyn Catalog
) -> Report {
    let statements = parser::parse_statements(sql, dialect);
    run_analysis(&statements, settings, catalog)
}

fn run_analysis(statements: &[Statement], settings: &Settings, catalog: &dyn Catalog) -> Report {
    let fingerprints: Vec<u64> = statements.iter().map(|s| s.fingerprint).collect();
    let raw_findings = rules::evaluate_all(statements, settings, catalog);
    let resolved: Vec<Vec<report::Finding>> = raw_findings.into_iter().map(conflict::resolve).collect();
    report::assemble(&fingerprints, resolved, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_returns_one_report_per_statement() {
        let sql = "SELECT * FROM t; DELETE FROM t;";
        let report = analyze(sql, parser::SqlDialect::MySql, &Settings::default());
        assert_eq!(report.statements.len(), 2);
    }

    #[test]
    fn analyze_with_catalog_runs_schema_aware_rules() {
        let schema = schema::Schema::parse(
            "CREATE TABLE t (id INT PRIMARY KEY, updated_at TIMESTAMP ON UPDATE CURRENT_TIMESTAMP)"
        )
        .unwrap();
        let catalog = catalog::SchemaCatalog::new(schema);
        let report = analyze_with_catalog(
            "UPDATE t SET id = 1 WHERE id = 1",
            parser::SqlDialect::MySql,
            &Settings::default(),
            &catalog
        );
        assert_eq!(report.statements.len(), 1);
        assert!(report.statements[0].findings.iter().any(|f| f.rule_id == "RES.011"));
    }
}
