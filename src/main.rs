//! # SQL Query Advisor
//!
//! Heuristic static analysis for MySQL-dialect SQL: a rule engine runs
//! ~150 rules in parallel (via `rayon`), optionally against a parsed
//! schema for catalog-aware checks.
//!
//! # Quick Start
//!
//! ```bash
//! # Basic static analysis
//! sql-query-advisor analyze -q queries.sql
//!
//! # With a schema for catalog-aware rules
//! sql-query-advisor analyze -q queries.sql -s schema.sql
//!
//! # CI/CD integration with SARIF output
//! sql-query-advisor analyze -q queries.sql -f sarif > results.sarif
//!
//! # Stream queries from stdin
//! echo "SELECT * FROM users" | sql-query-advisor analyze -q -
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. `SQL_ADVISOR_DISABLED_RULES` environment variable
//! 2. `.sql-query-advisor.toml` in the current directory
//! 3. `~/.config/sql-query-advisor/config.toml`
//! 4. Built-in defaults
//!
//! # Exit Codes
//!
//! The process exit code reflects whether any finding reached `--fail-at`
//! (default `L4`):
//!
//! - `0` - no finding at or above the threshold
//! - `1` - at least one finding at or above the threshold

use std::{
    fs::read_to_string,
    io::{self, Read},
    process
};

use clap::Parser;
use sql_query_advisor::{
    analyze, analyze_with_catalog,
    catalog::SchemaCatalog,
    cli::{Cli, Commands, Dialect, Format},
    config::Config,
    error::{AppResult, config_error, file_read_error},
    output::{OutputFormat, OutputOptions, format_report},
    parser::SqlDialect,
    schema::Schema,
    severity::Severity
};

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    let settings = Config::load()?;

    match cli.command {
        Commands::Analyze {
            queries,
            schema,
            dialect,
            output_format,
            no_color,
            fail_at
        } => {
            let queries_sql = if queries.to_str() == Some("-") {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer).map_err(|e| file_read_error("stdin", e))?;
                buffer
            } else {
                read_to_string(&queries).map_err(|e| file_read_error(&queries.display().to_string(), e))?
            };

            let sql_dialect = match dialect {
                Dialect::Generic => SqlDialect::Generic,
                Dialect::Mysql => SqlDialect::MySql,
                Dialect::Postgresql => SqlDialect::PostgreSql,
                Dialect::Sqlite => SqlDialect::SQLite,
                Dialect::Clickhouse => SqlDialect::ClickHouse
            };

            let output_opts = OutputOptions {
                format: match output_format {
                    Format::Text => OutputFormat::Text,
                    Format::Json => OutputFormat::Json,
                    Format::Sarif => OutputFormat::Sarif
                },
                colored: !no_color
            };

            let threshold = Severity::parse(&fail_at)
                .ok_or_else(|| config_error(format!("invalid --fail-at severity `{}`", fail_at)))?;

            let report = if let Some(schema_path) = schema {
                let schema_sql = read_to_string(&schema_path)
                    .map_err(|e| file_read_error(&schema_path.display().to_string(), e))?;
                let parsed_schema = Schema::parse(&schema_sql)?;
                let catalog = SchemaCatalog::new(parsed_schema);
                analyze_with_catalog(&queries_sql, sql_dialect, &settings, &catalog)
            } else {
                analyze(&queries_sql, sql_dialect, &settings)
            };

            let output = format_report(&report, &output_opts);
            println!("{}", output);

            let exit_code = if report.max_severity().is_some_and(|s| s >= threshold) {
                1
            } else {
                0
            };

            Ok(exit_code)
        }
    }
}
