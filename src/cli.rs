use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Heuristic SQL advisor - static analysis for SQL queries
#[derive(Parser, Debug)]
#[command(name = "sql-query-advisor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze SQL queries, optionally against a schema
    Analyze {
        /// Path to SQL queries file (use - for stdin)
        #[arg(short, long)]
        queries: PathBuf,

        /// Path to SQL schema file (enables catalog-aware rules)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// SQL dialect for parsing
        #[arg(long, value_enum, default_value = "mysql")]
        dialect: Dialect,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Exit with a non-zero code only at or above this severity (L0-L8)
        #[arg(long, default_value = "L4")]
        fail_at: String
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Dialect {
    Generic,
    Mysql,
    Postgresql,
    Sqlite,
    Clickhouse
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Sarif
}
