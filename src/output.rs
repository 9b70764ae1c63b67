//! Result formatting for the CLI's supported output formats.

use colored::Colorize;
use serde::Serialize;

use crate::{report::Report, severity::Severity};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif
}

/// Output options.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            colored: true
        }
    }
}

pub fn format_report(report: &Report, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Sarif => serde_json::to_string_pretty(&to_sarif(report)).unwrap_or_default(),
        OutputFormat::Text => format_text(report, opts)
    }
}

fn severity_label(severity: Severity, colored: bool) -> String {
    let s = severity.to_string();
    if !colored {
        return s;
    }
    match severity {
        Severity::L7 | Severity::L8 => s.red().bold().to_string(),
        Severity::L5 | Severity::L6 => s.yellow().bold().to_string(),
        _ => s.cyan().to_string()
    }
}

fn format_text(report: &Report, opts: &OutputOptions) -> String {
    let mut out = String::new();

    if report.total_findings() == 0 {
        let line = "No findings.";
        out.push_str(if opts.colored { &line.green().to_string() } else { line });
        out.push('\n');
        return out;
    }

    for stmt in &report.statements {
        if stmt.findings.is_empty() {
            continue;
        }
        let header = format!("Statement #{} (fingerprint {:016x}):", stmt.statement_index + 1, stmt.fingerprint);
        out.push_str(if opts.colored { &header.bold().to_string() } else { &header });
        out.push('\n');

        for finding in &stmt.findings {
            let sev = severity_label(finding.severity, opts.colored);
            out.push_str(&format!("  [{}] {} - {}\n", sev, finding.rule_id, finding.summary));
            out.push_str(&format!("    {}\n", finding.content));
        }
        out.push('\n');
    }

    out
}

#[derive(Debug, Serialize)]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: &'static str,
    #[serde(rename = "informationUri")]
    information_uri: &'static str
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: &'static str,
    level: &'static str,
    message: SarifMessage
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::L7 | Severity::L8 => "error",
        Severity::L4 | Severity::L5 | Severity::L6 => "warning",
        _ => "note"
    }
}

fn to_sarif(report: &Report) -> SarifLog {
    let results = report
        .statements
        .iter()
        .flat_map(|s| s.findings.iter())
        .map(|f| SarifResult {
            rule_id: f.rule_id,
            level: sarif_level(f.severity),
            message: SarifMessage {
                text: format!("{}: {}", f.summary, f.content)
            }
        })
        .collect();

    SarifLog {
        schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
        version: "2.1.0",
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "sql-query-advisor",
                    information_uri: "https://github.com/RAprogramm/sql-query-analyzer"
                }
            },
            results
        }]
    }
}
