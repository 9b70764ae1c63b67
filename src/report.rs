//! Component G: the report assembler. Collects per-statement findings, drops
//! any duplicate rule firings, applies severity overrides, sorts by
//! (severity descending, rule-identifier ascending), and packages the
//! `Report` spec.md's external interface describes.

use serde::Serialize;

use crate::{rules::meta::RuleMeta, settings::Settings, severity::Severity};

/// One rule's verdict against one statement.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub statement_index: usize,
    pub summary: &'static str,
    pub content: String,
    pub sample: &'static str
}

impl Finding {
    pub fn new(meta: &'static RuleMeta, statement_index: usize, content: impl Into<String>) -> Self {
        Self {
            rule_id: meta.id,
            severity: meta.severity,
            statement_index,
            summary: meta.summary,
            content: content.into(),
            sample: meta.sample
        }
    }
}

/// The finding set for one statement.
#[derive(Debug, Clone, Serialize)]
pub struct StatementReport {
    pub statement_index: usize,
    pub fingerprint: u64,
    pub findings: Vec<Finding>
}

/// The full result of one `analyze` call.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Report {
    pub statements: Vec<StatementReport>
}

impl Report {
    /// Highest severity across every finding, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.statements
            .iter()
            .flat_map(|s| s.findings.iter())
            .map(|f| f.severity)
            .max()
    }

    pub fn total_findings(&self) -> usize {
        self.statements.iter().map(|s| s.findings.len()).sum()
    }
}

/// Assemble a `Report` from raw per-statement finding sets. Applies
/// `Settings` severity overrides, de-duplicates so a rule appears at most
/// once per statement (first match wins), and sorts
/// (severity desc, rule-id asc).
pub fn assemble(
    fingerprints: &[u64],
    raw_findings: Vec<Vec<Finding>>,
    settings: &Settings
) -> Report {
    let mut statements = Vec::with_capacity(raw_findings.len());

    for (index, mut findings) in raw_findings.into_iter().enumerate() {
        let mut seen = std::collections::HashSet::new();
        findings.retain(|f| seen.insert(f.rule_id));

        for f in &mut findings {
            f.severity = settings.effective_severity(f.rule_id, f.severity);
            f.statement_index = index;
        }

        findings.sort_by(|a, b| b.severity.cmp(&a.severity).then_with(|| a.rule_id.cmp(b.rule_id)));

        statements.push(StatementReport {
            statement_index: index,
            fingerprint: fingerprints.get(index).copied().unwrap_or_default(),
            findings
        });
    }

    Report {
        statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::meta::CLA_001;

    #[test]
    fn dedups_keeping_first_match() {
        let findings = vec![vec![
            Finding::new(CLA_001, 0, "first"),
            Finding::new(CLA_001, 0, "second")
        ]];
        let report = assemble(&[0], findings, &Settings::default());
        assert_eq!(report.statements[0].findings.len(), 1);
        assert_eq!(report.statements[0].findings[0].content, "first");
    }

    #[test]
    fn sorts_by_severity_desc_then_id_asc() {
        use crate::rules::meta::{COL_001, SEC_001};
        let findings = vec![vec![
            Finding::new(COL_001, 0, "a"),
            Finding::new(SEC_001, 0, "b")
        ]];
        let report = assemble(&[0], findings, &Settings::default());
        assert_eq!(report.statements[0].findings[0].rule_id, "SEC.001");
    }

    #[test]
    fn stamps_statement_index_per_statement() {
        let findings = vec![
            vec![Finding::new(CLA_001, 0, "first statement")],
            vec![Finding::new(CLA_001, 0, "second statement")]
        ];
        let report = assemble(&[0, 0], findings, &Settings::default());
        assert_eq!(report.statements[0].findings[0].statement_index, 0);
        assert_eq!(report.statements[1].findings[0].statement_index, 1);
    }

    #[test]
    fn applies_severity_override() {
        let mut settings = Settings::default();
        settings.severity_overrides.insert("CLA.001".to_string(), Severity::L8);
        let findings = vec![vec![Finding::new(CLA_001, 0, "x")]];
        let report = assemble(&[0], findings, &settings);
        assert_eq!(report.statements[0].findings[0].severity, Severity::L8);
    }
}
