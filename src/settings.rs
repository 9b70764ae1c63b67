//! The `Settings` value type: thresholds and allow-lists threaded explicitly
//! through `analyze`. Never a global — every rule that needs a threshold
//! receives `&Settings` alongside the statement it is inspecting.

use std::collections::HashSet;

use serde::Deserialize;

/// Thresholds, allow-lists, and rule enable/disable state for one `analyze`
/// call. Construct via [`Settings::default`] and override fields, or load
/// from TOML via [`crate::config::Config::load`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Max items allowed in an `IN (...)` list before `ARG.004` fires.
    pub max_in_count: usize,
    /// Max rows allowed in a single `VALUES (...), (...)` before `ARG.012` fires.
    pub max_value_count: usize,
    /// Max columns allowed in one composite index before `KEY.006` fires.
    pub max_idx_cols: usize,
    /// Max number of indexes on one table before `KEY.005` fires.
    pub max_idx_count: usize,
    /// Max columns allowed in one table before `COL.006` fires.
    pub max_col_count: usize,
    /// Max TEXT/BLOB/JSON columns allowed in one table before `COL.007` fires.
    pub max_text_cols: usize,
    /// Statement text length, in characters, above which `CLA.012` fires.
    pub spaghetti_query_length: usize,
    /// `LIMIT offset, n` / `OFFSET` value above which `CLA.003` fires.
    pub max_offset: u64,
    /// `VARCHAR(n)` length above which `COL.017` fires.
    pub max_varchar_length: u64,
    /// Estimated row-count below which a missing index is not worth flagging.
    pub min_cardinality: u64,
    /// Storage engines permitted without triggering `TBL.002`.
    pub allow_engines: HashSet<String>,
    /// Character sets permitted without triggering `TBL.005`.
    pub allow_charsets: HashSet<String>,
    /// Collations permitted without triggering `TBL.008`.
    pub allow_collations: HashSet<String>,
    /// Whether `DROP` statements are permitted without `SEC.003` firing for
    /// the drop itself (destructive DML via DELETE/TRUNCATE still fires).
    pub allow_drop: bool,
    /// Rule identifiers disabled outright; `analyze` never evaluates them.
    pub disabled_rules: HashSet<String>,
    /// Per-rule severity overrides, keyed by rule identifier.
    pub severity_overrides: std::collections::HashMap<String, crate::severity::Severity>
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_in_count: 20,
            max_value_count: 100,
            max_idx_cols: 5,
            max_idx_count: 5,
            max_col_count: 40,
            max_text_cols: 2,
            spaghetti_query_length: 2048,
            max_offset: 1000,
            max_varchar_length: 1024,
            min_cardinality: 10_000,
            allow_engines: ["InnoDB".to_string()].into_iter().collect(),
            allow_charsets: ["utf8mb4".to_string()].into_iter().collect(),
            allow_collations: ["utf8mb4_general_ci".to_string(), "utf8mb4_unicode_ci".to_string()]
                .into_iter()
                .collect(),
            allow_drop: false,
            disabled_rules: HashSet::new(),
            severity_overrides: std::collections::HashMap::new()
        }
    }
}

impl Settings {
    /// True when `rule_id` has been explicitly disabled.
    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.disabled_rules.contains(rule_id)
    }

    /// The effective severity for `rule_id`: its override if one is
    /// configured, otherwise `default_severity`.
    pub fn effective_severity(
        &self,
        rule_id: &str,
        default_severity: crate::severity::Severity
    ) -> crate::severity::Severity {
        self.severity_overrides
            .get(rule_id)
            .copied()
            .unwrap_or(default_severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;

    #[test]
    fn defaults_are_sane() {
        let s = Settings::default();
        assert_eq!(s.max_in_count, 20);
        assert!(s.allow_engines.contains("InnoDB"));
        assert!(!s.allow_drop);
    }

    #[test]
    fn severity_override_wins() {
        let mut s = Settings::default();
        s.severity_overrides.insert("COL.001".to_string(), Severity::L8);
        assert_eq!(s.effective_severity("COL.001", Severity::L1), Severity::L8);
        assert_eq!(s.effective_severity("COL.002", Severity::L1), Severity::L1);
    }

    #[test]
    fn disabled_rules_are_tracked() {
        let mut s = Settings::default();
        s.disabled_rules.insert("CLA.001".to_string());
        assert!(s.is_disabled("CLA.001"));
        assert!(!s.is_disabled("CLA.002"));
    }
}
