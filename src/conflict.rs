//! Component F: the conflict resolver. A static adjacency map of
//! *suppression pairs* `{dominator -> {dominated...}}`; after a statement's
//! findings are collected, every dominated rule is removed if its dominator
//! also fired. Runs once per statement and is idempotent — applying it
//! twice is a no-op the second time since the dominated findings are
//! already gone.

use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};

use crate::report::Finding;

/// `dominator -> {dominated...}`. Static and part of the catalog, not
/// embedded in individual rule implementations, per spec.md §9. An
/// `IndexMap`/`IndexSet` preserve the declaration order above, which keeps
/// the catalog's own ordering intact if it is ever rendered for inspection.
static SUPPRESSION_PAIRS: LazyLock<IndexMap<&'static str, IndexSet<&'static str>>> = LazyLock::new(|| {
    IndexMap::from_iter([
        ("SEC.003", IndexSet::from_iter(["CLA.001", "CLA.014", "CLA.015"])),
        ("RES.007", IndexSet::from_iter(["CLA.001", "CLA.014", "CLA.015"])),
        ("RES.006", IndexSet::from_iter(["CLA.001", "CLA.014", "CLA.015"])),
        ("SEC.001", IndexSet::from_iter(["CLA.001", "CLA.014", "CLA.015"])),
        ("SEC.002", IndexSet::from_iter(["CLA.001", "CLA.014", "CLA.015"])),
    ])
});

/// Remove every dominated finding whose dominator also fired in `findings`.
pub fn resolve(mut findings: Vec<Finding>) -> Vec<Finding> {
    let fired: IndexSet<&str> = findings.iter().map(|f| f.rule_id).collect();

    let dominated: IndexSet<&str> = SUPPRESSION_PAIRS
        .iter()
        .filter(|(dominator, _)| fired.contains(*dominator))
        .flat_map(|(_, dominated)| dominated.iter().copied())
        .collect();

    findings.retain(|f| !dominated.contains(f.rule_id));
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::meta::{CLA_001, SEC_003};

    #[test]
    fn dominator_suppresses_dominated() {
        let findings = vec![Finding::new(SEC_003, 0, "destructive"), Finding::new(CLA_001, 0, "no where")];
        let resolved = resolve(findings);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].rule_id, "SEC.003");
    }

    #[test]
    fn no_dominator_leaves_findings_untouched() {
        let findings = vec![Finding::new(CLA_001, 0, "no where")];
        let resolved = resolve(findings);
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let findings = vec![Finding::new(SEC_003, 0, "destructive"), Finding::new(CLA_001, 0, "no where")];
        let once = resolve(findings);
        let twice = resolve(once.clone());
        assert_eq!(once.len(), twice.len());
        assert_eq!(once[0].rule_id, twice[0].rule_id);
    }
}
