//! Ordinal severity scale for advisory findings.
//!
//! Nine levels, `L0` (informational) through `L8` (critical). Unlike a
//! three-level `Info/Warning/Error` split, this preserves the fine-grained
//! ranking a catalog of ~150 rules needs when findings for one statement are
//! sorted for rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rule's criticality, used to sort findings and to compute exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    L0,
    L1,
    L2,
    L3,
    L4,
    L5,
    L6,
    L7,
    L8
}

impl Severity {
    /// Parse a severity from its wire form (`"L0"`..`"L8"`, case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "L0" => Self::L0,
            "L1" => Self::L1,
            "L2" => Self::L2,
            "L3" => Self::L3,
            "L4" => Self::L4,
            "L5" => Self::L5,
            "L6" => Self::L6,
            "L7" => Self::L7,
            "L8" => Self::L8,
            _ => return None
        })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::L0 => "L0",
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::L4 => "L4",
            Self::L5 => "L5",
            Self::L6 => "L6",
            Self::L7 => "L7",
            Self::L8 => "L8"
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_ascending() {
        assert!(Severity::L0 < Severity::L1);
        assert!(Severity::L7 < Severity::L8);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Severity::parse("l3"), Some(Severity::L3));
        assert_eq!(Severity::parse("L8"), Some(Severity::L8));
        assert_eq!(Severity::parse("bogus"), None);
    }

    #[test]
    fn displays_wire_form() {
        assert_eq!(Severity::L4.to_string(), "L4");
    }
}
