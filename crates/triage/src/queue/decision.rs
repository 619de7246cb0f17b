//! The binary keep/skip decision.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a reviewed record is filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// File into the kept list (exported).
    Keep,
    /// File into the skipped list.
    Skip,
}

impl Decision {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Keep => "Kept",
            Decision::Skip => "Skipped",
        }
    }

    /// The decision whose list a row must leave when this one is made.
    pub fn opposite(&self) -> Decision {
        match self {
            Decision::Keep => Decision::Skip,
            Decision::Skip => Decision::Keep,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Keep => write!(f, "keep"),
            Decision::Skip => write!(f, "skip"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Decision::Keep.opposite(), Decision::Skip);
        assert_eq!(Decision::Skip.opposite(), Decision::Keep);
    }

    #[test]
    fn test_label() {
        assert_eq!(Decision::Keep.label(), "Kept");
        assert_eq!(Decision::Skip.label(), "Skipped");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Decision::Keep).unwrap(), "\"keep\"");
        let d: Decision = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(d, Decision::Skip);
    }
}
