use serde::{Deserialize, Serialize};

/// Unique identifier for a diagnosis code in the reference table
/// (e.g., "E11.9").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeId(pub String);

impl CodeId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for CodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Confidence level for a match, derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
    Exact,
}

impl Confidence {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.999 {
            Self::Exact
        } else if score >= 0.85 {
            Self::High
        } else if score >= 0.65 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Acuity/status qualifier detected in a candidate phrase.
///
/// When several qualifiers are present the highest-priority one wins;
/// priority runs top to bottom in declaration order, `Unspecified`
/// last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    AcuteOnChronic,
    Acute,
    Chronic,
    Decompensated,
    Uncontrolled,
    Controlled,
    Resolving,
    Stable,
    Unspecified,
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AcuteOnChronic => "acute on chronic",
            Self::Acute => "acute",
            Self::Chronic => "chronic",
            Self::Decompensated => "decompensated",
            Self::Uncontrolled => "uncontrolled",
            Self::Controlled => "controlled",
            Self::Resolving => "resolving",
            Self::Stable => "stable",
            Self::Unspecified => "unspecified",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_from_score() {
        assert_eq!(Confidence::from_score(1.0), Confidence::Exact);
        assert_eq!(Confidence::from_score(0.9), Confidence::High);
        assert_eq!(Confidence::from_score(0.7), Confidence::Medium);
        assert_eq!(Confidence::from_score(0.3), Confidence::Low);
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Exact > Confidence::High);
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
    }

    #[test]
    fn test_modifier_display() {
        assert_eq!(Modifier::AcuteOnChronic.to_string(), "acute on chronic");
        assert_eq!(Modifier::Unspecified.to_string(), "unspecified");
    }
}
