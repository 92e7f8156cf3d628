use serde::{Deserialize, Serialize};

/// Trust label attached to an inferred vendor→product relationship.
///
/// Ordered `Low < Medium < High`; re-validation keeps the maximum level
/// ever observed for a pair, so a later weak signal never downgrades an
/// edge. Only `Medium` and `High` are persisted as OFFERS edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Confidence> {
        match s {
            "low" => Some(Confidence::Low),
            "medium" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }

    /// Levels included by a minimum-confidence read: `low` widens to all
    /// three tiers, `medium` to medium+high, `high` to high only.
    pub fn levels_at_or_above(self) -> &'static [&'static str] {
        match self {
            Confidence::Low => &["low", "medium", "high"],
            Confidence::Medium => &["medium", "high"],
            Confidence::High => &["high"],
        }
    }

    /// Whether this level is persisted as an OFFERS edge.
    pub fn is_persistable(self) -> bool {
        self >= Confidence::Medium
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_low_medium_high() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
    }

    #[test]
    fn parse_round_trips() {
        for c in [Confidence::Low, Confidence::Medium, Confidence::High] {
            assert_eq!(Confidence::parse(c.as_str()), Some(c));
        }
        assert_eq!(Confidence::parse("unknown"), None);
    }

    #[test]
    fn tier_widening() {
        assert_eq!(Confidence::Low.levels_at_or_above().len(), 3);
        assert_eq!(Confidence::Medium.levels_at_or_above(), &["medium", "high"]);
        assert_eq!(Confidence::High.levels_at_or_above(), &["high"]);
    }

    #[test]
    fn only_medium_and_high_persist() {
        assert!(!Confidence::Low.is_persistable());
        assert!(Confidence::Medium.is_persistable());
        assert!(Confidence::High.is_persistable());
    }
}
