use serde::{Deserialize, Serialize};

use crate::error::TriageError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = TriageError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(TriageError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Severity — the shared four-step ordinal scale
// ---------------------------------------------------------------------------

/// The one severity scale used everywhere: escalation urgency, overall risk
/// level, and alert severity. Aggregation across severities always takes the
/// maximum, never an average, so a single critical signal is never diluted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Ordinal position on the 1..=4 scale (`unknown` = 0 lives on
    /// [`RiskFactorRating`], not here).
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Inverse of [`Severity::ordinal`]. Ordinal 0 (no rated data at all)
    /// maps to `Low`: absence of data is not absence of risk, but the system
    /// must not over-alert on missing assessments either.
    pub fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            0 | 1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            _ => Self::Critical,
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(TriageError::InvalidEnum {
                field: "Severity".into(),
                value: s.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// MessageCategory
// ---------------------------------------------------------------------------

/// Per-message classification outcome. Ordered by clinical urgency so that
/// "negative or worse" reads as a comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    Positive,
    Neutral,
    Negative,
    Urgent,
}

impl MessageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::Urgent => "urgent",
        }
    }

    /// Negative-or-worse is the signal the tracker's sliding window counts.
    pub fn is_negative_or_worse(&self) -> bool {
        matches!(self, Self::Negative | Self::Urgent)
    }
}

impl std::str::FromStr for MessageCategory {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            "urgent" => Ok(Self::Urgent),
            _ => Err(TriageError::InvalidEnum {
                field: "MessageCategory".into(),
                value: s.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Remaining model enums
// ---------------------------------------------------------------------------

str_enum!(RiskCategory {
    Suicide => "suicide",
    SelfHarm => "self_harm",
    Substance => "substance",
    Violence => "violence",
});

impl RiskCategory {
    /// The four clinical dimensions every profile is rated on.
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Suicide,
        RiskCategory::SelfHarm,
        RiskCategory::Substance,
        RiskCategory::Violence,
    ];
}

str_enum!(ProfessionalType {
    OnCallCrisis => "on_call_crisis",
    AssignedClinician => "assigned_clinician",
});

// ---------------------------------------------------------------------------
// RiskFactorRating
// ---------------------------------------------------------------------------

/// One clinician-assessed rating for a single risk category.
/// `Unknown` (ordinal 0) exists only so unrated categories never raise the
/// max during aggregation; it is not a [`Severity`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorRating {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskFactorRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

impl std::str::FromStr for RiskFactorRating {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(TriageError::InvalidEnum {
                field: "RiskFactorRating".into(),
                value: s.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn severity_round_trip() {
        for (variant, s) in [
            (Severity::Low, "low"),
            (Severity::Medium, "medium"),
            (Severity::High, "high"),
            (Severity::Critical, "critical"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Severity::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_ordinal_round_trip() {
        for severity in [
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ] {
            assert_eq!(Severity::from_ordinal(severity.ordinal()), severity);
        }
        // Ordinal 0 (all categories unrated) maps to Low, never Critical.
        assert_eq!(Severity::from_ordinal(0), Severity::Low);
    }

    #[test]
    fn category_negative_or_worse() {
        assert!(MessageCategory::Negative.is_negative_or_worse());
        assert!(MessageCategory::Urgent.is_negative_or_worse());
        assert!(!MessageCategory::Neutral.is_negative_or_worse());
        assert!(!MessageCategory::Positive.is_negative_or_worse());
    }

    #[test]
    fn risk_category_round_trip() {
        for (variant, s) in [
            (RiskCategory::Suicide, "suicide"),
            (RiskCategory::SelfHarm, "self_harm"),
            (RiskCategory::Substance, "substance"),
            (RiskCategory::Violence, "violence"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(RiskCategory::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn rating_ordinals() {
        assert_eq!(RiskFactorRating::Unknown.ordinal(), 0);
        assert_eq!(RiskFactorRating::Low.ordinal(), 1);
        assert_eq!(RiskFactorRating::Critical.ordinal(), 4);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(Severity::from_str("extreme").is_err());
        assert!(MessageCategory::from_str("").is_err());
        assert!(RiskCategory::from_str("gambling").is_err());
        assert!(ProfessionalType::from_str("nurse").is_err());
    }
}
