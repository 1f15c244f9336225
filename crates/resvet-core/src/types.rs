use serde::{Deserialize, Serialize};

/// Severity of a risk flag.
///
/// The derived `Ord` follows declaration order, so an ascending sort puts
/// `Critical` first and `Low` last — the display order the risk engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::High => write!(f, "HIGH"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::Low => write!(f, "LOW"),
        }
    }
}

/// A discrete, severity-tagged finding about one unverified or suspicious claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    #[serde(rename = "type")]
    pub flag_type: String,
    pub severity: Severity,
    pub category: String,
    pub message: String,
}

impl RiskFlag {
    #[must_use]
    pub fn new(flag_type: &str, severity: Severity, category: &str, message: String) -> Self {
        Self {
            flag_type: flag_type.to_string(),
            severity,
            category: category.to_string(),
            message,
        }
    }
}

/// Per-severity tally of risk flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl FlagCounts {
    #[must_use]
    pub fn tally(flags: &[RiskFlag]) -> Self {
        let mut counts = Self::default();
        for flag in flags {
            match flag.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }
}

/// Authority tier of a registry source that reported a registration hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegistryConfidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for RegistryConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryConfidence::High => write!(f, "HIGH"),
            RegistryConfidence::Medium => write!(f, "MEDIUM"),
            RegistryConfidence::Low => write!(f, "LOW"),
        }
    }
}
