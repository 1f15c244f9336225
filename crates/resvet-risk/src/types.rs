//! The risk assessment record and its pieces.

use serde::{Deserialize, Serialize};

use resvet_core::{FlagCounts, RiskFlag};

/// One scored category with the points awarded and the ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub category: String,
    /// Rounded to one decimal; partial credit is possible.
    pub points: f64,
    pub max: u32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

/// Overall risk banding with its fixed advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLevelInfo {
    pub level: RiskLevel,
    pub message: String,
}

/// The complete output of the risk engine for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Trust score in `[0, 100]`, higher is more trustworthy.
    pub trust_score: u32,
    pub trust_score_details: Vec<ScoreDetail>,
    /// Sorted by severity, most severe first; ties keep collection order.
    pub risk_flags: Vec<RiskFlag>,
    pub risk_level: RiskLevelInfo,
    pub summary: String,
    pub flag_counts: FlagCounts,
}
