//! Risk and trust scoring over extraction and verification records.
//!
//! Combines employer registration reports and candidate identity reports
//! into a 0-100 trust score, a severity-sorted list of risk flags, an
//! overall risk level, and a one-paragraph summary. Everything in this
//! crate is a pure function; all I/O happens upstream.

pub mod engine;
pub mod types;

pub use engine::{
    analyze_risk, calculate_trust_score, detect_risk_flags, generate_summary, risk_level,
};
pub use types::{RiskAssessment, RiskLevel, RiskLevelInfo, ScoreDetail};
