//! Report types produced by the registry and candidate verifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use resvet_core::{RegistryConfidence, RiskFlag};

/// Aggregate registration status for one employer name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyStatus {
    Registered,
    LikelyRegistered,
    NotFound,
}

/// One registry that answered positively for a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryHit {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub confidence: RegistryConfidence,
    /// Registry-specific identifier scraped from the response body
    /// (company number, CIK, CIN) when one was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Full registration report for one employer name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyVerification {
    pub company: String,
    pub is_registered: bool,
    /// Best confidence across all positive hits; `None` when nothing hit.
    pub confidence: Option<RegistryConfidence>,
    pub status: CompanyStatus,
    pub status_message: String,
    pub registrations_found: Vec<RegistryHit>,
    pub sources_checked: Vec<String>,
    /// Network failures per source, preserved for the report. A failed
    /// source counts as checked-and-negative.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub source_errors: Vec<String>,
    pub red_flags: Vec<RiskFlag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GithubStatus {
    Missing,
    InvalidUrl,
    NotFound,
    RateLimited,
    ApiError,
    Verified,
    Error,
}

/// One analyzed repository, kept for the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoDetail {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub is_fork: bool,
    pub size: u64,
    /// Byte counts per language from the per-repo languages endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages_breakdown: Option<BTreeMap<String, u64>>,
}

/// A claimed skill with supporting repository evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub evidence: String,
}

/// A claimed skill the repositories contradict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMismatch {
    pub skill: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubReport {
    pub valid: bool,
    pub status: GithubStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
    pub account_age_days: i64,
    pub public_repos: u64,
    pub repos_analyzed: usize,
    pub original_repos: usize,
    pub forked_repos: usize,
    pub recent_activity_count: usize,
    /// Primary languages across analyzed repos, most common first.
    pub top_languages: Vec<String>,
    pub repos_details: Vec<RepoDetail>,
    pub skill_matches: Vec<SkillMatch>,
    pub skill_mismatches: Vec<SkillMismatch>,
    pub hyper_inflation_flags: Vec<RiskFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GithubReport {
    /// A report for a profile that could not be verified; every metric
    /// zeroed, the failure mode recorded.
    pub(crate) fn failed(status: GithubStatus, username: Option<&str>, error: String) -> Self {
        Self {
            valid: false,
            status,
            username: username.map(str::to_owned),
            profile_name: None,
            account_age_days: 0,
            public_repos: 0,
            repos_analyzed: 0,
            original_repos: 0,
            forked_repos: 0,
            recent_activity_count: 0,
            top_languages: Vec::new(),
            repos_details: Vec::new(),
            skill_matches: Vec::new(),
            skill_mismatches: Vec::new(),
            hyper_inflation_flags: Vec::new(),
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkedinStatus {
    Missing,
    InvalidFormat,
    NotFound,
    Verified,
    Blocked,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedinReport {
    pub valid: bool,
    pub status: LinkedinStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub slug_match: bool,
    pub name_match_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LinkedinReport {
    pub(crate) fn failed(status: LinkedinStatus, url: Option<&str>, error: String) -> Self {
        Self {
            valid: false,
            status,
            url: url.map(str::to_owned),
            status_code: None,
            slug_match: false,
            name_match_score: 0.0,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub valid: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The full identity report for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateVerification {
    pub github: GithubReport,
    pub linkedin: LinkedinReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<PortfolioReport>,
}
