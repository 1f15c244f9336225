//! Trust scoring and risk flag aggregation.
//!
//! Every function here is pure: the engine combines the extraction and
//! verification records it is handed and touches no clock or network.

use resvet_core::{FlagCounts, RiskFlag, Severity, Vocabulary};
use resvet_verify::{CandidateVerification, CompanyStatus, CompanyVerification};

use crate::types::{RiskAssessment, RiskLevel, RiskLevelInfo, ScoreDetail};

const W_COMPANY_REGISTERED: f64 = 20.0;
const W_NO_UNREGISTERED: f64 = 20.0;
const W_GITHUB_VERIFIED: f64 = 15.0;
const W_GITHUB_AGE: f64 = 10.0;
const W_GITHUB_ACTIVITY: f64 = 10.0;
const W_SKILL_MATCH: f64 = 10.0;
const W_LINKEDIN_VERIFIED: f64 = 10.0;
const W_LINKEDIN_NAME: f64 = 5.0;

/// Complete risk analysis: trust score, severity-sorted flags, risk level,
/// summary, and per-severity counts.
#[must_use]
pub fn analyze_risk(
    name: &str,
    job_titles: &[String],
    companies: &[CompanyVerification],
    candidate: &CandidateVerification,
    vocabulary: &Vocabulary,
) -> RiskAssessment {
    let (trust_score, trust_score_details) = calculate_trust_score(companies, candidate);
    let risk_flags = detect_risk_flags(name, job_titles, companies, candidate, vocabulary);
    let risk_level = risk_level(trust_score, &risk_flags);
    let summary = generate_summary(companies, candidate);
    let flag_counts = FlagCounts::tally(&risk_flags);

    RiskAssessment {
        trust_score,
        trust_score_details,
        risk_flags,
        risk_level,
        summary,
        flag_counts,
    }
}

/// Weighted trust score in `[0, 100]` with a per-category breakdown.
///
/// Company categories are only scored when at least one company was
/// evaluated; their 40 points are simply absent otherwise.
#[must_use]
#[allow(clippy::too_many_lines, clippy::cast_precision_loss)]
pub fn calculate_trust_score(
    companies: &[CompanyVerification],
    candidate: &CandidateVerification,
) -> (u32, Vec<ScoreDetail>) {
    let mut score = 0.0;
    let mut details = Vec::new();

    let total_companies = companies.len();
    let registered: f64 = companies
        .iter()
        .map(|cv| match cv.status {
            CompanyStatus::Registered => 1.0,
            CompanyStatus::LikelyRegistered => 0.5,
            CompanyStatus::NotFound => 0.0,
        })
        .sum();
    let unregistered = companies
        .iter()
        .filter(|cv| cv.status == CompanyStatus::NotFound)
        .count();

    if total_companies > 0 {
        let company_score = registered / total_companies as f64 * W_COMPANY_REGISTERED;
        score += company_score;
        details.push(detail(
            "Company Registration",
            company_score,
            W_COMPANY_REGISTERED,
            format!("{registered}/{total_companies} companies found in registries"),
        ));

        if unregistered == 0 {
            score += W_NO_UNREGISTERED;
            details.push(detail(
                "No Unregistered Companies",
                W_NO_UNREGISTERED,
                W_NO_UNREGISTERED,
                "All listed companies verified in registries".to_string(),
            ));
        } else {
            details.push(detail(
                "No Unregistered Companies",
                0.0,
                W_NO_UNREGISTERED,
                format!("{unregistered} company(ies) not found in registries"),
            ));
        }
    }

    let gh = &candidate.github;
    if gh.valid {
        score += W_GITHUB_VERIFIED;
        details.push(detail(
            "GitHub Profile",
            W_GITHUB_VERIFIED,
            W_GITHUB_VERIFIED,
            format!(
                "GitHub profile verified (@{})",
                gh.username.as_deref().unwrap_or_default()
            ),
        ));

        let age = gh.account_age_days;
        if age >= 365 {
            score += W_GITHUB_AGE;
            details.push(detail(
                "GitHub Account Age",
                W_GITHUB_AGE,
                W_GITHUB_AGE,
                format!("Established account ({} months)", months_text(age)),
            ));
        } else if age >= 180 {
            let partial = W_GITHUB_AGE * 0.5;
            score += partial;
            details.push(detail(
                "GitHub Account Age",
                partial,
                W_GITHUB_AGE,
                format!("Fairly new account ({} months)", months_text(age)),
            ));
        } else {
            details.push(detail(
                "GitHub Account Age",
                0.0,
                W_GITHUB_AGE,
                format!("Very new account ({age} days old)"),
            ));
        }

        let original = gh.original_repos;
        let recent = gh.recent_activity_count;
        if original >= 10 && recent >= 3 {
            score += W_GITHUB_ACTIVITY;
            details.push(detail(
                "GitHub Activity",
                W_GITHUB_ACTIVITY,
                W_GITHUB_ACTIVITY,
                format!("Active profile ({original} original repos, {recent} recent)"),
            ));
        } else if original >= 5 || recent >= 1 {
            let partial = W_GITHUB_ACTIVITY * 0.5;
            score += partial;
            details.push(detail(
                "GitHub Activity",
                partial,
                W_GITHUB_ACTIVITY,
                format!("Moderate activity ({original} original repos)"),
            ));
        } else {
            details.push(detail(
                "GitHub Activity",
                0.0,
                W_GITHUB_ACTIVITY,
                format!("Low activity ({original} original repos)"),
            ));
        }

        let matched = gh.skill_matches.len();
        let mismatched = gh.skill_mismatches.len();
        let total_skills = matched + mismatched;
        if total_skills > 0 {
            let skill_score = matched as f64 / total_skills as f64 * W_SKILL_MATCH;
            score += skill_score;
            details.push(detail(
                "Resume-GitHub Skill Match",
                skill_score,
                W_SKILL_MATCH,
                format!("{matched}/{total_skills} claimed skills verified in GitHub"),
            ));
        } else {
            let partial = W_SKILL_MATCH * 0.5;
            score += partial;
            details.push(detail(
                "Resume-GitHub Skill Match",
                partial,
                W_SKILL_MATCH,
                "No specific skills to verify".to_string(),
            ));
        }
    } else {
        details.push(detail(
            "GitHub Profile",
            0.0,
            W_GITHUB_VERIFIED,
            format!(
                "GitHub not verified: {}",
                gh.error.as_deref().unwrap_or("Not provided")
            ),
        ));
    }

    let li = &candidate.linkedin;
    if li.valid {
        score += W_LINKEDIN_VERIFIED;
        details.push(detail(
            "LinkedIn Profile",
            W_LINKEDIN_VERIFIED,
            W_LINKEDIN_VERIFIED,
            "LinkedIn profile accessible".to_string(),
        ));

        if li.slug_match {
            score += W_LINKEDIN_NAME;
            details.push(detail(
                "LinkedIn Name Match",
                W_LINKEDIN_NAME,
                W_LINKEDIN_NAME,
                format!("Name matches URL (score: {})", li.name_match_score),
            ));
        } else {
            details.push(detail(
                "LinkedIn Name Match",
                0.0,
                W_LINKEDIN_NAME,
                "Name doesn't match LinkedIn URL".to_string(),
            ));
        }
    } else {
        details.push(detail(
            "LinkedIn Profile",
            0.0,
            W_LINKEDIN_VERIFIED,
            format!(
                "LinkedIn not verified: {}",
                li.error.as_deref().unwrap_or("Not provided")
            ),
        ));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let trust_score = score.clamp(0.0, 100.0).round() as u32;
    (trust_score, details)
}

/// Collect every red flag across the records, most severe first. The stable
/// sort keeps collection order within a severity.
#[must_use]
pub fn detect_risk_flags(
    name: &str,
    job_titles: &[String],
    companies: &[CompanyVerification],
    candidate: &CandidateVerification,
    vocabulary: &Vocabulary,
) -> Vec<RiskFlag> {
    let mut flags = Vec::new();

    for cv in companies {
        if cv.status == CompanyStatus::NotFound {
            flags.push(RiskFlag::new(
                "UNREGISTERED_COMPANY",
                Severity::High,
                "company",
                format!("'{}' not found in any company registry", cv.company),
            ));
        }
        // The verifier's own flags ride along too, so an unregistered
        // company is counted twice. Intentional: a ghost employer is the
        // strongest single signal this system has.
        flags.extend(cv.red_flags.iter().cloned());
    }

    let gh = &candidate.github;
    if gh.valid {
        flags.extend(gh.hyper_inflation_flags.iter().cloned());

        for mismatch in &gh.skill_mismatches {
            flags.push(RiskFlag::new(
                "SKILL_MISMATCH",
                Severity::Medium,
                "skills",
                mismatch.message.clone(),
            ));
        }

        let has_senior_claim = job_titles.iter().any(|title| {
            let title_lower = title.to_lowercase();
            vocabulary
                .senior_title_markers
                .iter()
                .any(|marker| title_lower.contains(marker.as_str()))
        });
        if has_senior_claim && (gh.account_age_days < 180 || gh.original_repos < 5) {
            flags.push(RiskFlag::new(
                "HYPER_INFLATION",
                Severity::High,
                "experience",
                format!(
                    "Claims senior role but GitHub is {} days old with {} original repos",
                    gh.account_age_days, gh.original_repos
                ),
            ));
        }
    } else if gh.status == resvet_verify::GithubStatus::NotFound {
        flags.push(RiskFlag::new(
            "INVALID_GITHUB",
            Severity::Medium,
            "github",
            "Provided GitHub profile does not exist".to_string(),
        ));
    }

    let li = &candidate.linkedin;
    if li.status == resvet_verify::LinkedinStatus::NotFound {
        flags.push(RiskFlag::new(
            "INVALID_LINKEDIN",
            Severity::Medium,
            "linkedin",
            "Provided LinkedIn profile does not exist (404)".to_string(),
        ));
    } else if li.valid && !li.slug_match {
        flags.push(RiskFlag::new(
            "NAME_MISMATCH",
            Severity::Low,
            "linkedin",
            format!("Name '{name}' doesn't match LinkedIn URL slug"),
        ));
    }

    flags.sort_by_key(|flag| flag.severity);
    flags
}

/// Band the score and flags into an overall risk level.
#[must_use]
pub fn risk_level(trust_score: u32, flags: &[RiskFlag]) -> RiskLevelInfo {
    let critical = flags
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .count();
    let high = flags.iter().filter(|f| f.severity == Severity::High).count();

    if critical > 0 || trust_score < 30 {
        RiskLevelInfo {
            level: RiskLevel::Critical,
            message: "High risk - Multiple serious verification failures".to_string(),
        }
    } else if high >= 2 || trust_score < 50 {
        RiskLevelInfo {
            level: RiskLevel::High,
            message: "Elevated risk - Proceed with caution".to_string(),
        }
    } else if flags.len() > 3 || trust_score < 70 {
        RiskLevelInfo {
            level: RiskLevel::Medium,
            message: "Moderate risk - Some verification issues".to_string(),
        }
    } else {
        RiskLevelInfo {
            level: RiskLevel::Low,
            message: "Low risk - Most claims verified".to_string(),
        }
    }
}

/// Short human-readable digest of the whole analysis.
#[must_use]
pub fn generate_summary(
    companies: &[CompanyVerification],
    candidate: &CandidateVerification,
) -> String {
    let mut parts = Vec::new();
    let gh = &candidate.github;

    if gh.valid {
        parts.push(format!(
            "GitHub profile verified with {} repos ({} original) and {} months age.",
            gh.public_repos,
            gh.original_repos,
            months_text(gh.account_age_days),
        ));
        if !gh.skill_matches.is_empty() {
            parts.push(format!(
                "{} claimed skills verified in GitHub repos.",
                gh.skill_matches.len()
            ));
        }
        if !gh.skill_mismatches.is_empty() {
            parts.push(format!(
                "{} claimed skills NOT found in GitHub.",
                gh.skill_mismatches.len()
            ));
        }
    } else {
        parts.push("GitHub profile could not be verified.".to_string());
    }

    if candidate.linkedin.valid {
        let match_text = if candidate.linkedin.slug_match {
            "matches"
        } else {
            "doesn't match"
        };
        parts.push(format!("LinkedIn accessible, name {match_text} URL."));
    }

    let registered = companies
        .iter()
        .filter(|cv| cv.status == CompanyStatus::Registered)
        .count();
    let not_found = companies
        .iter()
        .filter(|cv| cv.status == CompanyStatus::NotFound)
        .count();
    if !companies.is_empty() {
        parts.push(format!(
            "{registered}/{} companies verified in registries.",
            companies.len()
        ));
        if not_found > 0 {
            parts.push(format!(
                "{not_found} company(ies) not found in any registry."
            ));
        }
    }

    parts.join(" ")
}

fn detail(category: &str, points: f64, max: f64, message: String) -> ScoreDetail {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    ScoreDetail {
        category: category.to_string(),
        points: (points * 10.0).round() / 10.0,
        max: max as u32,
        message,
    }
}

/// Account age in months to one decimal, matching the report convention.
fn months_text(days: i64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let months = (days as f64 / 30.0 * 10.0).round() / 10.0;
    format!("{months}")
}
