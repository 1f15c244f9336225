//! Candidate identity checks: GitHub repo-level analysis, LinkedIn slug
//! matching, and a portfolio reachability probe.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use resvet_core::{AppConfig, RiskFlag, Severity, Vocabulary};

use crate::error::VerifyError;
use crate::skills::match_skills;
use crate::types::{
    CandidateVerification, GithubReport, GithubStatus, LinkedinReport, LinkedinStatus,
    PortfolioReport, RepoDetail,
};

const DEFAULT_GITHUB_API: &str = "https://api.github.com";
const REPOS_ANALYZED: usize = 30;
const REPO_DETAILS_KEPT: usize = 10;
const RECENT_DAYS: i64 = 180;

/// LinkedIn's anti-scraping responder; the profile exists but refuses bots.
const LINKEDIN_ANTI_SCRAPING: u16 = 999;

pub struct CandidateVerifier {
    api_client: Client,
    browser_client: Client,
    github_base: Url,
    github_token: Option<String>,
    profile_timeout: Duration,
    repo_list_timeout: Duration,
    language_timeout: Duration,
    slug_hash_suffix: Regex,
    vocabulary: Vocabulary,
}

impl CandidateVerifier {
    /// Creates a verifier pointed at the production GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Http`] if a `reqwest::Client` cannot be built.
    pub fn new(config: &AppConfig, vocabulary: Vocabulary) -> Result<Self, VerifyError> {
        Self::with_github_base(config, vocabulary, DEFAULT_GITHUB_API)
    }

    /// Creates a verifier with a custom GitHub API base URL (for testing
    /// with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Http`] if a `reqwest::Client` cannot be built,
    /// or [`VerifyError::InvalidBaseUrl`] for an unparsable base.
    pub fn with_github_base(
        config: &AppConfig,
        vocabulary: Vocabulary,
        github_base: &str,
    ) -> Result<Self, VerifyError> {
        let api_client = Client::builder()
            .user_agent(&config.api_user_agent)
            .build()?;
        let browser_client = Client::builder()
            .user_agent(&config.browser_user_agent)
            .build()?;
        let normalised = format!("{}/", github_base.trim_end_matches('/'));
        let github_base = Url::parse(&normalised)
            .map_err(|_| VerifyError::InvalidBaseUrl(github_base.to_string()))?;

        Ok(Self {
            api_client,
            browser_client,
            github_base,
            github_token: config.github_token.clone(),
            profile_timeout: Duration::from_secs(config.profile_timeout_secs),
            repo_list_timeout: Duration::from_secs(config.repo_list_timeout_secs),
            language_timeout: Duration::from_secs(config.language_timeout_secs),
            slug_hash_suffix: Regex::new(r"-[a-f0-9]{5,}$").expect("valid regex"),
            vocabulary,
        })
    }

    /// Runs all three identity checks. Infallible: failures are recorded in
    /// the per-platform reports.
    pub async fn verify_candidate(
        &self,
        name: &str,
        claimed_skills: &[String],
        github_url: Option<&str>,
        linkedin_url: Option<&str>,
        portfolio_url: Option<&str>,
        now: DateTime<Utc>,
    ) -> CandidateVerification {
        CandidateVerification {
            github: self.verify_github(github_url, claimed_skills, now).await,
            linkedin: self.verify_linkedin(linkedin_url, name).await,
            portfolio: self.verify_portfolio(portfolio_url).await,
        }
    }

    /// Profile fetch, repo-level analysis, and skill cross-matching.
    pub async fn verify_github(
        &self,
        github_url: Option<&str>,
        claimed_skills: &[String],
        now: DateTime<Utc>,
    ) -> GithubReport {
        let Some(github_url) = github_url else {
            return GithubReport::failed(
                GithubStatus::Missing,
                None,
                "No GitHub URL provided".into(),
            );
        };
        let Some(username) = username_from_url(github_url) else {
            return GithubReport::failed(
                GithubStatus::InvalidUrl,
                None,
                "Invalid GitHub URL format".into(),
            );
        };

        match self.fetch_github(&username, claimed_skills, now).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(username, error = %e, "github verification failed");
                GithubReport::failed(GithubStatus::Error, Some(&username), error_text(&e))
            }
        }
    }

    async fn fetch_github(
        &self,
        username: &str,
        claimed_skills: &[String],
        now: DateTime<Utc>,
    ) -> Result<GithubReport, VerifyError> {
        let url = self.github_url(&format!("users/{username}"));
        let response = self
            .github_request(url)
            .timeout(self.profile_timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Ok(GithubReport::failed(
                    GithubStatus::NotFound,
                    Some(username),
                    format!("GitHub user '{username}' not found"),
                ));
            }
            StatusCode::FORBIDDEN => {
                return Ok(GithubReport::failed(
                    GithubStatus::RateLimited,
                    Some(username),
                    "GitHub API rate limit exceeded".into(),
                ));
            }
            StatusCode::OK => {}
            other => {
                return Ok(GithubReport::failed(
                    GithubStatus::ApiError,
                    Some(username),
                    format!("GitHub API error: {other}"),
                ));
            }
        }

        let user: GithubUser = response.json().await?;
        let account_age_days = user
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .map_or(0, |created| (now - created).num_days());

        let analysis = self.analyze_repos(username, now).await;

        let (skill_matches, skill_mismatches) = match_skills(
            claimed_skills,
            &analysis.all_languages,
            &analysis.primary_language_counts,
            &self.vocabulary,
        );

        let mut flags = Vec::new();
        if account_age_days < 30 {
            flags.push(RiskFlag::new(
                "VERY_NEW_ACCOUNT",
                Severity::High,
                "github",
                format!("Account created only {account_age_days} days ago"),
            ));
        } else if account_age_days < 180 {
            #[allow(clippy::cast_precision_loss)]
            let months = (account_age_days as f64 / 30.0 * 10.0).round() / 10.0;
            flags.push(RiskFlag::new(
                "NEW_ACCOUNT",
                Severity::Medium,
                "github",
                format!("Account is only {months} months old"),
            ));
        }

        let public_repos = user.public_repos.unwrap_or(0);
        if public_repos == 0 {
            flags.push(RiskFlag::new(
                "ZERO_REPOS",
                Severity::High,
                "github",
                "Account has zero public repositories".into(),
            ));
        } else if public_repos < 3 {
            flags.push(RiskFlag::new(
                "LOW_REPOS",
                Severity::Medium,
                "github",
                format!("Only {public_repos} public repositories"),
            ));
        }

        let analyzed = analysis.details_all_count;
        let original_repos = analyzed - analysis.forked_repos;
        if analyzed > 5 && analysis.forked_repos > original_repos {
            flags.push(RiskFlag::new(
                "MOSTLY_FORKS",
                Severity::Medium,
                "github",
                format!(
                    "{}/{analyzed} repos are forks, not original work",
                    analysis.forked_repos
                ),
            ));
        }

        if analysis.recent_activity_count == 0 {
            flags.push(RiskFlag::new(
                "NO_RECENT_ACTIVITY",
                Severity::Medium,
                "github",
                "No repository activity in the last 6 months".into(),
            ));
        }

        Ok(GithubReport {
            valid: true,
            status: GithubStatus::Verified,
            username: Some(username.to_string()),
            profile_name: user.name,
            account_age_days,
            public_repos,
            repos_analyzed: analyzed,
            original_repos,
            forked_repos: analysis.forked_repos,
            recent_activity_count: analysis.recent_activity_count,
            top_languages: analysis.top_languages,
            repos_details: analysis.details,
            skill_matches,
            skill_mismatches,
            hyper_inflation_flags: flags,
            error: None,
        })
    }

    /// Fetch the most recently updated repos and analyze the top 30. A
    /// failed list fetch degrades to an empty analysis.
    async fn analyze_repos(&self, username: &str, now: DateTime<Utc>) -> RepoAnalysis {
        let mut url = self.github_url(&format!("users/{username}/repos"));
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", "100");

        let repos: Vec<RepoSummary> = match self
            .github_request(url)
            .timeout(self.repo_list_timeout)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => {
                response.json().await.unwrap_or_default()
            }
            Ok(response) => {
                tracing::warn!(username, status = %response.status(), "repo list fetch refused");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "repo list fetch failed");
                Vec::new()
            }
        };

        let mut analysis = RepoAnalysis::default();

        for repo in repos.into_iter().take(REPOS_ANALYZED) {
            let mut detail = RepoDetail {
                name: repo.name.clone().unwrap_or_default(),
                description: repo.description,
                language: repo.language.clone(),
                stars: repo.stargazers_count.unwrap_or(0),
                forks: repo.forks_count.unwrap_or(0),
                created_at: repo.created_at,
                updated_at: repo.updated_at.clone(),
                is_fork: repo.fork.unwrap_or(false),
                size: repo.size.unwrap_or(0),
                languages_breakdown: None,
            };

            if let Some(lang) = &repo.language {
                *analysis
                    .primary_language_counts
                    .entry(lang.clone())
                    .or_insert(0) += 1;
                analysis.push_language(lang);
            }

            if let Some(languages_url) = &repo.languages_url {
                if let Some(breakdown) = self.fetch_languages(languages_url).await {
                    for lang in breakdown.keys() {
                        analysis.push_language(lang);
                    }
                    detail.languages_breakdown = Some(breakdown);
                }
            }

            if detail.is_fork {
                analysis.forked_repos += 1;
            }
            if let Some(updated) = repo.updated_at.as_deref().and_then(parse_timestamp) {
                if (now - updated).num_days() < RECENT_DAYS {
                    analysis.recent_activity_count += 1;
                }
            }

            analysis.details_all_count += 1;
            if analysis.details.len() < REPO_DETAILS_KEPT {
                analysis.details.push(detail);
            }
        }

        let mut ranked: Vec<(String, usize)> = analysis
            .primary_language_counts
            .iter()
            .map(|(lang, count)| (lang.clone(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        analysis.top_languages = ranked.into_iter().map(|(lang, _)| lang).collect();

        analysis
    }

    /// Per-repo language breakdown; fetched on the shortest timeout and
    /// skipped silently on any failure.
    async fn fetch_languages(&self, languages_url: &str) -> Option<BTreeMap<String, u64>> {
        let url = Url::parse(languages_url).ok()?;
        let response = self
            .github_request(url)
            .timeout(self.language_timeout)
            .send()
            .await
            .ok()?;
        if response.status() != StatusCode::OK {
            return None;
        }
        response.json().await.ok()
    }

    /// Reachability and slug-vs-name matching for a LinkedIn profile URL.
    pub async fn verify_linkedin(
        &self,
        linkedin_url: Option<&str>,
        candidate_name: &str,
    ) -> LinkedinReport {
        let Some(linkedin_url) = linkedin_url else {
            return LinkedinReport::failed(
                LinkedinStatus::Missing,
                None,
                "No LinkedIn URL provided".into(),
            );
        };
        if !linkedin_url.to_lowercase().contains("linkedin.com/in/") {
            return LinkedinReport::failed(
                LinkedinStatus::InvalidFormat,
                Some(linkedin_url),
                "Invalid LinkedIn profile URL format".into(),
            );
        }

        let response = match self
            .browser_client
            .get(linkedin_url)
            .timeout(self.profile_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = linkedin_url, error = %e, "linkedin fetch failed");
                let message = if e.is_timeout() {
                    "Request timeout".to_string()
                } else {
                    e.to_string()
                };
                return LinkedinReport::failed(LinkedinStatus::Error, Some(linkedin_url), message);
            }
        };

        self.linkedin_outcome(response.status().as_u16(), linkedin_url, candidate_name)
    }

    fn linkedin_outcome(
        &self,
        status_code: u16,
        linkedin_url: &str,
        candidate_name: &str,
    ) -> LinkedinReport {
        if status_code == 404 {
            return LinkedinReport {
                valid: false,
                status: LinkedinStatus::NotFound,
                url: Some(linkedin_url.to_string()),
                status_code: Some(status_code),
                slug_match: false,
                name_match_score: 0.0,
                error: Some("LinkedIn profile not found (404)".into()),
            };
        }

        let accessible = status_code == 200 || status_code == LINKEDIN_ANTI_SCRAPING;
        let (slug_match, score) = self.slug_name_match(linkedin_url, candidate_name);

        LinkedinReport {
            valid: accessible,
            status: if accessible {
                LinkedinStatus::Verified
            } else {
                LinkedinStatus::Blocked
            },
            url: Some(linkedin_url.to_string()),
            status_code: Some(status_code),
            slug_match,
            name_match_score: score,
            error: None,
        }
    }

    /// Compare the profile slug against the extracted name: tokens longer
    /// than two characters, substring-matched both ways; matched when at
    /// least half the name tokens hit.
    fn slug_name_match(&self, linkedin_url: &str, candidate_name: &str) -> (bool, f64) {
        let slug = linkedin_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        let slug_clean = self.slug_hash_suffix.replace(&slug, "").to_string();
        let slug_parts: Vec<&str> = slug_clean.split('-').collect();

        let name_lower = candidate_name.to_lowercase();
        let name_parts: Vec<&str> = name_lower.split_whitespace().collect();
        if name_parts.is_empty() {
            return (false, 0.0);
        }

        let matched = name_parts
            .iter()
            .filter(|part| {
                part.len() > 2
                    && slug_parts
                        .iter()
                        .any(|sp| sp.contains(*part) || part.contains(sp))
            })
            .count();

        #[allow(clippy::cast_precision_loss)]
        let score = matched as f64 / name_parts.len() as f64;
        let rounded = (score * 100.0).round() / 100.0;
        (rounded >= 0.5, rounded)
    }

    /// Simple reachability probe; 200 counts as accessible.
    pub async fn verify_portfolio(&self, portfolio_url: Option<&str>) -> Option<PortfolioReport> {
        let portfolio_url = portfolio_url?;
        match self
            .browser_client
            .get(portfolio_url)
            .timeout(self.profile_timeout)
            .send()
            .await
        {
            Ok(response) => Some(PortfolioReport {
                valid: response.status() == StatusCode::OK,
                url: portfolio_url.to_string(),
                status_code: Some(response.status().as_u16()),
                error: None,
            }),
            Err(e) => Some(PortfolioReport {
                valid: false,
                url: portfolio_url.to_string(),
                status_code: None,
                error: Some(e.to_string()),
            }),
        }
    }

    fn github_url(&self, path: &str) -> Url {
        self.github_base
            .join(path)
            .unwrap_or_else(|_| self.github_base.clone())
    }

    fn github_request(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.api_client.get(url);
        match self.github_token.as_deref() {
            Some(token) => request.header("Authorization", format!("token {token}")),
            None => request,
        }
    }
}

#[derive(Debug, Default)]
struct RepoAnalysis {
    primary_language_counts: HashMap<String, usize>,
    all_languages: Vec<String>,
    top_languages: Vec<String>,
    details: Vec<RepoDetail>,
    details_all_count: usize,
    forked_repos: usize,
    recent_activity_count: usize,
}

impl RepoAnalysis {
    fn push_language(&mut self, lang: &str) {
        let lower = lang.to_lowercase();
        if !self.all_languages.contains(&lower) {
            self.all_languages.push(lower);
        }
    }
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    name: Option<String>,
    created_at: Option<String>,
    public_repos: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RepoSummary {
    name: Option<String>,
    description: Option<String>,
    language: Option<String>,
    stargazers_count: Option<u64>,
    forks_count: Option<u64>,
    created_at: Option<String>,
    updated_at: Option<String>,
    #[serde(default)]
    fork: Option<bool>,
    size: Option<u64>,
    languages_url: Option<String>,
}

/// Resolve the username segment of a GitHub profile URL, stripping any
/// trailing slash and query string.
fn username_from_url(github_url: &str) -> Option<String> {
    let last = github_url.trim_end_matches('/').rsplit('/').next()?;
    let username = last.split('?').next()?;
    if username.is_empty() || username.eq_ignore_ascii_case("github.com") {
        return None;
    }
    Some(username.to_string())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn error_text(error: &VerifyError) -> String {
    match error {
        VerifyError::Http(e) if e.is_timeout() => "Request timeout".to_string(),
        other => other.to_string(),
    }
}
