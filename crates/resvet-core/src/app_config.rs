use std::path::PathBuf;

/// Runtime configuration for the verification pipeline.
///
/// Built from environment variables by [`crate::config::load_app_config`].
/// Tokens are optional: the aggregator registry source is skipped without
/// one, and GitHub falls back to unauthenticated rate limits.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub vocabulary_path: PathBuf,
    pub opencorporates_api_token: Option<String>,
    pub github_token: Option<String>,
    /// Timeout for registry search pages (Companies House, EDGAR, mirror, web search).
    pub registry_timeout_secs: u64,
    /// Timeout for the GitHub profile call and the LinkedIn/portfolio probes.
    pub profile_timeout_secs: u64,
    /// Timeout for the repository list call (largest payload).
    pub repo_list_timeout_secs: u64,
    /// Timeout for per-repo language breakdown calls. Shortest: failures
    /// there are non-fatal and simply skipped.
    pub language_timeout_secs: u64,
    /// User agent for API endpoints.
    pub api_user_agent: String,
    /// Browser-shaped user agent for HTML search pages and profile probes,
    /// which reject obvious bot agents.
    pub browser_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("vocabulary_path", &self.vocabulary_path)
            .field(
                "opencorporates_api_token",
                &self.opencorporates_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[redacted]"),
            )
            .field("registry_timeout_secs", &self.registry_timeout_secs)
            .field("profile_timeout_secs", &self.profile_timeout_secs)
            .field("repo_list_timeout_secs", &self.repo_list_timeout_secs)
            .field("language_timeout_secs", &self.language_timeout_secs)
            .field("api_user_agent", &self.api_user_agent)
            .field("browser_user_agent", &self.browser_user_agent)
            .finish()
    }
}
