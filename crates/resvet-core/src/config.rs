use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing logic is decoupled from the process environment so tests can
/// drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let non_empty = |value: String| -> Option<String> {
        let trimmed = value.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    };

    let log_level = or_default("RESVET_LOG_LEVEL", "info");
    let vocabulary_path = PathBuf::from(or_default(
        "RESVET_VOCABULARY_PATH",
        "./config/vocabulary.yaml",
    ));

    // Blank tokens are treated as absent so the aggregator source is skipped.
    let opencorporates_api_token = lookup("RESVET_OPENCORPORATES_TOKEN").ok().and_then(non_empty);
    let github_token = lookup("RESVET_GITHUB_TOKEN").ok().and_then(non_empty);

    let registry_timeout_secs = parse_u64("RESVET_REGISTRY_TIMEOUT_SECS", "10")?;
    let profile_timeout_secs = parse_u64("RESVET_PROFILE_TIMEOUT_SECS", "10")?;
    let repo_list_timeout_secs = parse_u64("RESVET_REPO_LIST_TIMEOUT_SECS", "15")?;
    let language_timeout_secs = parse_u64("RESVET_LANGUAGE_TIMEOUT_SECS", "5")?;

    let api_user_agent = or_default("RESVET_API_USER_AGENT", "resvet/0.1 (resume-verification)");
    let browser_user_agent = or_default(
        "RESVET_BROWSER_USER_AGENT",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    );

    Ok(AppConfig {
        log_level,
        vocabulary_path,
        opencorporates_api_token,
        github_token,
        registry_timeout_secs,
        profile_timeout_secs,
        repo_list_timeout_secs,
        language_timeout_secs,
        api_user_agent,
        browser_user_agent,
    })
}
