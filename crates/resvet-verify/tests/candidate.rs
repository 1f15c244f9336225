//! Integration tests for `CandidateVerifier`'s GitHub analysis using
//! wiremock HTTP mocks.

use chrono::{TimeZone, Utc};
use resvet_core::{AppConfig, Vocabulary};
use resvet_verify::{CandidateVerifier, GithubStatus};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> AppConfig {
    AppConfig {
        log_level: "info".into(),
        vocabulary_path: "./config/vocabulary.yaml".into(),
        opencorporates_api_token: None,
        github_token: None,
        registry_timeout_secs: 5,
        profile_timeout_secs: 5,
        repo_list_timeout_secs: 5,
        language_timeout_secs: 2,
        api_user_agent: "resvet-test".into(),
        browser_user_agent: "Mozilla/5.0 test".into(),
    }
}

fn test_verifier(base_url: &str) -> CandidateVerifier {
    CandidateVerifier::with_github_base(&test_config(), Vocabulary::bundled().unwrap(), base_url)
        .expect("verifier construction should not fail")
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn skills(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[tokio::test]
async fn established_profile_verifies_with_skill_evidence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "login": "octocat",
            "name": "Octo Cat",
            "created_at": "2019-01-01T00:00:00Z",
            "public_repos": 12
        })))
        .mount(&server)
        .await;

    let languages_url = format!("{}/repos/octocat/widgets/languages", server.uri());
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("sort", "updated"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "name": "widgets",
                "description": "widget factory",
                "language": "Python",
                "stargazers_count": 42,
                "forks_count": 3,
                "created_at": "2020-02-01T00:00:00Z",
                "updated_at": "2024-05-20T00:00:00Z",
                "fork": false,
                "size": 1200,
                "languages_url": languages_url
            },
            {
                "name": "dotfiles",
                "language": "Shell",
                "updated_at": "2023-01-01T00:00:00Z",
                "fork": true,
                "size": 10
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/widgets/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Python": 52000,
            "JavaScript": 3100
        })))
        .mount(&server)
        .await;

    let verifier = test_verifier(&server.uri());
    let report = verifier
        .verify_github(
            Some("https://github.com/octocat"),
            &skills(&["Python", "React", "Agile"]),
            now(),
        )
        .await;

    assert!(report.valid);
    assert_eq!(report.status, GithubStatus::Verified);
    assert_eq!(report.username.as_deref(), Some("octocat"));
    assert_eq!(report.public_repos, 12);
    assert!(report.account_age_days > 365);
    assert_eq!(report.repos_analyzed, 2);
    assert_eq!(report.original_repos, 1);
    assert_eq!(report.forked_repos, 1);
    assert_eq!(report.recent_activity_count, 1);
    assert_eq!(report.top_languages[0], "Python");

    // Python matches directly; React matches through JavaScript; Agile
    // is neither a language nor a mapped framework.
    assert_eq!(report.skill_matches.len(), 2);
    assert!(report.skill_mismatches.is_empty());

    assert!(report.hyper_inflation_flags.is_empty());
    assert_eq!(
        report.repos_details[0]
            .languages_breakdown
            .as_ref()
            .and_then(|b| b.get("Python")),
        Some(&52000)
    );
}

#[tokio::test]
async fn missing_user_reports_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let report = test_verifier(&server.uri())
        .verify_github(Some("https://github.com/ghost"), &[], now())
        .await;

    assert!(!report.valid);
    assert_eq!(report.status, GithubStatus::NotFound);
    assert!(report.error.as_deref().unwrap_or_default().contains("ghost"));
}

#[tokio::test]
async fn rate_limit_reported_distinctly() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/busy"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let report = test_verifier(&server.uri())
        .verify_github(Some("https://github.com/busy"), &[], now())
        .await;

    assert!(!report.valid);
    assert_eq!(report.status, GithubStatus::RateLimited);
}

#[tokio::test]
async fn fresh_empty_account_collects_inflation_flags() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/newbie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "login": "newbie",
            "created_at": "2024-06-05T00:00:00Z",
            "public_repos": 0
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/newbie/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let report = test_verifier(&server.uri())
        .verify_github(Some("https://github.com/newbie"), &[], now())
        .await;

    assert!(report.valid);
    let flag_types: Vec<&str> = report
        .hyper_inflation_flags
        .iter()
        .map(|f| f.flag_type.as_str())
        .collect();
    assert!(flag_types.contains(&"VERY_NEW_ACCOUNT"));
    assert!(flag_types.contains(&"ZERO_REPOS"));
    assert!(flag_types.contains(&"NO_RECENT_ACTIVITY"));
}

async fn age_flag_types(created_at: &str) -> Vec<String> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octodev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "login": "octodev",
            "created_at": created_at,
            "public_repos": 8
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/octodev/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let report = test_verifier(&server.uri())
        .verify_github(Some("https://github.com/octodev"), &[], now())
        .await;
    report
        .hyper_inflation_flags
        .iter()
        .map(|f| f.flag_type.clone())
        .collect()
}

#[tokio::test]
async fn account_age_flag_fenceposts() {
    // Evaluation instant is 2024-06-15T12:00:00Z.
    let day_29 = age_flag_types("2024-05-17T12:00:00Z").await;
    assert!(day_29.contains(&"VERY_NEW_ACCOUNT".to_string()));
    assert!(!day_29.contains(&"NEW_ACCOUNT".to_string()));

    let day_30 = age_flag_types("2024-05-16T12:00:00Z").await;
    assert!(!day_30.contains(&"VERY_NEW_ACCOUNT".to_string()));
    assert!(day_30.contains(&"NEW_ACCOUNT".to_string()));

    let day_180 = age_flag_types("2023-12-18T12:00:00Z").await;
    assert!(!day_180.contains(&"VERY_NEW_ACCOUNT".to_string()));
    assert!(!day_180.contains(&"NEW_ACCOUNT".to_string()));

    let day_181 = age_flag_types("2023-12-17T12:00:00Z").await;
    assert!(!day_181.contains(&"VERY_NEW_ACCOUNT".to_string()));
    assert!(!day_181.contains(&"NEW_ACCOUNT".to_string()));
}

#[tokio::test]
async fn invalid_urls_never_hit_the_network() {
    let server = MockServer::start().await;
    let verifier = test_verifier(&server.uri());

    let missing = verifier.verify_github(None, &[], now()).await;
    assert_eq!(missing.status, GithubStatus::Missing);

    let invalid = verifier
        .verify_github(Some("https://github.com/"), &[], now())
        .await;
    assert_eq!(invalid.status, GithubStatus::InvalidUrl);
}
