//! Integration tests for `RegistryVerifier` using wiremock HTTP mocks.

use resvet_core::{AppConfig, RegistryConfidence};
use resvet_verify::{CompanyStatus, RegistryEndpoints, RegistryVerifier};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(aggregator_token: Option<&str>) -> AppConfig {
    AppConfig {
        log_level: "info".into(),
        vocabulary_path: "./config/vocabulary.yaml".into(),
        opencorporates_api_token: aggregator_token.map(str::to_owned),
        github_token: None,
        registry_timeout_secs: 5,
        profile_timeout_secs: 5,
        repo_list_timeout_secs: 5,
        language_timeout_secs: 2,
        api_user_agent: "resvet-test".into(),
        browser_user_agent: "Mozilla/5.0 test".into(),
    }
}

fn test_verifier(base_url: &str, token: Option<&str>) -> RegistryVerifier {
    RegistryVerifier::with_endpoints(&test_config(token), RegistryEndpoints::all_at(base_url))
        .expect("verifier construction should not fail")
}

#[tokio::test]
async fn companies_house_hit_yields_registered_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Acme Widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><a href="/company/01234567">ACME WIDGETS LTD</a></html>"#,
        ))
        .mount(&server)
        .await;

    let verifier = test_verifier(&server.uri(), None);
    let report = verifier.verify_company("Acme Widgets").await;

    assert!(report.is_registered);
    assert_eq!(report.status, CompanyStatus::Registered);
    assert_eq!(report.confidence, Some(RegistryConfidence::High));
    assert_eq!(report.registrations_found.len(), 1);
    assert_eq!(report.registrations_found[0].source, "UK Companies House");
    assert_eq!(
        report.registrations_found[0].identifier.as_deref(),
        Some("01234567")
    );
    assert!(report.red_flags.is_empty());
    assert!(report.status_message.contains("UK Companies House"));
}

#[tokio::test]
async fn sec_edgar_hit_extracts_cik() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/browse-edgar"))
        .and(query_param("company", "Example Corp Co"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="browse-edgar?action=getcompany&CIK=0001018724">EXAMPLE CORP CO</a>"#,
        ))
        .mount(&server)
        .await;

    let verifier = test_verifier(&server.uri(), None);
    let report = verifier.verify_company("Example Corp Co").await;

    assert!(report.is_registered);
    assert_eq!(report.status, CompanyStatus::Registered);
    let sec_hit = report
        .registrations_found
        .iter()
        .find(|h| h.source == "SEC EDGAR")
        .expect("SEC EDGAR hit");
    assert_eq!(sec_hit.identifier.as_deref(), Some("0001018724"));
    assert_eq!(sec_hit.country.as_deref(), Some("United States"));
}

#[tokio::test]
async fn web_presence_alone_is_not_a_registration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Abstract": "Ghostly Ventures is a consulting firm.",
            "Heading": "Ghostly Ventures"
        })))
        .mount(&server)
        .await;

    let verifier = test_verifier(&server.uri(), None);
    let report = verifier.verify_company("Ghostly Ventures").await;

    assert!(!report.is_registered);
    assert_eq!(report.status, CompanyStatus::NotFound);
    assert_eq!(report.confidence, Some(RegistryConfidence::Low));
    assert_eq!(report.red_flags.len(), 1);
    assert_eq!(report.red_flags[0].flag_type, "UNVERIFIED_REGISTRATION");
    let web_hit = &report.registrations_found[0];
    assert_eq!(web_hit.confidence, RegistryConfidence::Low);
    assert!(web_hit
        .note
        .as_deref()
        .unwrap_or_default()
        .contains("not confirmed in official registry"));
}

#[tokio::test]
async fn nothing_found_anywhere_raises_unregistered_flag() {
    let server = MockServer::start().await;

    let verifier = test_verifier(&server.uri(), None);
    let report = verifier.verify_company("Nonexistent Shell Co").await;

    assert!(!report.is_registered);
    assert_eq!(report.status, CompanyStatus::NotFound);
    assert_eq!(report.confidence, None);
    assert_eq!(report.red_flags.len(), 1);
    assert_eq!(report.red_flags[0].flag_type, "UNREGISTERED_COMPANY");
    // Without a token the aggregator is skipped, not checked.
    assert!(!report
        .sources_checked
        .iter()
        .any(|s| s == "OpenCorporates"));
    assert!(report.sources_checked.iter().any(|s| s == "Web Search"));
}

#[tokio::test]
async fn aggregator_runs_only_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0.4/companies/search"))
        .and(query_param("api_token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {
                "total_count": 1,
                "companies": [
                    { "company": {
                        "name": "Global Holdings GmbH",
                        "jurisdiction_code": "de",
                        "company_number": "HRB 12345"
                    } }
                ]
            }
        })))
        .mount(&server)
        .await;

    let verifier = test_verifier(&server.uri(), Some("secret-token"));
    let report = verifier.verify_company("Global Holdings GmbH").await;

    assert!(report.is_registered);
    assert_eq!(report.status, CompanyStatus::Registered);
    let hit = report
        .registrations_found
        .iter()
        .find(|h| h.source == "OpenCorporates")
        .expect("aggregator hit");
    assert_eq!(hit.country.as_deref(), Some("de"));
    assert_eq!(hit.identifier.as_deref(), Some("HRB 12345"));
    assert!(report.sources_checked.iter().any(|s| s == "OpenCorporates"));
}

#[tokio::test]
async fn repeat_lookups_are_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/company/999">CACHED LTD</a> cached"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let verifier = test_verifier(&server.uri(), None);
    let first = verifier.verify_company("Cached Ltd").await;
    let second = verifier.verify_company("CACHED LTD").await;

    assert_eq!(first.status, second.status);
    assert_eq!(
        first.registrations_found[0].identifier,
        second.registrations_found[0].identifier
    );
}
