//! Employer registration checks against free public registries.
//!
//! Sources run in a fixed order: Companies House search (HIGH), SEC EDGAR
//! company browse (HIGH), a secondary registry mirror (MEDIUM), the
//! token-gated aggregator API (HIGH), and a web-search JSON endpoint as a
//! LOW-confidence fallback only when no registry answered. A source that
//! fails on the network counts as checked-and-negative; `verify_company`
//! itself never fails.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;
use reqwest::{Client, Url};
use serde::Deserialize;

use resvet_core::{AppConfig, RegistryConfidence, RiskFlag, Severity};

use crate::error::VerifyError;
use crate::types::{CompanyStatus, CompanyVerification, RegistryHit};

const COMPANIES_HOUSE: &str = "UK Companies House";
const SEC_EDGAR: &str = "SEC EDGAR";
const REGISTRY_MIRROR: &str = "MCA India (via Zauba)";
const AGGREGATOR: &str = "OpenCorporates";
const WEB_SEARCH: &str = "Web Search (DuckDuckGo)";

/// Base URLs for every registry source, overridable for tests.
#[derive(Debug, Clone)]
pub struct RegistryEndpoints {
    pub companies_house: String,
    pub sec_edgar: String,
    pub mirror: String,
    pub aggregator: String,
    pub web_search: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self {
            companies_house: "https://find-and-update.company-information.service.gov.uk".into(),
            sec_edgar: "https://www.sec.gov".into(),
            mirror: "https://www.zaubacorp.com".into(),
            aggregator: "https://api.opencorporates.com".into(),
            web_search: "https://api.duckduckgo.com".into(),
        }
    }
}

impl RegistryEndpoints {
    /// Point every source at one server, for wiremock tests.
    #[must_use]
    pub fn all_at(base: &str) -> Self {
        Self {
            companies_house: base.into(),
            sec_edgar: base.into(),
            mirror: base.into(),
            aggregator: base.into(),
            web_search: base.into(),
        }
    }
}

/// Checks company names against public registries, memoizing results per
/// lowercased name for the life of the process.
pub struct RegistryVerifier {
    browser_client: Client,
    api_client: Client,
    endpoints: Endpoints,
    aggregator_token: Option<String>,
    company_number: Regex,
    cik: Regex,
    cin: Regex,
    cache: Mutex<HashMap<String, CompanyVerification>>,
}

struct Endpoints {
    companies_house: Url,
    sec_edgar: Url,
    mirror: Url,
    aggregator: Url,
    web_search: Url,
}

impl RegistryVerifier {
    /// Creates a verifier pointing at the production registries.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Http`] if a `reqwest::Client` cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, VerifyError> {
        Self::with_endpoints(config, RegistryEndpoints::default())
    }

    /// Creates a verifier with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Http`] if a `reqwest::Client` cannot be built,
    /// or [`VerifyError::InvalidBaseUrl`] for an unparsable endpoint.
    pub fn with_endpoints(
        config: &AppConfig,
        endpoints: RegistryEndpoints,
    ) -> Result<Self, VerifyError> {
        let timeout = Duration::from_secs(config.registry_timeout_secs);
        let browser_client = Client::builder()
            .timeout(timeout)
            .user_agent(&config.browser_user_agent)
            .build()?;
        let api_client = Client::builder()
            .timeout(timeout)
            .user_agent(&config.api_user_agent)
            .build()?;

        Ok(Self {
            browser_client,
            api_client,
            endpoints: Endpoints {
                companies_house: parse_base(&endpoints.companies_house)?,
                sec_edgar: parse_base(&endpoints.sec_edgar)?,
                mirror: parse_base(&endpoints.mirror)?,
                aggregator: parse_base(&endpoints.aggregator)?,
                web_search: parse_base(&endpoints.web_search)?,
            },
            aggregator_token: config
                .opencorporates_api_token
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .map(str::to_owned),
            company_number: Regex::new(r"/company/(\d+)").expect("valid regex"),
            cik: Regex::new(r"(?i)CIK=(\d+)").expect("valid regex"),
            cin: Regex::new(r"[UL]\d{5}[A-Z]{2}\d{4}[A-Z]{3}\d{6}").expect("valid regex"),
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Checks every registry for `company_name` and derives the aggregate
    /// status, red flags included. Infallible: source failures degrade to
    /// negative answers.
    pub async fn verify_company(&self, company_name: &str) -> CompanyVerification {
        let cache_key = company_name.to_lowercase();
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&cache_key) {
                return hit.clone();
            }
        }

        let mut registrations: Vec<RegistryHit> = Vec::new();
        let mut sources_checked: Vec<String> = Vec::new();
        let mut source_errors: Vec<String> = Vec::new();
        let mut is_registered = false;
        let mut confidence: Option<RegistryConfidence> = None;
        let mut web_note = false;

        sources_checked.push(COMPANIES_HOUSE.into());
        match self.search_companies_house(company_name).await {
            Ok(Some(hit)) => {
                registrations.push(hit);
                is_registered = true;
                confidence = Some(RegistryConfidence::High);
            }
            Ok(None) => {}
            Err(e) => record_source_error(COMPANIES_HOUSE, &e, &mut source_errors),
        }

        sources_checked.push(format!("{SEC_EDGAR} (US)"));
        match self.search_sec_edgar(company_name).await {
            Ok(Some(hit)) => {
                registrations.push(hit);
                is_registered = true;
                confidence = Some(RegistryConfidence::High);
            }
            Ok(None) => {}
            Err(e) => record_source_error(SEC_EDGAR, &e, &mut source_errors),
        }

        sources_checked.push("India MCA".into());
        match self.search_mirror(company_name).await {
            Ok(Some(hit)) => {
                registrations.push(hit);
                is_registered = true;
                if confidence != Some(RegistryConfidence::High) {
                    confidence = Some(RegistryConfidence::Medium);
                }
            }
            Ok(None) => {}
            Err(e) => record_source_error(REGISTRY_MIRROR, &e, &mut source_errors),
        }

        // Skipped without a token; a skip is not a checked source.
        if self.aggregator_token.is_some() {
            sources_checked.push(AGGREGATOR.into());
            match self.search_aggregator(company_name).await {
                Ok(Some(hit)) => {
                    registrations.push(hit);
                    is_registered = true;
                    confidence = Some(RegistryConfidence::High);
                }
                Ok(None) => {}
                Err(e) => record_source_error(AGGREGATOR, &e, &mut source_errors),
            }
        }

        if !is_registered {
            sources_checked.push("Web Search".into());
            match self.search_web(company_name).await {
                Ok(Some(hit)) => {
                    // Web presence is not a registration; only the
                    // confidence moves.
                    registrations.push(hit);
                    confidence = Some(RegistryConfidence::Low);
                    web_note = true;
                }
                Ok(None) => {}
                Err(e) => record_source_error(WEB_SEARCH, &e, &mut source_errors),
            }
        }

        let mut red_flags = Vec::new();
        if !is_registered && confidence.is_none() {
            red_flags.push(RiskFlag::new(
                "UNREGISTERED_COMPANY",
                Severity::High,
                "company",
                format!("'{company_name}' not found in any company registry"),
            ));
        } else if confidence == Some(RegistryConfidence::Low) {
            red_flags.push(RiskFlag::new(
                "UNVERIFIED_REGISTRATION",
                Severity::Medium,
                "company",
                format!("'{company_name}' has web presence but not found in official registries"),
            ));
        }

        let (status, status_message) = match (is_registered, confidence) {
            (true, Some(RegistryConfidence::High)) => (
                CompanyStatus::Registered,
                format!(
                    "Legally registered ({})",
                    registrations.first().map_or("registry", |h| h.source.as_str())
                ),
            ),
            (true, _) => (
                CompanyStatus::LikelyRegistered,
                "Likely exists but registration not fully confirmed".to_string(),
            ),
            (false, _) => (
                CompanyStatus::NotFound,
                "Not found in any company registry - potential ghost company".to_string(),
            ),
        };

        if web_note {
            tracing::debug!(company = company_name, "web presence only, no registry hit");
        }

        let verification = CompanyVerification {
            company: company_name.to_string(),
            is_registered,
            confidence,
            status,
            status_message,
            registrations_found: registrations,
            sources_checked,
            source_errors,
            red_flags,
        };

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(cache_key, verification.clone());
        }
        verification
    }

    /// Companies House HTML search. Registered when the body mentions the
    /// company name or any of its significant words.
    async fn search_companies_house(
        &self,
        company_name: &str,
    ) -> Result<Option<RegistryHit>, VerifyError> {
        let mut url = join_path(&self.endpoints.companies_house, "search");
        url.query_pairs_mut().append_pair("q", company_name);

        let response = self.browser_client.get(url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }
        let body = response.text().await?;
        if !body_mentions_company(&body, company_name) {
            return Ok(None);
        }

        let identifier = self
            .company_number
            .captures(&body)
            .map(|c| c[1].to_string());
        Ok(Some(RegistryHit {
            source: COMPANIES_HOUSE.into(),
            country: Some("United Kingdom".into()),
            confidence: RegistryConfidence::High,
            identifier,
            note: None,
        }))
    }

    /// SEC EDGAR company browse. A CIK anywhere in the response means a
    /// filing entity matched.
    async fn search_sec_edgar(
        &self,
        company_name: &str,
    ) -> Result<Option<RegistryHit>, VerifyError> {
        let mut url = join_path(&self.endpoints.sec_edgar, "cgi-bin/browse-edgar");
        url.query_pairs_mut()
            .append_pair("company", company_name)
            .append_pair("type", "")
            .append_pair("dateb", "")
            .append_pair("owner", "include")
            .append_pair("count", "10")
            .append_pair("action", "getcompany");

        let response = self.api_client.get(url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }
        let body = response.text().await?;
        let body_lower = body.to_lowercase();
        if !body_lower.contains("cik=") && !body_lower.contains(&company_name.to_lowercase()) {
            return Ok(None);
        }

        let identifier = self.cik.captures(&body).map(|c| c[1].to_string());
        Ok(Some(RegistryHit {
            source: SEC_EDGAR.into(),
            country: Some("United States".into()),
            confidence: RegistryConfidence::High,
            identifier,
            note: None,
        }))
    }

    /// Secondary registry mirror keyed by the company's first letter. A CIN
    /// in the body identifies the registration.
    async fn search_mirror(&self, company_name: &str) -> Result<Option<RegistryHit>, VerifyError> {
        let initial: String = company_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        let path = format!(
            "company-list/{}/{}.html",
            utf8_percent_encode(&initial, NON_ALPHANUMERIC),
            utf8_percent_encode(company_name, NON_ALPHANUMERIC),
        );
        let url = join_path(&self.endpoints.mirror, &path);

        let response = self.browser_client.get(url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }
        let body = response.text().await?;
        let body_lower = body.to_lowercase();
        if !body_lower.contains(&company_name.to_lowercase()) && !body_lower.contains("cin") {
            return Ok(None);
        }

        let identifier = self.cin.find(&body).map(|m| m.as_str().to_string());
        Ok(Some(RegistryHit {
            source: REGISTRY_MIRROR.into(),
            country: Some("India".into()),
            confidence: RegistryConfidence::Medium,
            identifier,
            note: None,
        }))
    }

    /// Aggregator API covering many jurisdictions; only called when a token
    /// is configured.
    async fn search_aggregator(
        &self,
        company_name: &str,
    ) -> Result<Option<RegistryHit>, VerifyError> {
        let Some(token) = self.aggregator_token.as_deref() else {
            return Ok(None);
        };
        let mut url = join_path(&self.endpoints.aggregator, "v0.4/companies/search");
        url.query_pairs_mut()
            .append_pair("q", company_name)
            .append_pair("api_token", token);

        let response = self.api_client.get(url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }
        let body: AggregatorEnvelope = parse_json(
            &response.text().await?,
            "aggregator companies/search",
        )?;

        let results = body.results.unwrap_or_default();
        if results.total_count == 0 {
            return Ok(None);
        }
        let company = results.companies.into_iter().next().map(|w| w.company);
        Ok(Some(RegistryHit {
            source: AGGREGATOR.into(),
            country: company.as_ref().and_then(|c| c.jurisdiction_code.clone()),
            confidence: RegistryConfidence::High,
            identifier: company.and_then(|c| c.company_number),
            note: None,
        }))
    }

    /// Instant-answer web search; any abstract or heading counts as web
    /// presence, explicitly noted as unconfirmed.
    async fn search_web(&self, company_name: &str) -> Result<Option<RegistryHit>, VerifyError> {
        let mut url = self.endpoints.web_search.clone();
        url.query_pairs_mut()
            .append_pair("q", &format!("{company_name} company"))
            .append_pair("format", "json")
            .append_pair("no_redirect", "1");

        let response = self.browser_client.get(url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }
        let body: WebSearchAnswer = parse_json(&response.text().await?, "web search answer")?;
        if body.abstract_text.is_empty() && body.heading.is_empty() {
            return Ok(None);
        }

        let note = if body.abstract_text.is_empty() {
            None
        } else {
            Some(body.abstract_text.chars().take(200).collect::<String>())
        };
        Ok(Some(RegistryHit {
            source: WEB_SEARCH.into(),
            country: None,
            confidence: RegistryConfidence::Low,
            identifier: None,
            note: Some(format!(
                "Found in web search, but not confirmed in official registry{}",
                note.map(|n| format!(": {n}")).unwrap_or_default()
            )),
        }))
    }
}

#[derive(Debug, Default, Deserialize)]
struct AggregatorEnvelope {
    results: Option<AggregatorResults>,
}

#[derive(Debug, Default, Deserialize)]
struct AggregatorResults {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    companies: Vec<AggregatorCompanyWrap>,
}

#[derive(Debug, Deserialize)]
struct AggregatorCompanyWrap {
    company: AggregatorCompany,
}

#[derive(Debug, Deserialize)]
struct AggregatorCompany {
    jurisdiction_code: Option<String>,
    company_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WebSearchAnswer {
    #[serde(rename = "Abstract", default)]
    abstract_text: String,
    #[serde(rename = "Heading", default)]
    heading: String,
}

fn parse_base(base: &str) -> Result<Url, VerifyError> {
    let normalised = format!("{}/", base.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|_| VerifyError::InvalidBaseUrl(base.to_string()))
}

fn join_path(base: &Url, path: &str) -> Url {
    base.join(path).unwrap_or_else(|_| base.clone())
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str, context: &str) -> Result<T, VerifyError> {
    serde_json::from_str(body).map_err(|source| VerifyError::Deserialize {
        context: context.to_string(),
        source,
    })
}

fn record_source_error(source: &str, error: &VerifyError, errors: &mut Vec<String>) {
    tracing::warn!(source, error = %error, "registry source failed");
    errors.push(format!("{source}: {error}"));
}

/// The body mentions the company when the full lowercased name appears, or
/// any single word of it longer than three characters does.
fn body_mentions_company(body: &str, company_name: &str) -> bool {
    let body_lower = body.to_lowercase();
    let company_lower = company_name.to_lowercase();
    body_lower.contains(&company_lower)
        || company_lower
            .split_whitespace()
            .any(|word| word.len() > 3 && body_lower.contains(word))
}
