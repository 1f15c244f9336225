//! Analysis command handler for the CLI.
//!
//! Called from `main` after config and vocabulary are established. Per-file
//! failures are logged and skipped rather than propagated so one bad
//! document does not abort the full run.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;

use resvet_core::{AppConfig, Vocabulary};
use resvet_extract::{DocumentKind, ParsedResume, ResumeExtractor};
use resvet_risk::RiskAssessment;
use resvet_verify::{
    CandidateVerification, CandidateVerifier, CompanyVerification, RegistryVerifier,
};

/// Full analysis output for one resume document. The verification and risk
/// sections are absent in offline runs.
#[derive(Debug, Serialize)]
pub(crate) struct AnalysisReport {
    pub file: String,
    pub parsed: ParsedResume,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<CompanyVerification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<CandidateVerification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<RiskAssessment>,
}

/// Latest report per candidate name for the run. A second resume claiming
/// the same name replaces the first, with a warning logged.
#[derive(Default)]
pub(crate) struct CandidateStore {
    reports: Mutex<HashMap<String, AnalysisReport>>,
}

impl CandidateStore {
    pub(crate) fn insert(&self, report: AnalysisReport) {
        if let Ok(mut reports) = self.reports.lock() {
            let name = report.parsed.name.clone();
            if let Some(previous) = reports.insert(name, report) {
                tracing::warn!(
                    name = %previous.parsed.name,
                    replaced_file = %previous.file,
                    "duplicate candidate name, replacing earlier report"
                );
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.reports.lock().map(|reports| reports.len()).unwrap_or(0)
    }
}

/// Extract, verify, and score each document in turn, printing one JSON
/// report per file.
///
/// When `offline` is `true` only extraction runs; registry and identity
/// verification are skipped and the report has no assessment.
///
/// # Errors
///
/// Returns an error if a verifier cannot be constructed or every document
/// fails. Individual document failures are printed and skipped.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    vocabulary: &Vocabulary,
    files: &[PathBuf],
    offline: bool,
) -> anyhow::Result<()> {
    let extractor = ResumeExtractor::new(vocabulary.clone());
    let verifiers = if offline {
        None
    } else {
        let registry = RegistryVerifier::new(config)
            .map_err(|e| anyhow::anyhow!("failed to build registry verifier: {e}"))?;
        let candidates = CandidateVerifier::new(config, vocabulary.clone())
            .map_err(|e| anyhow::anyhow!("failed to build candidate verifier: {e}"))?;
        Some((registry, candidates))
    };

    let store = CandidateStore::default();
    let mut failures: usize = 0;

    for path in files {
        match analyze_file(path, &extractor, verifiers.as_ref(), vocabulary).await {
            Ok(report) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
                store.insert(report);
            }
            Err(e) => {
                failures += 1;
                eprintln!("error: failed to analyze {}: {e:#}", path.display());
            }
        }
    }

    tracing::info!(
        candidates = store.len(),
        failed = failures,
        "analysis run finished"
    );
    if failures == files.len() {
        anyhow::bail!("no documents could be analyzed");
    }
    Ok(())
}

async fn analyze_file(
    path: &Path,
    extractor: &ResumeExtractor,
    verifiers: Option<&(RegistryVerifier, CandidateVerifier)>,
    vocabulary: &Vocabulary,
) -> anyhow::Result<AnalysisReport> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let kind: DocumentKind = path
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or_default()
        .parse()?;
    let parsed = extractor.parse_document(&bytes, kind, None, Utc::now())?;
    tracing::info!(
        name = %parsed.name,
        companies = parsed.companies.len(),
        skills = parsed.skills.len(),
        "document parsed"
    );

    let Some((registry, candidates)) = verifiers else {
        return Ok(AnalysisReport {
            file: path.display().to_string(),
            parsed,
            companies: Vec::new(),
            candidate: None,
            assessment: None,
        });
    };

    let mut companies = Vec::with_capacity(parsed.companies.len());
    for company in &parsed.companies {
        companies.push(registry.verify_company(company).await);
    }

    let candidate = candidates
        .verify_candidate(
            &parsed.name,
            &parsed.skills,
            parsed.urls.github.as_deref(),
            parsed.urls.linkedin.as_deref(),
            parsed.urls.portfolio.as_deref(),
            Utc::now(),
        )
        .await;

    let assessment = resvet_risk::analyze_risk(
        &parsed.name,
        &parsed.job_titles,
        &companies,
        &candidate,
        vocabulary,
    );

    Ok(AnalysisReport {
        file: path.display().to_string(),
        parsed,
        companies,
        candidate: Some(candidate),
        assessment: Some(assessment),
    })
}
