use serde::{Deserialize, Serialize};

/// Sentinel name used when every name heuristic fails.
pub const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";

/// Classified URLs pulled from the resume text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeUrls {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub all_urls: Vec<String>,
}

/// One education entry. Fields are best-effort; a standalone institution hit
/// produces an entry with only `institution` set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub field: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
    pub full_text: Option<String>,
}

/// Total work experience summed naively over all detected date ranges.
/// Overlapping or concurrent roles are double-counted by design of the
/// current heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalExperience {
    pub total_years: u32,
    pub total_months_remainder: u32,
    pub total_months_raw: u32,
    pub experience_text: String,
    pub date_ranges_found: usize,
}

/// Structured facts extracted from one resume document.
///
/// Every list field is capped to bound downstream verification cost.
/// Extraction never fails past the unparsable-document gate: unresolvable
/// fields are `None` or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub urls: ResumeUrls,
    /// Heuristically identified employers, first-seen order, max 10.
    pub companies: Vec<String>,
    /// Max 5, original document casing.
    pub job_titles: Vec<String>,
    /// Deduplicated, Title Cased.
    pub skills: Vec<String>,
    /// Max 5.
    pub education: Vec<EducationEntry>,
    /// Raw date-range mentions in any of the three recognized shapes.
    pub experience_dates: Vec<String>,
    pub total_experience: TotalExperience,
    /// Cleaned text retained for traceability.
    pub raw_text: String,
}
