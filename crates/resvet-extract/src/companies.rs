//! Employer name extraction from the work-experience section.
//!
//! Five ordered employment regex families capture explicit employer
//! mentions; tagged ORG entities supplement them only when the patterns
//! found fewer than five, and only with a year or title token nearby —
//! the co-occurrence filter that keeps tech vendors out.

use std::collections::HashSet;

use regex::Regex;

use crate::ner::{EntityLabel, EntityTagger};
use crate::truncate_chars;

const MAX_COMPANIES: usize = 10;
const NER_SUPPLEMENT_THRESHOLD: usize = 5;
const NER_SECTION_CHARS: usize = 3000;
const CONTEXT_CHARS: usize = 100;

/// Educational institutions and MOOC platforms are never employers.
const EDUCATION_EXCLUSIONS: [&str; 11] = [
    "university",
    "college",
    "school",
    "institute",
    "academy",
    "coursera",
    "udemy",
    "udacity",
    "edx",
    "hackerrank",
    "leetcode",
];

/// A captured string that is only a role word is a title, not a company.
const TITLE_WORDS: [&str; 7] = [
    "engineer",
    "developer",
    "manager",
    "analyst",
    "intern",
    "consultant",
    "designer",
];

const LEGAL_SUFFIXES: [&str; 10] = [
    "inc",
    "ltd",
    "corp",
    "llc",
    "pvt",
    "limited",
    "technologies",
    "solutions",
    "systems",
    "consulting",
];

pub(crate) struct CompanyPatterns {
    employment: Vec<Regex>,
    year_or_present: Regex,
    title_nearby: Regex,
}

impl CompanyPatterns {
    pub(crate) fn new() -> Self {
        let employment = [
            // "Software Engineer at Google" / "@ Google as Developer"
            r"(?im)(?:at|@)\s+([A-Z][A-Za-z0-9\s&.\-]+?)(?:\s*[,|\n\-–•]|\s+as\s+|\s+from\s+|\s+for\s+|\s*\()",
            // "Google | Software Engineer" / "Google - Senior Developer"
            r"(?im)^([A-Z][A-Za-z0-9\s&.\-]+?)\s*[|–\-•]\s*(?:software|senior|junior|lead|staff|principal|engineer|developer|manager|analyst|architect|intern|consultant)",
            // "Worked at Google" / "Employed by Microsoft"
            r"(?im)(?:worked\s+at|working\s+at|employed\s+at|employed\s+by|joined)\s+([A-Z][A-Za-z0-9\s&.\-]+?)(?:\s*[,.\n]|\s+as\s+|\s+in\s+)",
            // "Company: Google" / "Employer: Microsoft"
            r"(?im)(?:company|employer|organization)\s*[:\-]\s*([A-Z][A-Za-z0-9\s&.\-]+)",
            // "Google (Jan 2020 - Present)" — company followed by a date
            r"(?im)^([A-Z][A-Za-z0-9\s&.\-]+?)\s*\(?\s*(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec|\d{4})",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect();

        Self {
            employment,
            year_or_present: Regex::new(r"(?i)\b(19|20)\d{2}\b|present|current")
                .expect("valid regex"),
            title_nearby: Regex::new(
                r"(?i)\b(engineer|developer|manager|analyst|lead|senior|junior)\b",
            )
            .expect("valid regex"),
        }
    }

    pub(crate) fn extract_companies(
        &self,
        experience_section: &str,
        tagger: Option<&dyn EntityTagger>,
    ) -> Vec<String> {
        let mut companies: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for pattern in &self.employment {
            for captures in pattern.captures_iter(experience_section) {
                let Some(raw) = captures.get(1) else {
                    continue;
                };
                let Some(company) = normalize_company(raw.as_str()) else {
                    continue;
                };
                if seen.insert(company.clone()) {
                    companies.push(company);
                }
            }
        }

        if companies.len() < NER_SUPPLEMENT_THRESHOLD {
            if let Some(tagger) = tagger {
                self.supplement_from_orgs(experience_section, tagger, &mut companies, &mut seen);
            }
        }

        companies.truncate(MAX_COMPANIES);
        companies
    }

    /// Add tagged ORG spans that look like employers: multi-token or
    /// legal-suffixed, with a year or title word within 100 characters.
    fn supplement_from_orgs(
        &self,
        experience_section: &str,
        tagger: &dyn EntityTagger,
        companies: &mut Vec<String>,
        seen: &mut HashSet<String>,
    ) {
        let section = truncate_chars(experience_section, NER_SECTION_CHARS);
        for span in tagger.tag(section) {
            if span.label != EntityLabel::Org {
                continue;
            }
            let company = span.text.trim().to_string();
            let lower = company.to_lowercase();

            let word_count = company.split_whitespace().count();
            let has_suffix = LEGAL_SUFFIXES.iter().any(|s| lower.contains(s));
            if word_count < 2 && !has_suffix {
                continue;
            }
            if EDUCATION_EXCLUSIONS.iter().any(|e| lower.contains(e)) {
                continue;
            }

            let context = span_context(section, span.start, span.end);
            let near_date = self.year_or_present.is_match(context);
            let near_title = self.title_nearby.is_match(context);
            if (near_date || near_title) && seen.insert(company.clone()) {
                companies.push(company);
            }
        }
    }
}

/// Collapse whitespace, trim stray punctuation, and reject non-employer
/// shapes. Returns `None` when the capture should be discarded.
fn normalize_company(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let cleaned = collapsed.trim_matches([' ', '.', ',', '-']).to_string();

    if cleaned.len() < 3 || cleaned.len() > 50 {
        return None;
    }
    let lower = cleaned.to_lowercase();
    if EDUCATION_EXCLUSIONS.iter().any(|e| lower.contains(e)) {
        return None;
    }
    if TITLE_WORDS.iter().any(|t| lower.contains(t)) {
        return None;
    }
    if ["the ", "a ", "an ", "my ", "our "]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return None;
    }
    Some(cleaned)
}

/// Slice up to 100 characters either side of a span, on char boundaries.
fn span_context(text: &str, start: usize, end: usize) -> &str {
    let from = text[..start.min(text.len())]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS.saturating_sub(1))
        .map_or(0, |(i, _)| i);
    let to = text[end.min(text.len())..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map_or(text.len(), |(i, _)| end + i);
    &text[from..to]
}
