//! Degree, field-of-study, and institution extraction.
//!
//! Operates on the lowercased education section: one tolerant regex per
//! vocabulary degree captures the degree line, fields come from substring
//! lookup inside that capture, and tagged ORG entities with academic
//! keywords fill in institutions.

use regex::Regex;

use resvet_core::title_case;
use resvet_core::vocabulary::Vocabulary;

use crate::ner::{EntityLabel, EntityTagger};
use crate::truncate_chars;
use crate::types::EducationEntry;

const MAX_ENTRIES: usize = 5;
const NER_SECTION_CHARS: usize = 2000;

const INSTITUTION_KEYWORDS: [&str; 5] =
    ["university", "college", "institute", "school", "academy"];

pub(crate) struct EducationPatterns {
    /// One regex per vocabulary degree, capturing the rest of the line.
    degree_patterns: Vec<(String, Regex)>,
    year: Regex,
}

impl EducationPatterns {
    pub(crate) fn new(vocabulary: &Vocabulary) -> Self {
        let degree_patterns = vocabulary
            .degrees
            .iter()
            .map(|degree| {
                let pattern = format!("({}[^,\\n]*)", regex::escape(degree));
                (
                    degree.clone(),
                    Regex::new(&pattern).expect("valid regex"),
                )
            })
            .collect();

        Self {
            degree_patterns,
            year: Regex::new(r"\b(19|20)\d{2}\b").expect("valid regex"),
        }
    }

    pub(crate) fn extract_education(
        &self,
        education_section_lower: &str,
        vocabulary: &Vocabulary,
        tagger: Option<&dyn EntityTagger>,
    ) -> Vec<EducationEntry> {
        let mut entries: Vec<EducationEntry> = Vec::new();

        for (degree, pattern) in &self.degree_patterns {
            for captures in pattern.captures_iter(education_section_lower) {
                let Some(full) = captures.get(1) else {
                    continue;
                };
                let full_text = full.as_str().trim().to_string();

                let field = vocabulary
                    .fields_of_study
                    .iter()
                    .find(|f| full_text.contains(f.as_str()))
                    .map(|f| title_case(f));
                let year = self
                    .year
                    .find(&full_text)
                    .map(|m| m.as_str().to_string());

                let entry = EducationEntry {
                    degree: Some(degree.to_uppercase()),
                    field,
                    institution: None,
                    year,
                    full_text: Some(full_text),
                };
                if !entries.contains(&entry) {
                    entries.push(entry);
                }
            }
        }

        if let Some(tagger) = tagger {
            attach_institutions(education_section_lower, tagger, &mut entries);
        }

        entries.truncate(MAX_ENTRIES);
        entries
    }
}

/// Fill the first institution-less entry with each academic ORG span;
/// leftover institutions become standalone entries.
fn attach_institutions(
    education_section_lower: &str,
    tagger: &dyn EntityTagger,
    entries: &mut Vec<EducationEntry>,
) {
    let section = truncate_chars(education_section_lower, NER_SECTION_CHARS);
    for span in tagger.tag(section) {
        if span.label != EntityLabel::Org {
            continue;
        }
        let lower = span.text.to_lowercase();
        if !INSTITUTION_KEYWORDS.iter().any(|k| lower.contains(k)) {
            continue;
        }
        let institution = span.text.trim().to_string();
        if let Some(slot) = entries.iter_mut().find(|e| e.institution.is_none()) {
            slot.institution = Some(institution);
        } else if !entries
            .iter()
            .any(|e| e.institution.as_deref() == Some(institution.as_str()))
        {
            entries.push(EducationEntry {
                degree: None,
                field: None,
                institution: Some(institution),
                year: None,
                full_text: None,
            });
        }
    }
}
