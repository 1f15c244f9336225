//! Candidate name extraction waterfall.
//!
//! Five heuristics tried in order, each returning `Option` and chained with
//! `or_else`. The NER steps are skipped when no tagger capability is
//! available.

use regex::Regex;

use crate::ner::{EntityLabel, EntityTagger};
use crate::truncate_chars;
use crate::types::UNKNOWN_CANDIDATE;

const HEAD_CHARS: usize = 500;
const MAX_NAME_LEN: usize = 50;

/// Substrings that disqualify a tagged PERSON span near the document top.
const FORBIDDEN_IN_NAME: [&str; 4] = ["resume", "linkedin", "github", "email"];

/// Header words that disqualify a top-of-document line.
const HEADER_WORDS: [&str; 5] = ["resume", "curriculum", "vitae", "page", "objective"];

pub(crate) struct NamePatterns {
    before_email: Regex,
    label: Regex,
}

impl NamePatterns {
    pub(crate) fn new() -> Self {
        Self {
            before_email: Regex::new(r"([A-Za-z\s]+)[\s\n]*[a-zA-Z0-9._%+-]+@")
                .expect("valid regex"),
            label: Regex::new(r"(?i)(?:name|full name)\s*[:\-]\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)")
                .expect("valid regex"),
        }
    }

    pub(crate) fn extract_name(&self, text: &str, tagger: Option<&dyn EntityTagger>) -> String {
        person_near_top(text, tagger)
            .or_else(|| self.name_before_email(text))
            .or_else(|| name_from_first_lines(text))
            .or_else(|| self.labelled_name(text))
            .or_else(|| first_person_anywhere(text, tagger))
            .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string())
    }

    /// Method 2: capitalized tokens immediately preceding an email address.
    fn name_before_email(&self, text: &str) -> Option<String> {
        let head = truncate_chars(text, HEAD_CHARS);
        let candidate = self.before_email.captures(head)?.get(1)?.as_str().trim();
        let parts: Vec<&str> = candidate.split_whitespace().collect();
        if (2..=4).contains(&parts.len()) && parts.iter().all(|p| starts_uppercase(p)) {
            return Some(candidate.to_string());
        }
        None
    }

    /// Method 4: explicit "Name:" label.
    fn labelled_name(&self, text: &str) -> Option<String> {
        let head = truncate_chars(text, HEAD_CHARS);
        self.label
            .captures(head)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

/// Method 1: first tagged PERSON in the document head.
fn person_near_top(text: &str, tagger: Option<&dyn EntityTagger>) -> Option<String> {
    let tagger = tagger?;
    let head = truncate_chars(text, HEAD_CHARS);
    tagger
        .tag(head)
        .into_iter()
        .filter(|span| span.label == EntityLabel::Person)
        .map(|span| span.text.trim().to_string())
        .find(|candidate| {
            let parts = candidate.split_whitespace().count();
            let lower = candidate.to_lowercase();
            (2..=4).contains(&parts)
                && candidate.len() < MAX_NAME_LEN
                && !FORBIDDEN_IN_NAME.iter().any(|f| lower.contains(f))
        })
}

/// Method 3: scan the first seven lines for a name-shaped line.
fn name_from_first_lines(text: &str) -> Option<String> {
    for line in text.lines().take(7) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if !(2..=4).contains(&parts.len()) {
            continue;
        }
        let capitalized = parts.iter().all(|p| {
            p.chars()
                .next()
                .is_none_or(|c| !c.is_alphabetic() || c.is_uppercase())
        });
        if !capitalized || line.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        let lower = line.to_lowercase();
        if line.contains('@') || lower.contains("http") {
            continue;
        }
        if HEADER_WORDS.iter().any(|w| lower.contains(w)) {
            continue;
        }
        return Some(line.to_string());
    }
    None
}

/// Method 5 fallback: first tagged PERSON anywhere in the document.
fn first_person_anywhere(text: &str, tagger: Option<&dyn EntityTagger>) -> Option<String> {
    let tagger = tagger?;
    tagger
        .tag(text)
        .into_iter()
        .filter(|span| span.label == EntityLabel::Person)
        .map(|span| span.text.trim().to_string())
        .find(|name| name.split_whitespace().count() >= 2 && name.len() < MAX_NAME_LEN)
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::EntitySpan;

    struct FixedTagger(Vec<EntitySpan>);

    impl EntityTagger for FixedTagger {
        fn tag(&self, text: &str) -> Vec<EntitySpan> {
            self.0
                .iter()
                .filter(|span| text.contains(span.text.as_str()))
                .cloned()
                .collect()
        }
    }

    fn person(text: &str) -> EntitySpan {
        EntitySpan {
            label: EntityLabel::Person,
            text: text.to_string(),
            start: 0,
            end: text.len(),
        }
    }

    #[test]
    fn tagger_person_near_top_wins() {
        let tagger = FixedTagger(vec![person("Jane Doe")]);
        let name = NamePatterns::new().extract_name("Jane Doe\nEngineer", Some(&tagger));
        assert_eq!(name, "Jane Doe");
    }

    #[test]
    fn forbidden_person_falls_through_to_line_scan() {
        let tagger = FixedTagger(vec![person("Resume Of Jane")]);
        let text = "Resume Of Jane\nJohn Smith\njohn@x.com";
        let name = NamePatterns::new().extract_name(text, Some(&tagger));
        assert_eq!(name, "John Smith");
    }

    #[test]
    fn name_before_email_without_tagger() {
        let name = NamePatterns::new().extract_name("John Smith\njohn.smith@example.com", None);
        assert_eq!(name, "John Smith");
    }

    #[test]
    fn first_lines_scan_skips_headers_and_digits() {
        let text = "Curriculum Vitae\n555 1234\nMary Jane Watson\nDeveloper";
        let name = NamePatterns::new().extract_name(text, None);
        assert_eq!(name, "Mary Jane Watson");
    }

    #[test]
    fn labelled_name_extracted() {
        let name = NamePatterns::new().extract_name("docid 9188\nname: Priya Sharma\n", None);
        assert_eq!(name, "Priya Sharma");
    }

    #[test]
    fn unknown_candidate_when_everything_fails() {
        let name = NamePatterns::new().extract_name("x\ny\nz 123", None);
        assert_eq!(name, UNKNOWN_CANDIDATE);
    }

    #[test]
    fn full_document_person_fallback() {
        let tagger = FixedTagger(vec![person("Elena Petrova Ivanova")]);
        let text = "summary 2024\nworked with teams\nmentored Elena Petrova Ivanova";
        let name = NamePatterns::new().extract_name(text, Some(&tagger));
        assert_eq!(name, "Elena Petrova Ivanova");
    }
}
