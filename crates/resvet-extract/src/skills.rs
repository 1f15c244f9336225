//! Fixed-vocabulary job-title and skill scanning.

use regex::Regex;
use resvet_core::{title_case, Vocabulary};

pub(crate) struct SkillPatterns {
    /// Vocabulary skill paired with its tolerant matcher.
    skills: Vec<(String, Regex)>,
    /// Vocabulary title paired with a case-recovering matcher.
    titles: Vec<(String, Regex)>,
}

const MAX_TITLES: usize = 5;

impl SkillPatterns {
    pub(crate) fn new(vocabulary: &Vocabulary) -> Self {
        let skills = vocabulary
            .tech_skills
            .iter()
            .map(|skill| (skill.clone(), skill_regex(skill)))
            .collect();
        let titles = vocabulary
            .job_titles
            .iter()
            .map(|title| {
                let pattern = format!("(?i){}", regex::escape(title));
                (title.clone(), Regex::new(&pattern).expect("valid regex"))
            })
            .collect();
        Self { skills, titles }
    }

    /// Titles found in the text, original casing, vocabulary order, max 5.
    pub(crate) fn extract_job_titles(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        for (_, regex) in &self.titles {
            if let Some(m) = regex.find(text) {
                let extracted = m.as_str().to_string();
                if !found.contains(&extracted) {
                    found.push(extracted);
                }
            }
            if found.len() == MAX_TITLES {
                break;
            }
        }
        found
    }

    /// Skills found in the text, Title Cased and deduplicated. No cap beyond
    /// the vocabulary size.
    pub(crate) fn extract_skills(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut found = Vec::new();
        for (skill, regex) in &self.skills {
            if regex.is_match(&lower) {
                let display = title_case(skill);
                if !found.contains(&display) {
                    found.push(display);
                }
            }
        }
        found
    }
}

/// Build a word-bounded matcher that tolerates written variants: a period in
/// the vocabulary entry matches a period, a space, or nothing, and a hyphen
/// matches a hyphen, a space, or nothing — so `node.js` also matches
/// `nodejs` and `node js`.
fn skill_regex(skill: &str) -> Regex {
    let escaped = regex::escape(skill);
    let tolerant = escaped.replace(r"\.", r"[.\s]?").replace('-', r"[\-\s]?");
    Regex::new(&format!(r"\b{tolerant}\b")).expect("valid regex")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> SkillPatterns {
        SkillPatterns::new(&Vocabulary::bundled().unwrap())
    }

    #[test]
    fn node_js_variants_all_match() {
        for text in ["built with node.js", "built with nodejs", "built with node js"] {
            let skills = patterns().extract_skills(text);
            assert!(
                skills.contains(&"Node.Js".to_string()),
                "expected node.js match in {text:?}, got {skills:?}"
            );
        }
    }

    #[test]
    fn skills_deduplicated() {
        let skills = patterns().extract_skills("Python python PYTHON");
        assert_eq!(
            skills.iter().filter(|s| s.as_str() == "Python").count(),
            1
        );
    }

    #[test]
    fn substring_does_not_match_across_word_boundary() {
        // "r" is a vocabulary language but must not match inside "rust".
        let skills = patterns().extract_skills("rust only");
        assert!(skills.contains(&"Rust".to_string()));
        assert!(!skills.contains(&"R".to_string()));
    }

    #[test]
    fn titles_keep_document_casing_and_cap_at_five() {
        let text = "SOFTWARE ENGINEER, data scientist, devops engineer, \
                    product manager, tech lead, qa engineer, cloud architect";
        let titles = patterns().extract_job_titles(text);
        assert_eq!(titles.len(), 5);
        assert!(titles.contains(&"SOFTWARE ENGINEER".to_string()));
        assert!(titles.contains(&"data scientist".to_string()));
    }

}
