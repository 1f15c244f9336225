//! Cross-matching claimed skills against observed repository languages.

use std::collections::HashMap;

use resvet_core::{title_case, Vocabulary};

use crate::types::{SkillMatch, SkillMismatch};

/// Compare each claimed skill to the languages observed across a
/// candidate's repositories.
///
/// Per skill, in order: a direct language match counts as evidence; a
/// framework with a known language mapping matches when any expected
/// language is present and mismatches otherwise; a recognized programming
/// language missing from the set mismatches; anything else is ignored.
pub(crate) fn match_skills(
    claimed_skills: &[String],
    repo_languages: &[String],
    primary_language_counts: &HashMap<String, usize>,
    vocabulary: &Vocabulary,
) -> (Vec<SkillMatch>, Vec<SkillMismatch>) {
    let mut matches = Vec::new();
    let mut mismatches = Vec::new();

    for skill in claimed_skills {
        let skill_lower = skill.to_lowercase();
        let display = title_case(&skill_lower);

        if repo_languages.contains(&skill_lower) {
            let count = primary_language_counts.get(&display).copied().unwrap_or(0);
            matches.push(SkillMatch {
                skill: display.clone(),
                evidence: format!("Found {count} repos with {display}"),
            });
        } else if let Some(expected) = vocabulary.expected_languages(&skill_lower) {
            if expected.iter().any(|lang| repo_languages.contains(lang)) {
                matches.push(SkillMatch {
                    skill: display,
                    evidence: format!("Found related language ({})", expected.join(", ")),
                });
            } else {
                mismatches.push(SkillMismatch {
                    skill: display.clone(),
                    message: format!(
                        "Claims '{display}' but no {} repos found",
                        expected.join("/")
                    ),
                });
            }
        } else if vocabulary.is_known_language(&skill_lower) {
            mismatches.push(SkillMismatch {
                skill: display.clone(),
                message: format!(
                    "Claims '{display}' expertise but no repos with this language"
                ),
            });
        }
    }

    (matches, mismatches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::bundled().unwrap()
    }

    fn langs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn direct_language_match_cites_repo_count() {
        let mut counts = HashMap::new();
        counts.insert("Python".to_string(), 4);
        let (matches, mismatches) = match_skills(
            &langs(&["Python"]),
            &langs(&["python", "html"]),
            &counts,
            &vocab(),
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].evidence, "Found 4 repos with Python");
        assert!(mismatches.is_empty());
    }

    #[test]
    fn framework_matches_through_language_mapping() {
        let (matches, mismatches) = match_skills(
            &langs(&["Django"]),
            &langs(&["python"]),
            &HashMap::new(),
            &vocab(),
        );
        assert_eq!(matches.len(), 1);
        assert!(matches[0].evidence.contains("python"));
        assert!(mismatches.is_empty());
    }

    #[test]
    fn framework_without_expected_language_mismatches() {
        let (matches, mismatches) = match_skills(
            &langs(&["React"]),
            &langs(&["python"]),
            &HashMap::new(),
            &vocab(),
        );
        assert!(matches.is_empty());
        assert_eq!(mismatches.len(), 1);
        assert!(mismatches[0].message.contains("React"));
    }

    #[test]
    fn missing_known_language_mismatches() {
        let (matches, mismatches) = match_skills(
            &langs(&["Rust"]),
            &langs(&["python"]),
            &HashMap::new(),
            &vocab(),
        );
        assert!(matches.is_empty());
        assert_eq!(mismatches.len(), 1);
    }

    #[test]
    fn unrecognized_skill_ignored() {
        let (matches, mismatches) = match_skills(
            &langs(&["Agile"]),
            &langs(&["python"]),
            &HashMap::new(),
            &vocab(),
        );
        assert!(matches.is_empty());
        assert!(mismatches.is_empty());
    }
}
