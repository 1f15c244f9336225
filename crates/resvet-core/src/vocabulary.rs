use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default vocabulary shipped with the repository.
const BUNDLED_VOCABULARY: &str = include_str!("../../../config/vocabulary.yaml");

/// Fixed-vocabulary lookup data for entity extraction and skill matching.
///
/// Loaded once at startup from YAML; all entries are lowercased on load so
/// matching code never has to normalize twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub job_titles: Vec<String>,
    pub tech_skills: Vec<String>,
    pub degrees: Vec<String>,
    pub fields_of_study: Vec<String>,
    pub senior_title_markers: Vec<String>,
    pub known_languages: Vec<String>,
    /// Framework/tool name mapped to the repository languages that evidence it.
    pub skill_languages: BTreeMap<String, Vec<String>>,
}

impl Vocabulary {
    /// Load and validate a vocabulary from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VocabularyIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse the vocabulary bundled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the bundled file fails to parse or validate;
    /// that indicates a broken build rather than a runtime condition.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_yaml(BUNDLED_VOCABULARY)
    }

    fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut vocabulary: Vocabulary = serde_yaml::from_str(content)?;
        vocabulary.normalize();
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Expected repository languages for a framework/tool skill, if mapped.
    #[must_use]
    pub fn expected_languages(&self, skill: &str) -> Option<&[String]> {
        self.skill_languages
            .get(&skill.to_lowercase())
            .map(Vec::as_slice)
    }

    /// Whether a skill name is itself a repository language.
    #[must_use]
    pub fn is_known_language(&self, skill: &str) -> bool {
        let lower = skill.to_lowercase();
        self.known_languages.iter().any(|l| *l == lower)
    }

    fn normalize(&mut self) {
        for list in [
            &mut self.job_titles,
            &mut self.tech_skills,
            &mut self.degrees,
            &mut self.fields_of_study,
            &mut self.senior_title_markers,
            &mut self.known_languages,
        ] {
            for entry in list.iter_mut() {
                *entry = entry.trim().to_lowercase();
            }
        }
        self.skill_languages = self
            .skill_languages
            .iter()
            .map(|(skill, langs)| {
                (
                    skill.trim().to_lowercase(),
                    langs.iter().map(|l| l.trim().to_lowercase()).collect(),
                )
            })
            .collect();
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let lists: [(&str, &Vec<String>); 6] = [
            ("job_titles", &self.job_titles),
            ("tech_skills", &self.tech_skills),
            ("degrees", &self.degrees),
            ("fields_of_study", &self.fields_of_study),
            ("senior_title_markers", &self.senior_title_markers),
            ("known_languages", &self.known_languages),
        ];
        for (name, list) in lists {
            if list.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "vocabulary list '{name}' must not be empty"
                )));
            }
            if list.iter().any(String::is_empty) {
                return Err(ConfigError::Validation(format!(
                    "vocabulary list '{name}' contains a blank entry"
                )));
            }
        }
        for (skill, langs) in &self.skill_languages {
            if skill.is_empty() || langs.is_empty() {
                return Err(ConfigError::Validation(
                    "skill_languages entries must have a name and at least one language"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_vocabulary_parses() {
        let vocabulary = Vocabulary::bundled().unwrap();
        assert!(vocabulary.job_titles.contains(&"software engineer".into()));
        assert!(vocabulary.tech_skills.contains(&"node.js".into()));
        assert!(vocabulary.degrees.contains(&"b.tech".into()));
    }

    #[test]
    fn entries_are_lowercased() {
        let vocabulary = Vocabulary::from_yaml(
            "job_titles: [\"Software Engineer\"]\n\
             tech_skills: [Python]\n\
             degrees: [BS]\n\
             fields_of_study: [\"Computer Science\"]\n\
             senior_title_markers: [Senior]\n\
             known_languages: [Python]\n\
             skill_languages: {Django: [Python]}\n",
        )
        .unwrap();
        assert_eq!(vocabulary.job_titles, vec!["software engineer"]);
        assert_eq!(
            vocabulary.expected_languages("DJANGO"),
            Some(&["python".to_string()][..])
        );
    }

    #[test]
    fn empty_list_fails_validation() {
        let result = Vocabulary::from_yaml(
            "job_titles: []\n\
             tech_skills: [python]\n\
             degrees: [bs]\n\
             fields_of_study: [computer science]\n\
             senior_title_markers: [senior]\n\
             known_languages: [python]\n\
             skill_languages: {}\n",
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn known_language_lookup_is_case_insensitive() {
        let vocabulary = Vocabulary::bundled().unwrap();
        assert!(vocabulary.is_known_language("Python"));
        assert!(vocabulary.is_known_language("RUST"));
        assert!(!vocabulary.is_known_language("cobol"));
    }

    #[test]
    fn framework_map_covers_spec_examples() {
        let vocabulary = Vocabulary::bundled().unwrap();
        let react = vocabulary.expected_languages("react").unwrap();
        assert!(react.contains(&"javascript".to_string()));
        let django = vocabulary.expected_languages("django").unwrap();
        assert_eq!(django, &["python".to_string()][..]);
    }
}
