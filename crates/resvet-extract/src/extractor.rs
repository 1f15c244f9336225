//! The extraction pipeline: bytes in, [`ParsedResume`] out.

use chrono::{DateTime, Utc};
use resvet_core::vocabulary::Vocabulary;

use crate::companies::CompanyPatterns;
use crate::contact::ContactPatterns;
use crate::document::{clean_text, extract_document_text, DocumentKind};
use crate::education::EducationPatterns;
use crate::error::ExtractError;
use crate::experience::ExperiencePatterns;
use crate::name::NamePatterns;
use crate::ner::EntityTagger;
use crate::sections::SectionPatterns;
use crate::skills::SkillPatterns;
use crate::types::ParsedResume;

/// Holds every compiled pattern library; build once and reuse across
/// documents. All extraction methods are pure given the inputs — the
/// reference time is passed in rather than read from the clock.
pub struct ResumeExtractor {
    vocabulary: Vocabulary,
    sections: SectionPatterns,
    contact: ContactPatterns,
    names: NamePatterns,
    skills: SkillPatterns,
    companies: CompanyPatterns,
    education: EducationPatterns,
    experience: ExperiencePatterns,
}

impl ResumeExtractor {
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            sections: SectionPatterns::new(),
            contact: ContactPatterns::new(),
            names: NamePatterns::new(),
            skills: SkillPatterns::new(&vocabulary),
            companies: CompanyPatterns::new(),
            education: EducationPatterns::new(&vocabulary),
            experience: ExperiencePatterns::new(),
            vocabulary,
        }
    }

    /// Extract text from raw document bytes, clean it, and run the full
    /// entity pass.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError` when the document yields no usable text or
    /// the container itself cannot be read.
    pub fn parse_document(
        &self,
        bytes: &[u8],
        kind: DocumentKind,
        tagger: Option<&dyn EntityTagger>,
        now: DateTime<Utc>,
    ) -> Result<ParsedResume, ExtractError> {
        let text = extract_document_text(bytes, kind)?;
        let cleaned = clean_text(&text);
        if cleaned.trim().is_empty() {
            return Err(ExtractError::Unparsable);
        }
        Ok(self.parse_text(&cleaned, tagger, now))
    }

    /// Run every extractor over already-cleaned text. Infallible: fields
    /// that find nothing come back empty or `None`.
    #[must_use]
    pub fn parse_text(
        &self,
        text: &str,
        tagger: Option<&dyn EntityTagger>,
        now: DateTime<Utc>,
    ) -> ParsedResume {
        let text_lower = text.to_lowercase();
        let experience_section = self.sections.experience_section(text);
        let education_section = self.sections.education_section(&text_lower);

        ParsedResume {
            name: self.names.extract_name(text, tagger),
            email: self.contact.extract_email(text),
            phone: self.contact.extract_phone(text),
            urls: self.contact.extract_urls(text),
            companies: self.companies.extract_companies(experience_section, tagger),
            job_titles: self.skills.extract_job_titles(text),
            skills: self.skills.extract_skills(text),
            education: self
                .education
                .extract_education(education_section, &self.vocabulary, tagger),
            experience_dates: self.experience.date_range_mentions(text),
            total_experience: self.experience.total_experience(text, now),
            raw_text: text.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod extractor_test;
