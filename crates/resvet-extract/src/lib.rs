//! Resume document text extraction and rule-based entity extraction.
//!
//! Turns PDF/DOCX bytes into a cleaned text blob (body text, table text, and
//! embedded hyperlink URLs appended at the end), then applies pattern
//! libraries — optionally augmented by a pluggable named-entity tagger — to
//! recover a structured [`ParsedResume`].

pub mod document;
pub mod error;
pub mod extractor;
pub mod ner;
pub mod types;

mod companies;
mod contact;
mod education;
mod experience;
mod name;
mod sections;
mod skills;

pub use document::{clean_text, extract_document_text, DocumentKind};
pub use error::ExtractError;
pub use extractor::ResumeExtractor;
pub use ner::{EntityLabel, EntitySpan, EntityTagger};
pub use types::{EducationEntry, ParsedResume, ResumeUrls, TotalExperience};

/// Truncate a string to at most `max_chars` characters on a char boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
