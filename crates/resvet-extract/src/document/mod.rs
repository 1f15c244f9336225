//! Document text extraction for PDF and DOCX resumes.
//!
//! Output layout is fixed: body text, then table text, then embedded
//! hyperlink URLs appended as bare strings, so the URL regex downstream
//! finds links even when the visible text omits them. Sub-step failures
//! (one page, one table, one annotation) are logged and omitted; only a
//! document that yields no text at all is an error.

mod docx;
mod pdf;

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ExtractError;

/// Declared type of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl FromStr for DocumentKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            other => Err(ExtractError::UnsupportedType(other.to_string())),
        }
    }
}

/// Extract best-effort plain text from a document.
///
/// # Errors
///
/// Returns [`ExtractError::Unparsable`] when the document yields no text
/// (image-only PDFs do, by design — there is no OCR), or a format error when
/// the container itself cannot be opened.
pub fn extract_document_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::Pdf => pdf::extract_text(bytes)?,
        DocumentKind::Docx => docx::extract_text(bytes)?,
    };
    if text.trim().is_empty() {
        return Err(ExtractError::Unparsable);
    }
    Ok(text)
}

/// Strip bullet glyphs and collapse whitespace while preserving line
/// structure.
#[must_use]
pub fn clean_text(text: &str) -> String {
    static BULLETS: OnceLock<Regex> = OnceLock::new();
    static SPACES: OnceLock<Regex> = OnceLock::new();
    static BLANK_LINES: OnceLock<Regex> = OnceLock::new();

    let bullets = BULLETS.get_or_init(|| {
        Regex::new("[\u{2022}\u{2023}\u{25E6}\u{2043}\u{2219}\u{25CF}\u{25CB}\u{25A0}\u{25A1}\u{2610}\u{2611}\u{2612}]")
            .expect("valid regex")
    });
    let spaces = SPACES.get_or_init(|| Regex::new(r"[ \t]+").expect("valid regex"));
    let blank_lines = BLANK_LINES.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid regex"));

    let text = bullets.replace_all(text, "");
    let text = spaces.replace_all(&text, " ");
    let text = blank_lines.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Join body text, table text, and hyperlink URLs in the contract order.
pub(crate) fn assemble(body: &str, tables: &str, links: &[String]) -> String {
    let mut out = String::with_capacity(body.len() + tables.len() + 64);
    out.push_str(body);
    if !tables.trim().is_empty() {
        out.push('\n');
        out.push_str(tables);
    }
    if !links.is_empty() {
        out.push('\n');
        out.push_str(&links.join(" "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_kind_parses_case_insensitively() {
        assert_eq!(DocumentKind::from_str("PDF").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_str("docx").unwrap(), DocumentKind::Docx);
        assert!(DocumentKind::from_str("rtf").is_err());
    }

    #[test]
    fn clean_text_strips_bullets_and_collapses_whitespace() {
        let raw = "\u{2022} Python\t\tDjango\n\n\n\u{25CF} Rust";
        assert_eq!(clean_text(raw), "Python Django\n Rust");
    }

    #[test]
    fn clean_text_preserves_single_newlines() {
        let raw = "Jane Doe\nSoftware Engineer";
        assert_eq!(clean_text(raw), "Jane Doe\nSoftware Engineer");
    }

    #[test]
    fn assemble_appends_links_last() {
        let out = assemble("body", "tables", &["https://github.com/x".to_string()]);
        assert_eq!(out, "body\ntables\nhttps://github.com/x");
    }

    #[test]
    fn assemble_skips_empty_tables() {
        let out = assemble("body", " ", &[]);
        assert_eq!(out, "body");
    }
}
