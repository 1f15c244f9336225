//! Resume section isolation.
//!
//! Heuristics that must only look at one section (employers in the work
//! history, degrees in the education block) slice it out by locating a
//! section header and the next known header after it. When no header is
//! found the full text is used and the caller's filters do the work.

use regex::Regex;

pub(crate) struct SectionPatterns {
    experience_header: Regex,
    experience_next: Regex,
    education_header: Regex,
    education_next: Regex,
}

impl SectionPatterns {
    pub(crate) fn new() -> Self {
        Self {
            experience_header: Regex::new(
                r"(?i)(?:work\s*experience|professional\s*experience|experience|employment|work\s*history)[ \t:]*\n",
            )
            .expect("valid regex"),
            experience_next: Regex::new(
                r"(?i)\n(?:education|skills|projects|certifications|achievements|awards|references|interests)",
            )
            .expect("valid regex"),
            education_header: Regex::new(r"(?i)education|academic|qualification|degree")
                .expect("valid regex"),
            education_next: Regex::new(
                r"(?i)\n(?:experience|work|employment|skill|project|certification)",
            )
            .expect("valid regex"),
        }
    }

    /// Slice of `text` holding the work-experience section, or all of `text`
    /// when no header is found.
    pub(crate) fn experience_section<'a>(&self, text: &'a str) -> &'a str {
        let Some(header) = self.experience_header.find(text) else {
            return text;
        };
        let rest = &text[header.end()..];
        match self.experience_next.find(rest) {
            Some(next) => &rest[..next.start()],
            None => rest,
        }
    }

    /// Slice of `text` from the education header onward, ending at the next
    /// known section. Falls back to all of `text`. Includes the header line
    /// itself so degree labels on it are captured.
    pub(crate) fn education_section<'a>(&self, text: &'a str) -> &'a str {
        let Some(header) = self.education_header.find(text) else {
            return text;
        };
        let rest = &text[header.start()..];
        match self.education_next.find(rest) {
            Some(next) => &rest[..next.start()],
            None => rest,
        }
    }
}
