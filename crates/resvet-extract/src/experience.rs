//! Date-range mining and total-experience arithmetic.
//!
//! Month-name ranges are the primary signal; bare year ranges are a
//! fallback used only when no month-name range parsed. Overlapping
//! ranges are summed as-is.

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;

use crate::types::TotalExperience;

const MONTH_NAMES: &str = r"Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?";

pub(crate) struct ExperiencePatterns {
    month_range: Regex,
    slash_range: Regex,
    year_range: Regex,
}

impl ExperiencePatterns {
    pub(crate) fn new() -> Self {
        let month_range = format!(
            r"(?i)({MONTH_NAMES})\s+(\d{{4}})\s*[-–—]\s*(Present|Current|Now|({MONTH_NAMES})\s+(\d{{4}}))"
        );
        Self {
            month_range: Regex::new(&month_range).expect("valid regex"),
            slash_range: Regex::new(r"(?i)(\d{1,2}/\d{4})\s*[-–—]\s*(Present|Current|\d{1,2}/\d{4})")
                .expect("valid regex"),
            year_range: Regex::new(r"(?i)(\d{4})\s*[-–—]\s*(Present|Current|\d{4})")
                .expect("valid regex"),
        }
    }

    /// Every raw date-range mention in the text, in all three shapes.
    pub(crate) fn date_range_mentions(&self, text: &str) -> Vec<String> {
        let mut mentions = Vec::new();
        for captures in self.month_range.captures_iter(text) {
            mentions.push(format!("{} {} {}", &captures[1], &captures[2], &captures[3]));
        }
        for captures in self.slash_range.captures_iter(text) {
            mentions.push(format!("{} {}", &captures[1], &captures[2]));
        }
        for captures in self.year_range.captures_iter(text) {
            mentions.push(format!("{} {}", &captures[1], &captures[2]));
        }
        mentions
    }

    /// Sum month-name ranges, falling back to bare year ranges when none
    /// parsed. `now` resolves open-ended ranges.
    pub(crate) fn total_experience(&self, text: &str, now: DateTime<Utc>) -> TotalExperience {
        let mut range_months: Vec<u32> = Vec::new();

        for captures in self.month_range.captures_iter(text) {
            let Some(start_month) = month_number(&captures[1]) else {
                continue;
            };
            let Ok(start_year) = captures[2].parse::<i32>() else {
                continue;
            };

            let (end_month, end_year) = if is_open_ended(&captures[3]) {
                (now.month(), now.year())
            } else {
                let (Some(month), Some(year)) = (captures.get(4), captures.get(5)) else {
                    continue;
                };
                let Some(end_month) = month_number(month.as_str()) else {
                    continue;
                };
                let Ok(end_year) = year.as_str().parse::<i32>() else {
                    continue;
                };
                (end_month, end_year)
            };

            let months = (end_year - start_year) * 12 + end_month as i32 - start_month as i32;
            if months > 0 {
                range_months.push(months as u32);
            }
        }

        if range_months.is_empty() {
            for captures in self.year_range.captures_iter(text) {
                let Ok(start_year) = captures[1].parse::<i32>() else {
                    continue;
                };
                let end_year = if is_open_ended(&captures[2]) {
                    now.year()
                } else {
                    match captures[2].parse::<i32>() {
                        Ok(year) => year,
                        Err(_) => continue,
                    }
                };
                if end_year >= start_year && end_year <= now.year() + 1 {
                    range_months.push(((end_year - start_year) * 12) as u32);
                }
            }
        }

        let total_months: u32 = range_months.iter().sum();
        let years = total_months / 12;
        let months = total_months % 12;
        let experience_text = if months > 0 {
            format!("{years} years {months} months")
        } else {
            format!("{years} years")
        };

        TotalExperience {
            total_years: years,
            total_months_remainder: months,
            total_months_raw: total_months,
            experience_text,
            date_ranges_found: range_months.len(),
        }
    }
}

fn is_open_ended(end: &str) -> bool {
    matches!(
        end.to_lowercase().as_str(),
        "present" | "current" | "now"
    )
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn month_range_duration() {
        let totals = ExperiencePatterns::new()
            .total_experience("Jan 2020 - Mar 2022", at(2024, 6));
        assert_eq!(totals.total_months_raw, 26);
        assert_eq!(totals.total_years, 2);
        assert_eq!(totals.total_months_remainder, 2);
        assert_eq!(totals.experience_text, "2 years 2 months");
        assert_eq!(totals.date_ranges_found, 1);
    }

    #[test]
    fn present_resolves_against_reference_time() {
        let totals = ExperiencePatterns::new()
            .total_experience("June 2023 - Present", at(2024, 6));
        assert_eq!(totals.total_months_raw, 12);
        assert_eq!(totals.experience_text, "1 years");
    }

    #[test]
    fn overlapping_ranges_both_count() {
        let text = "Jan 2020 - Jan 2021\nJun 2020 - Jun 2021";
        let totals = ExperiencePatterns::new().total_experience(text, at(2024, 6));
        assert_eq!(totals.total_months_raw, 24);
        assert_eq!(totals.date_ranges_found, 2);
    }

    #[test]
    fn reversed_range_is_dropped() {
        let totals = ExperiencePatterns::new()
            .total_experience("Mar 2022 - Jan 2020", at(2024, 6));
        assert_eq!(totals.total_months_raw, 0);
        assert_eq!(totals.date_ranges_found, 0);
        assert_eq!(totals.experience_text, "0 years");
    }

    #[test]
    fn year_fallback_only_without_month_ranges() {
        let text = "2018 - 2020 at one place\nJan 2021 - Jan 2022 at another";
        let totals = ExperiencePatterns::new().total_experience(text, at(2024, 6));
        // Month-name range wins; the bare year range is ignored.
        assert_eq!(totals.total_months_raw, 12);
        assert_eq!(totals.date_ranges_found, 1);
    }

    #[test]
    fn year_fallback_rejects_far_future_end() {
        let totals = ExperiencePatterns::new()
            .total_experience("2018 - 2099", at(2024, 6));
        assert_eq!(totals.total_months_raw, 0);
    }

    #[test]
    fn mentions_capture_all_three_shapes() {
        let text = "Jan 2020 - Mar 2021\n03/2021 - Present\n2015 - 2017";
        let mentions = ExperiencePatterns::new().date_range_mentions(text);
        assert!(mentions.contains(&"Jan 2020 Mar 2021".to_string()));
        assert!(mentions.contains(&"03/2021 Present".to_string()));
        assert!(mentions.contains(&"2015 2017".to_string()));
    }
}
