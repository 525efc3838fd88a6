// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Regex-driven extraction of `yyyy-MM-dd` dates.
//!
//! Scanning is global and non-overlapping: after an accepted candidate the scan
//! resumes at the candidate's end. Candidates that structurally match but name
//! no real day (month 13, April 31st, February 29th of a common year) are
//! skipped silently.

use std::iter::FusedIterator;
use std::ops::Range;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Bare date shape. ASCII digits only; `\d` would also admit other scripts.
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid date pattern"));

/// Date shape anchored on word boundaries on both sides.
static WORD_BOUNDED_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{4}-[0-9]{2}-[0-9]{2}\b").expect("valid date pattern"));

/// How a date token must be delimited from the text around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// The token is preceded and followed by whitespace or the start/end of the text.
    /// `(2024-01-01)` and `2024-01-01-extra` are rejected.
    #[default]
    Whitespace,
    /// The characters next to the token, if any, are not word characters.
    /// `(2024-01-01)` is accepted, and so is the leading date of `2024-01-01-02`.
    WordBoundary,
}

/// A span of text shaped like a date, before calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateMatch<'t> {
    /// The matched text
    pub text: &'t str,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

/// A real calendar date found in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatedDate {
    /// The calendar date
    pub date: NaiveDate,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl ValidatedDate {
    /// Returns the byte range of the source text.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Parses a `yyyy-MM-dd` token into a calendar date.
///
/// Returns `None` for anything that is not exactly that shape or does not name
/// a real day, including February 29th outside leap years.
pub fn parse_date(token: &str) -> Option<NaiveDate> {
    let bytes = token.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let year: i32 = token[0..4].parse().ok()?;
    let month: u32 = token[5..7].parse().ok()?;
    let day: u32 = token[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Finds dates in text according to a [`BoundaryPolicy`].
///
/// The extractor is stateless; every call re-scans the input from the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor {
    policy: BoundaryPolicy,
}

impl DateExtractor {
    /// Creates an extractor using the given boundary policy.
    pub fn new(policy: BoundaryPolicy) -> Self {
        Self { policy }
    }

    /// Returns the boundary policy in use.
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Returns every date-shaped, correctly delimited span, left to right.
    pub fn candidates<'t>(&self, text: &'t str) -> Candidates<'t> {
        let pattern = match self.policy {
            BoundaryPolicy::Whitespace => &*DATE_PATTERN,
            BoundaryPolicy::WordBoundary => &*WORD_BOUNDED_DATE_PATTERN,
        };
        Candidates {
            pattern,
            policy: self.policy,
            text,
            position: 0,
        }
    }

    /// Returns every valid calendar date, left to right.
    pub fn extract<'t>(&self, text: &'t str) -> DateMatches<'t> {
        DateMatches {
            candidates: self.candidates(text),
        }
    }
}

/// Iterator over [`CandidateMatch`]es, see [`DateExtractor::candidates`].
#[derive(Debug, Clone)]
pub struct Candidates<'t> {
    pattern: &'static Regex,
    policy: BoundaryPolicy,
    text: &'t str,
    position: usize,
}

impl<'t> Iterator for Candidates<'t> {
    type Item = CandidateMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position <= self.text.len() {
            let found = self.pattern.find_at(self.text, self.position)?;
            let (start, end) = (found.start(), found.end());

            if self.policy == BoundaryPolicy::Whitespace && !is_whitespace_delimited(self.text, start, end) {
                // The regex engine has no lookaround. Retry one character later so
                // a delimited token overlapping this one is still found.
                self.position = start + 1;
                continue;
            }

            self.position = end;
            return Some(CandidateMatch {
                text: found.as_str(),
                start,
                end,
            });
        }
        None
    }
}

impl FusedIterator for Candidates<'_> {}

/// Iterator over [`ValidatedDate`]s, see [`DateExtractor::extract`].
#[derive(Debug, Clone)]
pub struct DateMatches<'t> {
    candidates: Candidates<'t>,
}

impl Iterator for DateMatches<'_> {
    type Item = ValidatedDate;

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.candidates.by_ref() {
            match parse_date(candidate.text) {
                Some(date) => {
                    return Some(ValidatedDate {
                        date,
                        start: candidate.start,
                        end: candidate.end,
                    });
                }
                None => tracing::trace!(token = candidate.text, start = candidate.start, "skipping invalid date"),
            }
        }
        None
    }
}

impl FusedIterator for DateMatches<'_> {}

fn is_whitespace_delimited(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_none_or(char::is_whitespace) && after.is_none_or(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(policy: BoundaryPolicy, text: &str) -> Vec<(String, usize, usize)> {
        DateExtractor::new(policy)
            .extract(text)
            .map(|d| (d.date.to_string(), d.start, d.end))
            .collect()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-06-15"), Some(ymd(2024, 6, 15)));
        assert_eq!(parse_date("2024-02-29"), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_date("2000-02-29"), Some(ymd(2000, 2, 29)));
        assert_eq!(parse_date("1900-02-29"), None);
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("2024-04-31"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("2024-00-10"), None);
        assert_eq!(parse_date("2024-01-00"), None);
        assert_eq!(parse_date("2024/01/01"), None);
        assert_eq!(parse_date("24-01-01"), None);
    }

    #[test]
    fn test_offsets_and_order() {
        let text = "start 2024-01-05 middle 2023-12-31\nend 2025-07-04";
        assert_eq!(
            dates(BoundaryPolicy::Whitespace, text),
            vec![
                ("2024-01-05".to_string(), 6, 16),
                ("2023-12-31".to_string(), 24, 34),
                ("2025-07-04".to_string(), 39, 49),
            ]
        );
    }

    #[test]
    fn test_invalid_dates_are_skipped() {
        let text = "2024-13-01 2024-02-30 2024-06-15 2023-02-29 2024-04-31";
        assert_eq!(dates(BoundaryPolicy::Whitespace, text), vec![("2024-06-15".to_string(), 22, 32)]);
        assert_eq!(dates(BoundaryPolicy::WordBoundary, text), vec![("2024-06-15".to_string(), 22, 32)]);
    }

    #[test]
    fn test_whitespace_policy() {
        assert_eq!(dates(BoundaryPolicy::Whitespace, "2024-01-01").len(), 1);
        assert_eq!(dates(BoundaryPolicy::Whitespace, "\t2024-01-01\n").len(), 1);
        assert!(dates(BoundaryPolicy::Whitespace, "(2024-01-01)").is_empty());
        assert!(dates(BoundaryPolicy::Whitespace, "2024-01-01-extra").is_empty());
        assert!(dates(BoundaryPolicy::Whitespace, "x2024-01-01").is_empty());
        assert!(dates(BoundaryPolicy::Whitespace, "12024-01-01").is_empty());
        assert!(dates(BoundaryPolicy::Whitespace, "2024-01-01,").is_empty());
    }

    #[test]
    fn test_word_boundary_policy() {
        assert_eq!(dates(BoundaryPolicy::WordBoundary, "(2024-01-01)"), vec![("2024-01-01".to_string(), 1, 11)]);
        assert_eq!(dates(BoundaryPolicy::WordBoundary, "due:2024-01-01.").len(), 1);
        assert!(dates(BoundaryPolicy::WordBoundary, "x2024-01-01").is_empty());
        assert!(dates(BoundaryPolicy::WordBoundary, "2024-01-01_b").is_empty());
        assert!(dates(BoundaryPolicy::WordBoundary, "12024-01-01").is_empty());

        // The leading date of a hyphenated chain is accepted; scanning resumes after it.
        assert_eq!(dates(BoundaryPolicy::WordBoundary, "2023-01-01-02"), vec![("2023-01-01".to_string(), 0, 10)]);
    }

    #[test]
    fn test_adjacent_dates_share_one_space() {
        let text = "2024-01-01 2024-01-02";
        assert_eq!(dates(BoundaryPolicy::Whitespace, text).len(), 2);
        assert_eq!(dates(BoundaryPolicy::WordBoundary, text).len(), 2);
    }

    #[test]
    fn test_rejected_candidate_does_not_hide_later_token() {
        // "1111-11-11-1111-11-11": neither half is whitespace-delimited.
        assert!(dates(BoundaryPolicy::Whitespace, "1111-11-11-1111-11-11").is_empty());
        // A rejected prefix must not swallow the start of a delimited date.
        assert_eq!(dates(BoundaryPolicy::Whitespace, "a2024-01-01 2024-02-02").len(), 1);
    }

    #[test]
    fn test_multibyte_text() {
        let text = "échéance 2024-03-01 ✓";
        let found = dates(BoundaryPolicy::Whitespace, text);
        assert_eq!(found.len(), 1);
        let (_, start, end) = &found[0];
        assert_eq!(&text[*start..*end], "2024-03-01");
    }

    #[test]
    fn test_non_ascii_digits_are_not_dates() {
        assert!(dates(BoundaryPolicy::Whitespace, "٢٠٢٤-٠١-٠١").is_empty());
    }

    #[test]
    fn test_candidates_include_invalid_dates() {
        let extractor = DateExtractor::new(BoundaryPolicy::Whitespace);
        let candidates: Vec<_> = extractor.candidates("2024-13-01 2024-01-01").map(|c| c.text).collect();
        assert_eq!(candidates, vec!["2024-13-01", "2024-01-01"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(dates(BoundaryPolicy::Whitespace, "").is_empty());
        assert!(dates(BoundaryPolicy::WordBoundary, "").is_empty());
    }
}
