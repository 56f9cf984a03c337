//! Pool Parser
//!
//! Turns free text like `"1-10, 15, 20-25"` into a flat list of integers.
//! Malformed parts never fail the parse; they are collected in
//! [`ParseOutcome::skipped`] so callers can report or assert on them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a range whose start is greater than its end (`"7-6"`) is handled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Contributes nothing and is not reported
    #[default]
    Empty,
    /// Enumerates from start down to end
    Descending,
    /// Treated as malformed and reported as skipped
    Reject,
}

impl RangePolicy {
    /// Parse a policy name (for env/config overrides)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "empty" => Some(Self::Empty),
            "descending" | "desc" => Some(Self::Descending),
            "reject" | "malformed" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Why a part of the input contributed nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Nothing between two commas
    Blank,
    /// Not an integer and not a range
    NotANumber,
    /// Contains `-` but isn't `start-end` with two integer bounds
    MalformedRange,
    /// `start > end` under [`RangePolicy::Reject`]
    DescendingRange,
    /// Would expand past the configured `max_range_len` cap
    RangeTooLarge,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Blank => "blank",
            Self::NotANumber => "not a number",
            Self::MalformedRange => "malformed range",
            Self::DescendingRange => "descending range",
            Self::RangeTooLarge => "range too large",
        };
        f.write_str(label)
    }
}

/// A part of the input that was dropped
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedToken {
    /// The trimmed text of the part
    pub token: String,
    /// Why it was dropped
    pub reason: SkipReason,
}

/// Result of parsing pool text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Values in input order, duplicates kept
    pub numbers: Vec<i64>,
    /// Parts that contributed nothing
    pub skipped: Vec<SkippedToken>,
}

impl ParseOutcome {
    /// Whether no numbers were produced
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Parser settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Handling of `start > end`
    pub range_policy: RangePolicy,
    /// Largest number of values a single range may produce; `None` expands
    /// every well-formed range
    pub max_range_len: Option<u64>,
}

impl ParserConfig {
    fn exceeds_cap(&self, lo: i64, hi: i64) -> bool {
        self.max_range_len.is_some_and(|max| span(lo, hi) > max)
    }
}

/// Parse with default settings
#[must_use]
pub fn parse(text: &str) -> ParseOutcome {
    parse_with(text, &ParserConfig::default())
}

/// Parse comma-separated integers and inclusive `start-end` ranges
#[must_use]
pub fn parse_with(text: &str, config: &ParserConfig) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for part in text.split(',').map(str::trim) {
        let skip = if part.contains('-') {
            parse_range(part, config, &mut outcome.numbers)
        } else if part.is_empty() {
            Some(SkipReason::Blank)
        } else {
            match part.parse::<i64>() {
                Ok(n) => {
                    outcome.numbers.push(n);
                    None
                }
                Err(_) => Some(SkipReason::NotANumber),
            }
        };

        if let Some(reason) = skip {
            outcome.skipped.push(SkippedToken {
                token: part.to_string(),
                reason,
            });
        }
    }

    outcome
}

/// Expand one `start-end` part into `out`, or say why it was skipped
fn parse_range(part: &str, config: &ParserConfig, out: &mut Vec<i64>) -> Option<SkipReason> {
    let mut bounds = part.split('-');
    let (Some(start), Some(end), None) = (bounds.next(), bounds.next(), bounds.next()) else {
        return Some(SkipReason::MalformedRange);
    };
    let (Ok(start), Ok(end)) = (start.trim().parse::<i64>(), end.trim().parse::<i64>()) else {
        return Some(SkipReason::MalformedRange);
    };

    if start > end {
        return match config.range_policy {
            RangePolicy::Empty => None,
            RangePolicy::Reject => Some(SkipReason::DescendingRange),
            RangePolicy::Descending => {
                if config.exceeds_cap(end, start) {
                    return Some(SkipReason::RangeTooLarge);
                }
                out.extend((end..=start).rev());
                None
            }
        };
    }

    if config.exceeds_cap(start, end) {
        return Some(SkipReason::RangeTooLarge);
    }
    out.extend(start..=end);
    None
}

/// Number of values in `lo..=hi` (saturating)
fn span(lo: i64, hi: i64) -> u64 {
    hi.abs_diff(lo).saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reasons(outcome: &ParseOutcome) -> Vec<(&str, SkipReason)> {
        outcome
            .skipped
            .iter()
            .map(|s| (s.token.as_str(), s.reason))
            .collect()
    }

    #[test]
    fn test_literals_and_ranges() {
        let outcome = parse("1-3, 5 ,10-12");
        assert_eq!(outcome.numbers, vec![1, 2, 3, 5, 10, 11, 12]);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_malformed_tokens_are_dropped_and_reported() {
        let outcome = parse("1-3,5,x,7-6");
        assert_eq!(outcome.numbers, vec![1, 2, 3, 5]);
        assert_eq!(reasons(&outcome), vec![("x", SkipReason::NotANumber)]);
    }

    #[test]
    fn test_descending_policy_enumerates_down() {
        let config = ParserConfig {
            range_policy: RangePolicy::Descending,
            ..ParserConfig::default()
        };
        let outcome = parse_with("1-3,5,x,7-6", &config);
        assert_eq!(outcome.numbers, vec![1, 2, 3, 5, 7, 6]);
    }

    #[test]
    fn test_reject_policy_reports_descending() {
        let config = ParserConfig {
            range_policy: RangePolicy::Reject,
            ..ParserConfig::default()
        };
        let outcome = parse_with("7-6,2", &config);
        assert_eq!(outcome.numbers, vec![2]);
        assert_eq!(reasons(&outcome), vec![("7-6", SkipReason::DescendingRange)]);
    }

    #[test]
    fn test_malformed_ranges() {
        let outcome = parse("-5,1-2-3,3-,a-4, 4 - 6 ");
        assert_eq!(outcome.numbers, vec![4, 5, 6]);
        assert_eq!(
            reasons(&outcome),
            vec![
                ("-5", SkipReason::MalformedRange),
                ("1-2-3", SkipReason::MalformedRange),
                ("3-", SkipReason::MalformedRange),
                ("a-4", SkipReason::MalformedRange),
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let outcome = parse("7,7,1-2,2");
        assert_eq!(outcome.numbers, vec![7, 7, 1, 2, 2]);
    }

    #[test]
    fn test_blank_input_yields_empty() {
        let outcome = parse("   ");
        assert!(outcome.is_empty());
        assert_eq!(reasons(&outcome), vec![("", SkipReason::Blank)]);

        let outcome = parse("4,");
        assert_eq!(outcome.numbers, vec![4]);
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn test_oversized_range_is_skipped() {
        let config = ParserConfig {
            max_range_len: Some(10),
            ..ParserConfig::default()
        };
        let outcome = parse_with("1-10,1-11", &config);
        assert_eq!(outcome.numbers.len(), 10);
        assert_eq!(reasons(&outcome), vec![("1-11", SkipReason::RangeTooLarge)]);
    }

    #[test]
    fn test_large_range_expands_without_cap() {
        let outcome = parse("1-100001");
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.numbers.len(), 100_001);
        assert_eq!(outcome.numbers.last(), Some(&100_001));
    }

    #[test]
    fn test_single_value_range() {
        assert_eq!(parse("4-4").numbers, vec![4]);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(RangePolicy::from_name("Descending"), Some(RangePolicy::Descending));
        assert_eq!(RangePolicy::from_name(" empty "), Some(RangePolicy::Empty));
        assert_eq!(RangePolicy::from_name("reject"), Some(RangePolicy::Reject));
        assert_eq!(RangePolicy::from_name("sideways"), None);
    }
}
