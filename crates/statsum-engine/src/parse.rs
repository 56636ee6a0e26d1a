//! Turning free-form text into validated datasets and distributions.
//!
//! Ungrouped input is a comma-separated list of numbers. Grouped input is one
//! class interval per line, where each line must contain exactly three
//! numbers: lower bound, upper bound, and frequency. Lines with any other
//! number count (blank lines, headers, separators) are skipped silently.

use crate::{ClassInterval, Dataset, GroupedDistribution};

/// Failure to turn input text into a dataset or distribution.
///
/// Every variant carries the offending token or bounds so callers can render
/// a precise message.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    /// A comma-separated token did not parse as a number.
    #[display("invalid numeric token '{token}'")]
    InvalidToken { token: String },
    /// The input contained no data at all.
    #[display("input contains no data")]
    EmptyInput,
    /// No line of the grouped input yielded a valid class interval.
    #[display("input contains no valid class-interval lines")]
    NoValidLines,
    /// A class interval's upper bound was not above its lower bound.
    #[display("class interval {lower} - {upper} has upper bound not above lower bound")]
    InvertedInterval { lower: f64, upper: f64 },
    /// A class interval overlaps the one before it.
    #[display("class interval {lower} - {upper} overlaps the preceding interval")]
    OverlappingInterval { lower: f64, upper: f64 },
}

/// Parses comma-separated raw observations into a sorted [`Dataset`].
///
/// Tokens are trimmed before conversion. Any non-numeric token fails the
/// whole dataset; there is no missing-value sentinel.
///
/// # Errors
///
/// [`ParseError::EmptyInput`] for blank input, [`ParseError::InvalidToken`]
/// for the first token that is not a valid number.
///
/// # Examples
///
/// ```
/// use statsum_engine::{ParseError, parse_ungrouped};
///
/// let data = parse_ungrouped("6, 2, 10, 4, 8").unwrap();
/// assert_eq!(data.values(), &[2.0, 4.0, 6.0, 8.0, 10.0]);
///
/// let err = parse_ungrouped("2, four, 6").unwrap_err();
/// assert_eq!(
///     err,
///     ParseError::InvalidToken {
///         token: "four".to_string()
///     }
/// );
/// ```
pub fn parse_ungrouped(text: &str) -> Result<Dataset, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let values = text
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<f64>().map_err(|_| ParseError::InvalidToken {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Dataset::new(values).map_err(|_| ParseError::EmptyInput)
}

/// Parses grouped class-interval lines into a [`GroupedDistribution`].
///
/// Each line is scanned for unsigned numeric substrings, so separators like
/// `11.5 – 11.9` never read as negative numbers. A line is accepted only when
/// it yields exactly three numbers (`lower`, `upper`, `frequency`); any other
/// count skips the line silently. Frequencies are truncated to non-negative
/// integers. Accepted intervals are validated: inverted bounds and overlaps
/// are errors, not silently carried forward.
///
/// # Errors
///
/// [`ParseError::NoValidLines`] when no line is accepted;
/// [`ParseError::InvertedInterval`] / [`ParseError::OverlappingInterval`]
/// when accepted intervals are inconsistent.
///
/// # Examples
///
/// ```
/// use statsum_engine::parse_grouped;
///
/// let dist = parse_grouped("class ranges\n11.5 – 11.9 6\n12.0 – 12.4 14\n").unwrap();
/// let intervals = dist.intervals();
/// assert_eq!(intervals.len(), 2);
/// assert_eq!(intervals[0].frequency, 6);
/// assert_eq!(dist.total_frequency(), 20);
/// ```
pub fn parse_grouped(text: &str) -> Result<GroupedDistribution, ParseError> {
    let mut intervals = Vec::new();
    for line in text.lines() {
        let numbers = extract_numbers(line);
        let &[lower, upper, frequency] = numbers.as_slice() else {
            continue;
        };
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let frequency = frequency.trunc() as u64;
        intervals.push(ClassInterval::new(lower, upper, frequency)?);
    }
    GroupedDistribution::new(intervals)
}

/// Extracts every unsigned integer or decimal substring from `line`, in
/// order of appearance.
fn extract_numbers(line: &str) -> Vec<f64> {
    let mut numbers = Vec::new();
    let mut chars = line.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if !c.is_ascii_digit() {
            continue;
        }
        let mut end = start + c.len_utf8();
        let mut seen_dot = false;
        while let Some(&(idx, next)) = chars.peek() {
            if next.is_ascii_digit() || (next == '.' && !seen_dot) {
                seen_dot |= next == '.';
                end = idx + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        if let Ok(value) = line[start..end].trim_end_matches('.').parse::<f64>() {
            numbers.push(value);
        }
    }
    numbers
}
