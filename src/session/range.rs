//! Parsing of range restriction input.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// A range restriction that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Bounds fall outside the loaded items or are reversed.
    #[error("Invalid range {start}..{end}: items are numbered 1 to {len}")]
    OutOfBounds {
        /// Requested first item (one-based).
        start: i64,
        /// Requested last item (one-based).
        end: i64,
        /// Number of loaded items.
        len: usize,
    },
    /// Input was not an integer.
    #[error("Enter valid item numbers (got '{0}')")]
    NotANumber(String),
}

/// `7`, `2-5`, `2..5`, `2..=5`, `2:5`
static RANGE_EXPR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*(?:(?:\.\.=?|-|:)\s*(\d+))?\s*$")
        .unwrap_or_else(|e| panic!("Invalid range regex: {e}"))
});

fn parse_bound(input: &str) -> Result<i64, RangeError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| RangeError::NotANumber(trimmed.to_string()))
}

/// Parse the two fields of the range form.
///
/// # Errors
///
/// Returns `RangeError::NotANumber` for the first field that is not an integer.
pub fn parse_range_inputs(start: &str, end: &str) -> Result<(i64, i64), RangeError> {
    Ok((parse_bound(start)?, parse_bound(end)?))
}

/// Parse a single range expression such as `2-5`.
///
/// A lone number selects exactly that item. Bounds are not checked against
/// any item list here.
///
/// # Errors
///
/// Returns `RangeError::NotANumber` if the expression is malformed.
pub fn parse_range_expr(expr: &str) -> Result<(i64, i64), RangeError> {
    let caps = RANGE_EXPR
        .captures(expr)
        .ok_or_else(|| RangeError::NotANumber(expr.trim().to_string()))?;

    let start = parse_bound(&caps[1])?;
    let end = match caps.get(2) {
        Some(m) => parse_bound(m.as_str())?,
        None => start,
    };
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inputs() {
        assert_eq!(parse_range_inputs("2", "3"), Ok((2, 3)));
        assert_eq!(parse_range_inputs(" 10 ", "12\n"), Ok((10, 12)));
        assert_eq!(parse_range_inputs("-1", "3"), Ok((-1, 3)));
    }

    #[test]
    fn test_parse_inputs_not_a_number() {
        assert_eq!(
            parse_range_inputs("two", "3"),
            Err(RangeError::NotANumber("two".to_string()))
        );
        assert_eq!(
            parse_range_inputs("1", ""),
            Err(RangeError::NotANumber(String::new()))
        );
        assert_eq!(
            parse_range_inputs("1.5", "3"),
            Err(RangeError::NotANumber("1.5".to_string()))
        );
    }

    #[test]
    fn test_parse_expr_forms() {
        assert_eq!(parse_range_expr("2-5"), Ok((2, 5)));
        assert_eq!(parse_range_expr("2..5"), Ok((2, 5)));
        assert_eq!(parse_range_expr("2..=5"), Ok((2, 5)));
        assert_eq!(parse_range_expr("2:5"), Ok((2, 5)));
        assert_eq!(parse_range_expr(" 3 - 4 "), Ok((3, 4)));
        assert_eq!(parse_range_expr("7"), Ok((7, 7)));
    }

    #[test]
    fn test_parse_expr_rejects_garbage() {
        assert!(matches!(parse_range_expr("a-b"), Err(RangeError::NotANumber(_))));
        assert!(matches!(parse_range_expr("1-"), Err(RangeError::NotANumber(_))));
        assert!(matches!(parse_range_expr(""), Err(RangeError::NotANumber(_))));
        assert!(matches!(
            parse_range_expr("99999999999999999999"),
            Err(RangeError::NotANumber(_))
        ));
    }

    #[test]
    fn test_reversed_expr_is_left_to_session() {
        assert_eq!(parse_range_expr("5-2"), Ok((5, 2)));
    }
}
