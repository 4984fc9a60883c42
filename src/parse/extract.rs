//! Numeric token extraction from values that carry units or other noise
//! (`"150.2kbps"`, `"  42 "`).

use std::sync::LazyLock;

use regex::Regex;

use super::ParseError;

static SIGNED_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-]?([0-9]*[.])?[0-9]+").unwrap());

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// First substring of `text` matching `pattern`, if any.
fn first_token<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern.find(text).map(|m| m.as_str())
}

/// Extract the first signed decimal from the value part of a `key: value` line
/// (everything after the first `:`).
pub fn decimal_after_colon(field: &'static str, line: &str) -> Result<f64, ParseError> {
    let Some((_, value)) = line.split_once(':') else {
        return Err(ParseError::malformed("missing ':' separator", line));
    };
    first_token(&SIGNED_DECIMAL, value)
        .and_then(|token| token.parse::<f64>().ok())
        .ok_or_else(|| ParseError::numeric(field, line))
}

/// Extract the first run of digits anywhere in `line`.
pub fn first_integer(field: &'static str, line: &str) -> Result<u64, ParseError> {
    first_token(&DIGIT_RUN, line)
        .and_then(|token| token.parse::<u64>().ok())
        .ok_or_else(|| ParseError::numeric(field, line))
}
