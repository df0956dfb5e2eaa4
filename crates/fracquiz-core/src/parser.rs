//! Player answer parsing and grading.
//!
//! The canonical answer's variant decides the grammar: a fraction literal for
//! [`CanonicalAnswer::Rational`], a plain decimal numeral for
//! [`CanonicalAnswer::Decimal`].

use crate::config::Grading;
use crate::error::ParseError;
use crate::model::CanonicalAnswer;
use crate::rational::Rational;

/// Remove every whitespace character, so `" 3 / 4 "` reads as `3/4`.
pub fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse `int/int` or a bare integer.
pub fn parse_fraction(text: &str) -> Result<Rational, ParseError> {
    text.parse()
}

/// Parse a decimal numeral: optional sign, digits with at most one point, at
/// least one digit. Exponents, `inf` and `nan` are rejected.
pub fn parse_decimal(text: &str) -> Result<f64, ParseError> {
    let malformed = || ParseError::MalformedDecimal(text.to_string());
    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || !all_digits(whole)
        || !all_digits(fraction)
    {
        return Err(malformed());
    }
    text.parse().map_err(|_| malformed())
}

/// Parse `text` (already whitespace-free) against `answer` and report
/// whether it matches.
pub fn check_answer(
    answer: &CanonicalAnswer,
    text: &str,
    grading: &Grading,
) -> Result<bool, ParseError> {
    match answer {
        CanonicalAnswer::Rational(expected) => {
            let given = match parse_fraction(text) {
                Ok(given) => given,
                Err(ParseError::MalformedFraction(_)) if grading.accept_cross_format => {
                    let decimal = parse_decimal(text)
                        .map_err(|_| ParseError::MalformedFraction(text.to_string()))?;
                    Rational::from_f64(decimal, grading.max_denominator)
                        .map_err(|_| ParseError::OutOfRange(text.to_string()))?
                }
                Err(e) => return Err(e),
            };
            Ok(given == *expected)
        }
        CanonicalAnswer::Decimal(expected) => {
            let given = match parse_decimal(text) {
                Ok(given) => given,
                Err(_) if grading.accept_cross_format && text.contains('/') => {
                    parse_fraction(text)?.to_f64()
                }
                Err(e) => return Err(e),
            };
            Ok((given - expected).abs() < grading.tolerance)
        }
    }
}
