//! Engine error types.
//!
//! Submission outcomes are values (see [`crate::engine::Verdict`]); the types
//! here describe why a piece of text or a number could not be turned into a
//! fraction or decimal, and why a configuration cannot drive the engine.

use thiserror::Error;

use crate::model::Level;

/// Raw answer text did not match the grammar expected for the question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Text is not of the form `int/int` or a bare integer.
    #[error("'{0}' is not a fraction like 1/2")]
    MalformedFraction(String),

    /// Text is not a plain decimal numeral.
    #[error("'{0}' is not a decimal like 0.5")]
    MalformedDecimal(String),

    /// A fraction literal with a zero denominator.
    #[error("denominator must not be zero")]
    ZeroDenominator,

    /// The digits are well-formed but do not fit the integer range.
    #[error("'{0}' is too large")]
    OutOfRange(String),
}

/// Failure converting between exact fractions and floating-point decimals.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConversionError {
    /// NaN or an infinity.
    #[error("cannot convert non-finite value {0}")]
    NotFinite(f64),

    /// The magnitude is too large for an exact fraction.
    #[error("{0} is outside the convertible range")]
    OutOfRange(f64),

    /// Numerator or denominator overflowed a 64-bit integer.
    #[error("fraction does not fit in 64-bit integers")]
    Overflow,

    /// A fraction was built with a zero denominator.
    #[error("denominator must not be zero")]
    ZeroDenominator,
}

/// A configuration that cannot be turned into a question bank.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The level has neither decimals nor fractions to ask about.
    #[error("level {0} has no decimals or fractions to ask about")]
    EmptyLevel(Level),

    /// A pool value could not be converted to the other representation.
    #[error("level {level}: cannot convert {value}: {source}")]
    Conversion {
        level: Level,
        value: String,
        #[source]
        source: ConversionError,
    },

    /// Decimal grading tolerance must be a positive finite number.
    #[error("tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    /// `max_denominator` must be at least 1.
    #[error("max_denominator must be at least 1")]
    ZeroMaxDenominator,
}
