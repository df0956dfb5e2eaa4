//! Exact fractions and the decimal <-> fraction conversions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConversionError, ParseError};

/// Largest magnitude accepted by [`Rational::from_f64`] (2^53).
const MAX_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

/// Exponents below this are truncated before reduction; the lost bits sit far
/// below any denominator bound that fits in `u32`.
const MIN_EXPONENT: i32 = -120;

/// An exact fraction, always in lowest terms with a positive denominator.
///
/// Because the representation is canonical, derived equality is value
/// equality: `2/4` and `1/2` construct the same `Rational`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: i64,
    denom: i64,
}

impl Rational {
    /// Build a reduced fraction from a numerator and denominator.
    pub fn new(numer: i64, denom: i64) -> Result<Self, ConversionError> {
        Self::from_i128(i128::from(numer), i128::from(denom))
    }

    /// A whole number.
    pub fn integer(value: i64) -> Self {
        Self {
            numer: value,
            denom: 1,
        }
    }

    fn from_i128(numer: i128, denom: i128) -> Result<Self, ConversionError> {
        if denom == 0 {
            return Err(ConversionError::ZeroDenominator);
        }
        let sign = if denom < 0 { -1 } else { 1 };
        let g = gcd(numer, denom);
        let numer = sign * numer / g;
        let denom = sign * denom / g;
        Ok(Self {
            numer: i64::try_from(numer).map_err(|_| ConversionError::Overflow)?,
            denom: i64::try_from(denom).map_err(|_| ConversionError::Overflow)?,
        })
    }

    pub fn numer(&self) -> i64 {
        self.numer
    }

    pub fn denom(&self) -> i64 {
        self.denom
    }

    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    /// The value as a decimal rounded to `places` decimal places.
    pub fn round_to(&self, places: u32) -> f64 {
        round_decimal(self.to_f64(), places)
    }

    /// The closest fraction to `value` whose denominator does not exceed
    /// `max_denominator`.
    ///
    /// The float is first taken apart into its exact binary fraction, so
    /// `0.1` starts as `3602879701896397/36028797018963968` and comes out as
    /// `1/10`. The bound is then applied with the continued-fraction best
    /// approximation: the last convergent within the bound is compared with
    /// the largest semiconvergent, and the closer one wins (ties go to the
    /// convergent).
    pub fn from_f64(value: f64, max_denominator: u32) -> Result<Self, ConversionError> {
        if !value.is_finite() {
            return Err(ConversionError::NotFinite(value));
        }
        if value.abs() > MAX_MAGNITUDE {
            return Err(ConversionError::OutOfRange(value));
        }
        let (numer, denom) = exact_binary(value);
        let bound = i128::from(max_denominator.max(1));
        if denom <= bound {
            return Self::from_i128(numer, denom);
        }

        let negative = numer < 0;
        let (mut n, mut d) = (numer.abs(), denom);
        let (mut p0, mut q0, mut p1, mut q1) = (0i128, 1i128, 1i128, 0i128);
        loop {
            let a = n / d;
            let q2 = q0 + a * q1;
            if q2 > bound {
                break;
            }
            (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
            (n, d) = (d, n - a * d);
            if d == 0 {
                break;
            }
        }

        let k = (bound - q0) / q1;
        let semiconvergent = (p0 + k * p1, q0 + k * q1);
        let convergent = (p1, q1);
        let target = value.abs();
        let distance = |(p, q): (i128, i128)| (p as f64 / q as f64 - target).abs();
        let (p, q) = if distance(convergent) <= distance(semiconvergent) {
            convergent
        } else {
            semiconvergent
        };
        Self::from_i128(if negative { -p } else { p }, q)
    }
}

/// Round to `places` decimal places on the exact binary value, ties to even.
///
/// `0.0625` becomes `0.062`, while `0.1 + 0.2` still rounds to `0.3` at three
/// places since its binary value lies above the tie.
pub fn round_decimal(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = places as usize;
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Exact `numer / denom` (reduced) for a finite float of bounded magnitude.
fn exact_binary(value: f64) -> (i128, i128) {
    if value == 0.0 {
        return (0, 1);
    }
    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & 0x000f_ffff_ffff_ffff;
    let (mut mantissa, mut exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | 1 << 52, biased - 1075)
    };
    if exponent < MIN_EXPONENT {
        let shift = (MIN_EXPONENT - exponent).min(63) as u32;
        mantissa >>= shift;
        exponent = MIN_EXPONENT;
    }

    let mantissa = i128::from(mantissa);
    let (numer, denom) = if exponent >= 0 {
        (mantissa << exponent, 1)
    } else {
        (mantissa, 1i128 << -exponent)
    };
    let g = gcd(numer, denom);
    let numer = numer / g;
    (if negative { -numer } else { numer }, denom / g)
}

fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    if a == 0 {
        1
    } else {
        a
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

/// Parses `[+-]digits` or `[+-]digits/digits`; surrounding whitespace is not
/// accepted.
impl FromStr for Rational {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::MalformedFraction(s.to_string());
        let out_of_range = || ParseError::OutOfRange(s.to_string());

        let (numer_text, denom_text) = match s.split_once('/') {
            Some((n, d)) => (n, Some(d)),
            None => (s, None),
        };

        let (negative, digits) = match numer_text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, numer_text.strip_prefix('+').unwrap_or(numer_text)),
        };
        if !is_digits(digits) {
            return Err(malformed());
        }
        let magnitude: i64 = digits.parse().map_err(|_| out_of_range())?;
        let numer = if negative { -magnitude } else { magnitude };

        let denom = match denom_text {
            Some(d) if is_digits(d) => d.parse::<i64>().map_err(|_| out_of_range())?,
            Some(_) => return Err(malformed()),
            None => 1,
        };
        if denom == 0 {
            return Err(ParseError::ZeroDenominator);
        }

        Rational::new(numer, denom).map_err(|_| out_of_range())
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rational {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.trim().parse().map_err(serde::de::Error::custom)
    }
}
