//! Core data model types for fracquiz.
//!
//! Levels, conversion directions, canonical answers and questions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::rational::Rational;

/// A difficulty level. Only three exist, so no question can ever be asked
/// for a level outside 1 to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::One, Level::Two, Level::Three];

    pub fn number(self) -> u8 {
        self as u8
    }
}

/// A level number outside 1 to 3.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("level must be 1, 2 or 3, got '{0}'")]
pub struct InvalidLevel(pub String);

impl TryFrom<u8> for Level {
    type Error = InvalidLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            other => Err(InvalidLevel(other.to_string())),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.number()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for Level {
    type Err = InvalidLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| InvalidLevel(s.to_string()))
            .and_then(Level::try_from)
    }
}

/// Which representation the player is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Shown a decimal, answer with a fraction.
    ToFraction,
    /// Shown a fraction, answer with a decimal.
    ToDecimal,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToFraction => write!(f, "Fraction"),
            Direction::ToDecimal => write!(f, "Decimal"),
        }
    }
}

/// The correct answer held for a question. The variant decides how player
/// input is parsed and compared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanonicalAnswer {
    /// Compared by exact equality after reduction.
    Rational(Rational),
    /// Compared within the grading tolerance.
    Decimal(f64),
}

impl CanonicalAnswer {
    pub fn direction(&self) -> Direction {
        match self {
            CanonicalAnswer::Rational(_) => Direction::ToFraction,
            CanonicalAnswer::Decimal(_) => Direction::ToDecimal,
        }
    }
}

impl fmt::Display for CanonicalAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalAnswer::Rational(value) => write!(f, "{value}"),
            CanonicalAnswer::Decimal(value) => write!(f, "{value}"),
        }
    }
}

/// A question and its answer, built together and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    level: Level,
    prompt: String,
    answer: CanonicalAnswer,
}

impl Question {
    /// `source` is the value as shown to the player; the direction comes
    /// from the answer's variant.
    pub(crate) fn new(level: Level, source: &str, answer: CanonicalAnswer) -> Self {
        Self {
            level,
            prompt: format!("Convert {source} to {}:", answer.direction()),
            answer,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn answer(&self) -> &CanonicalAnswer {
        &self.answer
    }

    pub fn direction(&self) -> Direction {
        self.answer.direction()
    }
}
