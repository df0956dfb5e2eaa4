//! Question generation.
//!
//! All fallible work (decimal to fraction conversion, rounding) happens once
//! when the bank is built from a [`QuizConfig`]; drawing a question afterwards
//! cannot fail.

use crate::config::{LevelPool, QuizConfig};
use crate::error::{ConfigError, ConversionError};
use crate::model::{CanonicalAnswer, Level, Question};
use crate::rational::{round_decimal, Rational};
use crate::traits::RandomSource;

/// One askable conversion: the value as shown, and the answer it implies.
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    source: String,
    answer: CanonicalAnswer,
}

/// Precomputed questions for one level, split by direction.
#[derive(Debug, Clone, PartialEq)]
struct LevelBank {
    to_fraction: Vec<Entry>,
    to_decimal: Vec<Entry>,
}

/// Every question the engine can ask, per level.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    levels: [LevelBank; 3],
}

impl QuestionBank {
    /// Build the bank, failing if a level would have nothing to ask or a pool
    /// value cannot be converted.
    pub fn build(config: &QuizConfig) -> Result<Self, ConfigError> {
        let grading = &config.grading;
        if grading.max_denominator == 0 {
            return Err(ConfigError::ZeroMaxDenominator);
        }
        let [one, two, three] = Level::ALL.map(|level| {
            build_level(
                level,
                config.pools.get(level),
                grading.decimal_places,
                grading.max_denominator,
            )
        });
        Ok(Self {
            levels: [one?, two?, three?],
        })
    }

    fn level(&self, level: Level) -> &LevelBank {
        &self.levels[usize::from(level.number() - 1)]
    }

    /// Draw a question for `level`: one coin flip picks the direction, one
    /// pick chooses the value. Picks past the end wrap around.
    pub fn generate<R: RandomSource + ?Sized>(&self, level: Level, rng: &mut R) -> Question {
        let bank = self.level(level);
        let entries = if rng.coin() {
            &bank.to_fraction
        } else {
            &bank.to_decimal
        };
        let entry = &entries[rng.pick(entries.len()) % entries.len()];
        let question = Question::new(level, &entry.source, entry.answer);
        tracing::debug!(level = %level, prompt = question.prompt(), "generated question");
        question
    }

    /// Prompts and answers this bank can produce for `level`, "to Fraction"
    /// first.
    pub fn questions(&self, level: Level) -> Vec<Question> {
        let bank = self.level(level);
        bank.to_fraction
            .iter()
            .chain(&bank.to_decimal)
            .map(|entry| Question::new(level, &entry.source, entry.answer))
            .collect()
    }
}

fn build_level(
    level: Level,
    pool: &LevelPool,
    places: u32,
    max_denominator: u32,
) -> Result<LevelBank, ConfigError> {
    if pool.is_empty() {
        return Err(ConfigError::EmptyLevel(level));
    }
    let conversion = |value: f64| {
        move |source: ConversionError| ConfigError::Conversion {
            level,
            value: value.to_string(),
            source,
        }
    };

    // A level without decimals shows its fractions as rounded decimals, and
    // the reverse, so both directions always have something to ask.
    let decimals: Vec<f64> = if pool.decimals.is_empty() {
        pool.fractions.iter().map(|f| f.round_to(places)).collect()
    } else {
        pool.decimals.clone()
    };
    let fractions: Vec<Rational> = if pool.fractions.is_empty() {
        pool.decimals
            .iter()
            .map(|&d| Rational::from_f64(d, max_denominator).map_err(conversion(d)))
            .collect::<Result<_, _>>()?
    } else {
        pool.fractions.clone()
    };

    // The fraction answer comes from the decimal actually shown, so the
    // prompt and the answer can never disagree.
    let to_fraction = decimals
        .iter()
        .map(|&decimal| {
            let answer = Rational::from_f64(decimal, max_denominator).map_err(conversion(decimal))?;
            Ok(Entry {
                source: decimal.to_string(),
                answer: CanonicalAnswer::Rational(answer),
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    let to_decimal = fractions
        .iter()
        .map(|fraction| Entry {
            source: fraction.to_string(),
            answer: CanonicalAnswer::Decimal(round_decimal(fraction.to_f64(), places)),
        })
        .collect();

    Ok(LevelBank {
        to_fraction,
        to_decimal,
    })
}
