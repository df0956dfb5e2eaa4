//! Central quiz engine.
//!
//! Question generation, answer evaluation and level progression over explicit
//! [`GameSession`] values. The engine itself only holds configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{AdvancePolicy, QuizConfig};
use crate::error::{ConfigError, ParseError};
use crate::generator::QuestionBank;
use crate::model::{CanonicalAnswer, Level, Question};
use crate::parser::{check_answer, strip_whitespace};
use crate::session::GameSession;
use crate::traits::RandomSource;

/// How a single submission was judged.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Nothing but whitespace was submitted.
    Empty,
    /// The text does not fit the grammar for the question's answer.
    Invalid(ParseError),
    /// The text parsed but is not the answer.
    Wrong { expected: CanonicalAnswer },
    /// The answer matched.
    Correct,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }

    pub fn message_kind(&self) -> MessageKind {
        match self {
            Verdict::Empty => MessageKind::Empty,
            Verdict::Invalid(_) => MessageKind::InvalidFormat,
            Verdict::Wrong { .. } => MessageKind::Wrong,
            Verdict::Correct => MessageKind::Correct,
        }
    }
}

/// Which message a presentation layer should show for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Correct,
    Wrong,
    InvalidFormat,
    Empty,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Correct => write!(f, "correct"),
            MessageKind::Wrong => write!(f, "wrong"),
            MessageKind::InvalidFormat => write!(f, "invalid_format"),
            MessageKind::Empty => write!(f, "empty"),
        }
    }
}

/// Result of [`QuizEngine::evaluate`]: the verdict and the session to carry
/// forward.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub session: GameSession,
    /// The level just reached, if this submission crossed a threshold.
    pub level_up: Option<Level>,
}

impl Evaluation {
    pub fn is_correct(&self) -> bool {
        self.verdict.is_correct()
    }
}

/// The quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    config: QuizConfig,
    bank: QuestionBank,
}

impl QuizEngine {
    pub fn new(config: QuizConfig) -> Result<Self, ConfigError> {
        let tolerance = config.grading.tolerance;
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        let bank = QuestionBank::build(&config)?;
        Ok(Self { config, bank })
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// A fresh question for `level`.
    pub fn generate_question<R: RandomSource + ?Sized>(
        &self,
        level: Level,
        rng: &mut R,
    ) -> Question {
        self.bank.generate(level, rng)
    }

    /// A new session: score 0, level 1, a level-1 question.
    pub fn start<R: RandomSource + ?Sized>(&self, rng: &mut R) -> GameSession {
        GameSession::new(self.generate_question(Level::One, rng))
    }

    /// A new session starting at `level` with score 0.
    pub fn start_at<R: RandomSource + ?Sized>(&self, level: Level, rng: &mut R) -> GameSession {
        GameSession {
            score: 0,
            level,
            question: self.generate_question(level, rng),
        }
    }

    /// Throw away all progress. Always succeeds.
    pub fn restart<R: RandomSource + ?Sized>(&self, rng: &mut R) -> GameSession {
        tracing::info!("game restarted");
        self.start(rng)
    }

    /// Judge `raw_text` against the session's current question and return the
    /// session to continue with.
    ///
    /// Empty and unparseable input never change the session. A wrong answer
    /// keeps the same question unless the advance policy is
    /// [`AdvancePolicy::Always`]. A correct answer adds one point, may move
    /// the level up by one, and always draws the next question.
    pub fn evaluate<R: RandomSource + ?Sized>(
        &self,
        raw_text: &str,
        mut session: GameSession,
        rng: &mut R,
    ) -> Evaluation {
        if raw_text.trim().is_empty() {
            return Evaluation {
                verdict: Verdict::Empty,
                session,
                level_up: None,
            };
        }

        let text = strip_whitespace(raw_text);
        let answer = *session.question.answer();
        let verdict = match check_answer(&answer, &text, &self.config.grading) {
            Ok(true) => Verdict::Correct,
            Ok(false) => Verdict::Wrong { expected: answer },
            Err(e) => {
                tracing::debug!("invalid answer {text:?}: {e}");
                return Evaluation {
                    verdict: Verdict::Invalid(e),
                    session,
                    level_up: None,
                };
            }
        };
        tracing::debug!(answer = %text, correct = verdict.is_correct(), "answer checked");

        let advance = match verdict {
            Verdict::Correct => {
                session.score += 1;
                true
            }
            _ => self.config.advance == AdvancePolicy::Always,
        };

        let mut level_up = None;
        if advance {
            level_up = self.next_level(session.score, session.level);
            if let Some(level) = level_up {
                tracing::info!(score = session.score, "level up to {level}");
                session.level = level;
            }
            session.question = self.generate_question(session.level, rng);
        }

        Evaluation {
            verdict,
            session,
            level_up,
        }
    }

    /// The level to move to, judged against the level held before this
    /// submission, so at most one step is taken.
    fn next_level(&self, score: u32, level: Level) -> Option<Level> {
        let progression = &self.config.progression;
        match level {
            Level::One if score >= progression.level_two_at => Some(Level::Two),
            Level::Two if score >= progression.level_three_at => Some(Level::Three),
            _ => None,
        }
    }
}
