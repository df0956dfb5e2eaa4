//! Per-player game state.

use crate::model::{Level, Question};

/// One player's score, level and current question.
///
/// Sessions are plain values: the engine takes one in and hands a new one
/// back. Only [`crate::engine::QuizEngine`] can build or change them, so the
/// score, level and question always move together under its rules.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub(crate) score: u32,
    pub(crate) level: Level,
    pub(crate) question: Question,
}

impl GameSession {
    pub(crate) fn new(question: Question) -> Self {
        Self {
            score: 0,
            level: Level::One,
            question,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn question(&self) -> &Question {
        &self.question
    }
}
