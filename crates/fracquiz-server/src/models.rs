//! Request and response bodies. Canonical answers never appear here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fracquiz_core::{GameSession, Level, MessageKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// Requested level; anything but 1, 2 or 3 is rejected with 400.
    pub level: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer_id: Uuid,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestartRequest {
    /// Session to reset; a new one is created when absent.
    #[serde(default)]
    pub answer_id: Option<Uuid>,
}

/// A session's public state: its id and the question to show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub answer_id: Uuid,
    pub prompt: String,
    pub level: Level,
    pub score: u32,
}

impl SessionResponse {
    pub fn new(answer_id: Uuid, session: &GameSession) -> Self {
        Self {
            answer_id,
            prompt: session.question().prompt().to_string(),
            level: session.level(),
            score: session.score(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub correct: bool,
    pub score: u32,
    pub level: Level,
    pub level_up: Option<Level>,
    pub message_kind: MessageKind,
    /// The question to show next: the same one unless the answer advanced it.
    pub prompt: String,
}
