//! Quiz endpoint handlers.
//!
//! Locks are always taken sessions first, then the random source.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use fracquiz_core::Level;

use crate::error::ApiError;
use crate::extractors::AppJson;
use crate::models::{
    AnswerRequest, AnswerResponse, QuestionRequest, RestartRequest, SessionResponse,
};
use crate::state::AppState;

/// POST /question - start a session at the requested level
pub async fn create_question(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<QuestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let level = req
        .level
        .to_string()
        .parse::<Level>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let mut sessions = state.sessions()?;
    let mut rng = state.rng()?;
    let session = state.engine.start_at(level, &mut *rng);
    let answer_id = Uuid::new_v4();
    tracing::info!("created session {answer_id} at level {level}");

    let response = SessionResponse::new(answer_id, &session);
    sessions.insert(answer_id, session);
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /answer - grade an answer for a session's current question
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let mut sessions = state.sessions()?;
    let mut rng = state.rng()?;
    let session = sessions
        .get(&req.answer_id)
        .ok_or_else(|| ApiError::not_found(format!("unknown answer_id {}", req.answer_id)))?;

    let evaluation = state.engine.evaluate(&req.text, session, &mut *rng);
    tracing::info!(
        "session {}: {} (score {})",
        req.answer_id,
        evaluation.verdict.message_kind(),
        evaluation.session.score()
    );

    let response = AnswerResponse {
        correct: evaluation.is_correct(),
        score: evaluation.session.score(),
        level: evaluation.session.level(),
        level_up: evaluation.level_up,
        message_kind: evaluation.verdict.message_kind(),
        prompt: evaluation.session.question().prompt().to_string(),
    };
    sessions.insert(req.answer_id, evaluation.session);
    Ok(Json(response))
}

/// POST /restart - reset a session, or start a new one
pub async fn restart(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RestartRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let mut sessions = state.sessions()?;
    let answer_id = match req.answer_id {
        Some(id) if !sessions.contains(&id) => {
            return Err(ApiError::not_found(format!("unknown answer_id {id}")))
        }
        Some(id) => id,
        None => Uuid::new_v4(),
    };
    let mut rng = state.rng()?;
    let session = state.engine.restart(&mut *rng);
    tracing::info!("restarted session {answer_id}");

    let response = SessionResponse::new(answer_id, &session);
    sessions.insert(answer_id, session);
    Ok(Json(response))
}

/// GET /health
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(serde_json::json!({
        "status": "ok",
        "sessions": state.session_count()?,
    })))
}
