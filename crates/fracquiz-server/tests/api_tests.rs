use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use fracquiz_core::{Level, QuizConfig, QuizEngine};
use fracquiz_server::{create_router, AppState};

fn test_state() -> Arc<AppState> {
    let engine = QuizEngine::new(QuizConfig::default()).unwrap();
    Arc::new(AppState::new(engine, Some(7)))
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Look the prompt up in the bank to find the answer the server expects.
fn answer_for(state: &AppState, level: u64, prompt: &str) -> String {
    let level = Level::try_from(level as u8).unwrap();
    state
        .engine
        .bank()
        .questions(level)
        .into_iter()
        .find(|q| q.prompt() == prompt)
        .map(|q| q.answer().to_string())
        .unwrap_or_else(|| panic!("prompt {prompt:?} not in level {level} bank"))
}

#[tokio::test]
async fn test_create_question_returns_session() {
    let state = test_state();
    let app = create_router(state);

    let (status, json) = post(&app, "/question", json!({ "level": 2 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["level"], 2);
    assert_eq!(json["score"], 0);
    assert!(json["prompt"].as_str().unwrap().starts_with("Convert "));
    assert!(Uuid::parse_str(json["answer_id"].as_str().unwrap()).is_ok());
    assert!(json.get("answer").is_none());
}

#[tokio::test]
async fn test_create_question_rejects_unknown_level() {
    let app = create_router(test_state());

    for level in [0, 4] {
        let (status, json) = post(&app, "/question", json!({ "level": level })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], 400);
        assert!(json["message"].is_string());
    }
}

#[tokio::test]
async fn test_answer_unknown_session_returns_404() {
    let app = create_router(test_state());

    let body = json!({ "answer_id": Uuid::new_v4(), "text": "1/2" });
    let (status, json) = post(&app, "/answer", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_correct_answers_reach_level_two() {
    let state = test_state();
    let app = create_router(state.clone());

    let (_, session) = post(&app, "/question", json!({ "level": 1 })).await;
    let answer_id = session["answer_id"].clone();
    let mut prompt = session["prompt"].as_str().unwrap().to_string();

    for round in 1..=5u64 {
        let text = answer_for(&state, 1, &prompt);
        let (status, json) = post(
            &app,
            "/answer",
            json!({ "answer_id": answer_id, "text": text }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["correct"], true);
        assert_eq!(json["message_kind"], "correct");
        assert_eq!(json["score"], round);
        if round < 5 {
            assert_eq!(json["level"], 1);
            assert!(json["level_up"].is_null());
        } else {
            assert_eq!(json["level"], 2);
            assert_eq!(json["level_up"], 2);
        }
        prompt = json["prompt"].as_str().unwrap().to_string();
    }
}

#[tokio::test]
async fn test_wrong_answer_keeps_question() {
    let state = test_state();
    let app = create_router(state);

    let (_, session) = post(&app, "/question", json!({ "level": 1 })).await;
    let answer_id = session["answer_id"].clone();

    // No level 1 question has 99/100 or 99.0 as its answer.
    let prompt = session["prompt"].as_str().unwrap();
    let text = if prompt.ends_with("Fraction:") { "99/100" } else { "99" };

    let (status, json) = post(
        &app,
        "/answer",
        json!({ "answer_id": answer_id, "text": text }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["correct"], false);
    assert_eq!(json["message_kind"], "wrong");
    assert_eq!(json["score"], 0);
    assert_eq!(json["prompt"], session["prompt"]);
}

#[tokio::test]
async fn test_empty_and_invalid_answers_change_nothing() {
    let app = create_router(test_state());

    let (_, session) = post(&app, "/question", json!({ "level": 3 })).await;
    let answer_id = session["answer_id"].clone();

    let (_, empty) = post(
        &app,
        "/answer",
        json!({ "answer_id": answer_id, "text": "   " }),
    )
    .await;
    assert_eq!(empty["message_kind"], "empty");
    assert_eq!(empty["correct"], false);
    assert_eq!(empty["prompt"], session["prompt"]);

    let (_, invalid) = post(
        &app,
        "/answer",
        json!({ "answer_id": answer_id, "text": "abc" }),
    )
    .await;
    assert_eq!(invalid["message_kind"], "invalid_format");
    assert_eq!(invalid["score"], 0);
    assert_eq!(invalid["level"], 3);
    assert_eq!(invalid["prompt"], session["prompt"]);
}

#[tokio::test]
async fn test_restart_resets_existing_session() {
    let state = test_state();
    let app = create_router(state.clone());

    let (_, session) = post(&app, "/question", json!({ "level": 3 })).await;
    let answer_id = session["answer_id"].clone();
    let text = answer_for(&state, 3, session["prompt"].as_str().unwrap());
    let (_, answered) = post(
        &app,
        "/answer",
        json!({ "answer_id": answer_id, "text": text }),
    )
    .await;
    assert_eq!(answered["score"], 1);

    let (status, json) = post(&app, "/restart", json!({ "answer_id": answer_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["answer_id"], answer_id);
    assert_eq!(json["score"], 0);
    assert_eq!(json["level"], 1);
    assert_eq!(state.session_count().unwrap(), 1);
}

#[tokio::test]
async fn test_restart_without_id_creates_session() {
    let state = test_state();
    let app = create_router(state.clone());

    let (status, json) = post(&app, "/restart", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["level"], 1);
    assert_eq!(state.session_count().unwrap(), 1);

    let (status, _) = post(&app, "/restart", json!({ "answer_id": Uuid::new_v4() })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_sessions() {
    let state = test_state();
    let app = create_router(state);
    post(&app, "/question", json!({ "level": 1 })).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["sessions"], 1);
}

async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes)));
    (status, json)
}

#[tokio::test]
async fn test_out_of_range_levels_are_json_400() {
    let app = create_router(test_state());

    for level in [300, -1, 1_000_000_000_000i64] {
        let (status, json) = post(&app, "/question", json!({ "level": level })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "level {level}");
        assert_eq!(json["status"], 400);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("level must be 1, 2 or 3"));
    }
}

#[tokio::test]
async fn test_malformed_bodies_are_json_400() {
    let app = create_router(test_state());

    let cases = [
        ("/question", "{not json"),
        ("/question", r#"{"level": "one"}"#),
        ("/answer", r#"{"answer_id": "nope", "text": "1/2"}"#),
        ("/answer", r#"{"text": "1/2"}"#),
        ("/restart", r#"{"answer_id": 7}"#),
    ];
    for (uri, body) in cases {
        let (status, json) = post_raw(&app, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(json["status"], 400);
        assert!(json["message"].is_string());
    }
}

#[tokio::test(start_paused = true)]
async fn test_idle_session_expires() {
    let engine = QuizEngine::new(QuizConfig::default()).unwrap();
    let state = Arc::new(
        AppState::new(engine, Some(7)).with_session_limits(Duration::from_secs(60), 100),
    );
    let app = create_router(state.clone());

    let (_, session) = post(&app, "/question", json!({ "level": 1 })).await;
    let answer_id = session["answer_id"].clone();

    tokio::time::advance(Duration::from_secs(30)).await;
    let (status, _) = post(&app, "/answer", json!({ "answer_id": answer_id, "text": "" })).await;
    assert_eq!(status, StatusCode::OK);

    // Each use restarts the idle clock.
    tokio::time::advance(Duration::from_secs(45)).await;
    let (status, _) = post(&app, "/answer", json!({ "answer_id": answer_id, "text": "" })).await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::advance(Duration::from_secs(61)).await;
    let (status, json) = post(&app, "/answer", json!({ "answer_id": answer_id, "text": "" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert_eq!(state.session_count().unwrap(), 0);
}

#[tokio::test]
async fn test_session_count_is_capped() {
    let engine = QuizEngine::new(QuizConfig::default()).unwrap();
    let state = Arc::new(
        AppState::new(engine, Some(7)).with_session_limits(Duration::from_secs(600), 50),
    );
    let app = create_router(state.clone());

    for _ in 0..500 {
        let (status, _) = post(&app, "/question", json!({ "level": 1 })).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(state.session_count().unwrap(), 50);
}

#[tokio::test]
async fn test_answer_keeps_session_when_random_source_fails() {
    let state = test_state();
    let app = create_router(state.clone());

    let (_, session) = post(&app, "/question", json!({ "level": 1 })).await;
    let answer_id: Uuid = serde_json::from_value(session["answer_id"].clone()).unwrap();

    let poisoner = state.clone();
    let poisoned = std::thread::spawn(move || {
        let _guard = poisoner.rng().unwrap();
        panic!("poison the random source");
    })
    .join();
    assert!(poisoned.is_err());

    let (status, json) = post(&app, "/answer", json!({ "answer_id": answer_id, "text": "1/2" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], 500);

    let kept = state.sessions().unwrap().get(&answer_id);
    assert_eq!(kept.unwrap().question().prompt(), session["prompt"]);
}

#[tokio::test]
async fn test_health_fails_when_session_store_is_poisoned() {
    let state = test_state();
    let app = create_router(state.clone());

    let poisoner = state.clone();
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.sessions().unwrap();
        panic!("poison the session store");
    })
    .join();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(state.session_count().is_err());
}
