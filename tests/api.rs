use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use duel_trivia::protocol::GENERATE_QUESTIONS_PATH;
use duel_trivia::server::{AppState, router};
use duel_trivia::{QuestionSource, TemplateDeck};

fn app() -> Router {
    let source =
        QuestionSource::standard(None, TemplateDeck::Sampled).with_fallback_delay(Duration::ZERO);
    router(AppState::new(source, 5), None)
}

async fn generate(body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(GENERATE_QUESTIONS_PATH)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_curated_topic() {
    let (status, body) = generate(json!({ "topic": "Science" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "curated");
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["id"], 1);
    assert_eq!(questions[0]["question"], "What is the chemical symbol for gold?");
    assert_eq!(questions[0]["answers"], json!(["Au", "Ag", "Go", "Gd"]));
    assert_eq!(questions[0]["correct"], 0);
}

#[tokio::test]
async fn test_missing_topic() {
    let (status, body) = generate(json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Please enter a topic!" }));
}

#[tokio::test]
async fn test_generic_topic() {
    let (status, body) = generate(json!({ "topic": "Jazz" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "generic");
    for question in body["questions"].as_array().unwrap() {
        assert_eq!(question["answers"].as_array().unwrap().len(), 4);
        let correct = question["correct"].as_u64().unwrap();
        assert!(correct < 4);
    }
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok", "service": "duel-trivia" }));
}
