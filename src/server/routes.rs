use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::models::{EMPTY_TOPIC_MESSAGE, Topic};
use crate::protocol::{
    ErrorResponse, GENERATE_QUESTIONS_PATH, GENERATION_FAILED_MESSAGE, GenerateRequest,
    GenerateResponse,
};
use crate::source::QuestionSource;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<QuestionSource>,
    pub question_count: usize,
}

impl AppState {
    pub fn new(source: QuestionSource, question_count: usize) -> Self {
        Self {
            source: Arc::new(source),
            question_count,
        }
    }
}

fn json_error(status: StatusCode, msg: &str) -> Response {
    (status, Json(ErrorResponse::new(msg))).into_response()
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "duel-trivia" }))
}

/// Build the HTTP router. Static files in `static_dir`, if given, are served
/// for every path the API does not claim.
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route(GENERATE_QUESTIONS_PATH, post(generate_questions))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(CorsLayer::permissive())
}

async fn generate_questions(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    // Unreadable bodies carry no topic.
    let topic = match payload.map(|Json(request)| Topic::parse(&request.topic)) {
        Ok(Ok(topic)) => topic,
        _ => return json_error(StatusCode::BAD_REQUEST, EMPTY_TOPIC_MESSAGE),
    };

    info!(%topic, "Generating questions");

    // A panicking strategy surfaces as a 500.
    let source = Arc::clone(&state.source);
    let count = state.question_count;
    let task_topic = topic.clone();
    let fetched = tokio::spawn(async move { source.fetch_questions(&task_topic, count).await }).await;

    match fetched {
        Ok(set) if !set.is_empty() => {
            (StatusCode::OK, Json(GenerateResponse::from(set))).into_response()
        }
        Ok(_) => {
            error!(%topic, "Question source produced an empty set");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED_MESSAGE)
        }
        Err(e) => {
            error!(%topic, error = %e, "Question generation task failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TemplateDeck;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app() -> Router {
        let source =
            QuestionSource::standard(None, TemplateDeck::Sampled).with_fallback_delay(Duration::ZERO);
        router(AppState::new(source, 5), None)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(GENERATE_QUESTIONS_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_whitespace_topic_is_rejected() {
        let response = app().oneshot(post_json(r#"{"topic": "   "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Please enter a topic!" }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let response = app().oneshot(post_json("not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_topic_uses_generic_templates() {
        let response = app()
            .oneshot(post_json(r#"{"topic": "Volcanoes"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["source"], "generic");
        let questions = body["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 5);
        assert!(body.get("warning").is_none());
    }
}
