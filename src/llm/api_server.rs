use async_trait::async_trait;

use super::{QuestionGenerator, TransportError, status_error};
use crate::models::Topic;
use crate::protocol::{GENERATE_QUESTIONS_PATH, GenerateRequest};

/// Fetches questions from a running `duel-trivia serve` instance.
///
/// The server may itself have fallen back to local questions; its `source`
/// field is honoured by the remote strategy.
pub struct ApiServerGenerator {
    client: reqwest::Client,
    base_url: String,
}

impl ApiServerGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_QUESTIONS_PATH)
    }
}

#[async_trait]
impl QuestionGenerator for ApiServerGenerator {
    fn name(&self) -> &str {
        "api-server"
    }

    fn reports_source(&self) -> bool {
        true
    }

    async fn generate(&self, topic: &Topic, _count: usize) -> Result<String, TransportError> {
        let request = GenerateRequest {
            topic: topic.as_str().to_string(),
        };

        let response = self.client.post(self.endpoint()).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::time::Duration;

    use crate::data::TemplateDeck;
    use crate::models::Provenance;
    use crate::server::{AppState, router};
    use crate::source::QuestionSource;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    /// A real duel-trivia server with no remote generator of its own.
    async fn spawn_local_server() -> String {
        let source =
            QuestionSource::standard(None, TemplateDeck::Sampled).with_fallback_delay(Duration::ZERO);
        spawn(router(AppState::new(source, 5), None)).await
    }

    fn client_source(base_url: String) -> QuestionSource {
        let remote = Some(QuestionSource::remote(ApiServerGenerator::new(base_url)));
        QuestionSource::standard(remote, TemplateDeck::Fixed).with_fallback_delay(Duration::ZERO)
    }

    fn topic(name: &str) -> Topic {
        Topic::parse(name).unwrap()
    }

    #[tokio::test]
    async fn test_posts_topic_and_returns_body() {
        let router = Router::new().route(
            GENERATE_QUESTIONS_PATH,
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({ "topic": "Jazz" }));
                "raw body"
            }),
        );
        let base_url = spawn(router).await;

        let generator = ApiServerGenerator::new(base_url);
        assert_eq!(generator.generate(&topic("Jazz"), 5).await.unwrap(), "raw body");
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let router = Router::new().route(
            GENERATE_QUESTIONS_PATH,
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to generate questions" })),
                )
            }),
        );
        let base_url = spawn(router).await;

        match ApiServerGenerator::new(base_url).generate(&topic("Jazz"), 5).await {
            Err(TransportError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("Failed to generate questions"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_curated_provenance_reaches_client() {
        let source = client_source(spawn_local_server().await);
        let set = source.fetch_questions(&topic("Science"), 5).await;

        assert_eq!(set.provenance, Provenance::Curated);
        assert_eq!(set.len(), 5);
        assert_eq!(set.questions[0].text(), "What is the chemical symbol for gold?");
        assert!(set.warning.is_none());
    }

    #[tokio::test]
    async fn test_server_generic_provenance_reaches_client() {
        let source = client_source(spawn_local_server().await);
        let set = source.fetch_questions(&topic("Jazz"), 5).await;

        assert_eq!(set.provenance, Provenance::Generic);
        assert_eq!(set.len(), 5);
        assert!(set.questions.iter().all(|q| q.text().contains("Jazz")));
    }

    #[tokio::test]
    async fn test_failing_server_falls_back_to_local_curated() {
        let router = Router::new().route(
            GENERATE_QUESTIONS_PATH,
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let source = client_source(spawn(router).await);
        let set = source.fetch_questions(&topic("history"), 5).await;

        assert_eq!(set.provenance, Provenance::Curated);
        assert_eq!(set.len(), 5);
        assert!(
            set.warning
                .as_deref()
                .unwrap()
                .starts_with("Used fallback due to API error")
        );
    }
}
