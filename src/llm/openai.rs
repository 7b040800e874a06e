use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{QuestionGenerator, TransportError, status_error};
use crate::models::Topic;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub const SYSTEM_PROMPT: &str =
    "You are a trivia question generator. Always respond with valid JSON only, no additional text.";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;

/// Build the user prompt for a topic.
pub fn build_prompt(topic: &Topic, count: usize) -> String {
    format!(
        r#"Write {count} trivia questions about "{topic}" that are challenging but fair.

Reply with ONLY a JSON object in exactly this shape, with no other text:
{{
  "questions": [
    {{
      "question": "What is the capital of France?",
      "answers": ["Paris", "London", "Berlin", "Madrid"],
      "correct": 0
    }}
  ]
}}

Rules:
- every question is clear and has one unambiguous answer
- every question has exactly 4 answers
- "correct" is the 0-3 index of the right answer
- vary the position of the right answer and the difficulty
- keep facts accurate and avoid trick questions

Topic: {topic}"#
    )
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, topic: &Topic, count: usize) -> Result<String, TransportError> {
        let prompt = build_prompt(topic, count);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let completion: ChatResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(TransportError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::time::Duration;

    use crate::data::TemplateDeck;
    use crate::models::Provenance;
    use crate::source::QuestionSource;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    #[test]
    fn test_prompt_mentions_topic_and_count() {
        let topic = Topic::parse("Jazz").unwrap();
        let prompt = build_prompt(&topic, 7);
        assert!(prompt.contains("Write 7 trivia questions about \"Jazz\""));
        assert!(prompt.ends_with("Topic: Jazz"));
        assert!(prompt.contains("\"questions\": ["));
    }

    #[tokio::test]
    async fn test_generate_returns_first_choice_content() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer test-key");
                assert_eq!(body["model"], "gpt-test");
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
                assert!(body["messages"][1]["content"].as_str().unwrap().contains("Jazz"));
                Json(json!({
                    "choices": [{ "message": { "role": "assistant", "content": "  {\"questions\": []}\n" } }]
                }))
            }),
        );
        let base_url = spawn_stub(router).await;

        let generator = OpenAiGenerator::new("test-key")
            .with_model("gpt-test")
            .with_base_url(base_url);
        let topic = Topic::parse("Jazz").unwrap();

        let content = generator.generate(&topic, 5).await.unwrap();
        assert_eq!(content, "{\"questions\": []}");
    }

    #[tokio::test]
    async fn test_generate_surfaces_status_errors() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let base_url = spawn_stub(router).await;
        let generator = OpenAiGenerator::new("nope").with_base_url(base_url);
        let topic = Topic::parse("Jazz").unwrap();

        match generator.generate(&topic, 5).await {
            Err(TransportError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_model_cannot_claim_another_provenance() {
        let content = r#"{"source": "curated", "warning": "llm says hi", "questions": [
            {"question": "Who wrote Kind of Blue?", "answers": ["Miles Davis", "Coltrane", "Monk", "Evans"], "correct": 0}
        ]}"#;
        let router = Router::new().route(
            "/v1/chat/completions",
            post(move || async move {
                Json(json!({ "choices": [{ "message": { "content": content } }] }))
            }),
        );
        let base_url = spawn_stub(router).await;
        let generator = OpenAiGenerator::new("key").with_base_url(base_url);
        let remote = Some(QuestionSource::remote(generator));
        let source =
            QuestionSource::standard(remote, TemplateDeck::Fixed).with_fallback_delay(Duration::ZERO);

        let set = source.fetch_questions(&Topic::parse("Jazz").unwrap(), 5).await;
        assert_eq!(set.provenance, Provenance::Generated);
        assert!(set.warning.is_none());
        assert_eq!(set.questions[0].text(), "Who wrote Kind of Blue?");
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_choices() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let base_url = spawn_stub(router).await;
        let generator = OpenAiGenerator::new("key").with_base_url(base_url);
        let topic = Topic::parse("Jazz").unwrap();

        assert!(matches!(
            generator.generate(&topic, 5).await,
            Err(TransportError::EmptyCompletion)
        ));
    }
}
