//! Remote question generators.
//!
//! A generator only moves text: it returns whatever the remote side produced
//! and leaves parsing and validation to [`crate::data::validator`].

mod api_server;
mod openai;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Topic;

pub use api_server::ApiServerGenerator;
pub use openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiGenerator, SYSTEM_PROMPT, build_prompt};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion contained no message content")]
    EmptyCompletion,
}

/// Produces raw question text for a topic.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Whether replies carry a trusted `source` and `warning` of their own.
    /// Only a duel-trivia server does; model output never does.
    fn reports_source(&self) -> bool {
        false
    }

    async fn generate(&self, topic: &Topic, count: usize) -> Result<String, TransportError>;
}

/// Read a non-success response into a [`TransportError::Status`].
async fn status_error(response: reqwest::Response) -> TransportError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_string());
    TransportError::Status { status, body }
}
