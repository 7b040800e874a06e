//! Wire types for the question-generation HTTP API.
//!
//! All bodies are JSON.

use serde::{Deserialize, Serialize};

use crate::models::{Provenance, QuestionRecord, QuestionSet};

/// Route of the question-generation endpoint.
pub const GENERATE_QUESTIONS_PATH: &str = "/api/generate-questions";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Error body returned when no questions could be produced at all.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate questions";

/// Body of `POST /api/generate-questions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Missing topics deserialize as empty and are rejected by validation.
    #[serde(default)]
    pub topic: String,
}

/// Successful response of `POST /api/generate-questions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub questions: Vec<QuestionRecord>,
    pub source: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<QuestionSet> for GenerateResponse {
    fn from(set: QuestionSet) -> Self {
        Self {
            questions: set.questions,
            source: set.provenance,
            warning: set.warning,
        }
    }
}

/// Error body for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
