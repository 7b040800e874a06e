use async_trait::async_trait;
use thiserror::Error;

use crate::data::{ValidationError, curated_questions, validator};
use crate::llm::{QuestionGenerator, TransportError};
use crate::models::{Provenance, QuestionSet, Topic};

/// Why a strategy produced nothing. Never escapes [`super::QuestionSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no curated questions for topic")]
    NoCuratedMatch,
}

/// One step of the fallback chain.
#[async_trait]
pub trait QuestionStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Local strategies answer without leaving the process.
    fn is_local(&self) -> bool;

    async fn fetch(&self, topic: &Topic, count: usize) -> Result<QuestionSet, SourceError>;
}

/// Asks a remote generator and validates its output.
pub struct RemoteStrategy<G> {
    generator: G,
}

impl<G: QuestionGenerator> RemoteStrategy<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl<G: QuestionGenerator> QuestionStrategy for RemoteStrategy<G> {
    fn name(&self) -> &str {
        self.generator.name()
    }

    fn is_local(&self) -> bool {
        false
    }

    async fn fetch(&self, topic: &Topic, count: usize) -> Result<QuestionSet, SourceError> {
        let raw = self.generator.generate(topic, count).await?;
        let payload = validator::parse_payload(&raw)?;
        let questions = validator::validate(&payload)?;

        if !self.generator.reports_source() {
            return Ok(QuestionSet::new(questions, Provenance::Generated));
        }

        let provenance = payload
            .get("source")
            .and_then(|source| source.as_str())
            .and_then(Provenance::from_wire)
            .unwrap_or(Provenance::Generated);
        let warning = payload
            .get("warning")
            .and_then(|warning| warning.as_str())
            .map(str::to_string);

        Ok(QuestionSet {
            questions,
            provenance,
            warning,
        })
    }
}

/// Looks the topic up in the curated decks.
pub struct CuratedStrategy;

#[async_trait]
impl QuestionStrategy for CuratedStrategy {
    fn name(&self) -> &str {
        "curated"
    }

    fn is_local(&self) -> bool {
        true
    }

    async fn fetch(&self, topic: &Topic, _count: usize) -> Result<QuestionSet, SourceError> {
        curated_questions(topic)
            .map(|questions| QuestionSet::new(questions, Provenance::Curated))
            .ok_or(SourceError::NoCuratedMatch)
    }
}
