//! Resolves a topic into the question list for a round.
//!
//! Strategies are tried in order and the first success wins. Every failure
//! is logged and swallowed; when the whole list is exhausted the generic
//! templates answer, so [`QuestionSource::fetch_questions`] cannot fail.

mod strategy;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::data::{GenericTemplates, TemplateDeck};
use crate::llm::QuestionGenerator;
use crate::models::{Provenance, QuestionSet, Topic};

pub use strategy::{CuratedStrategy, QuestionStrategy, RemoteStrategy, SourceError};

/// Default number of questions per round.
pub const DEFAULT_QUESTION_COUNT: usize = 5;

/// Default latency observed before answering from local data.
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(1500);

pub struct QuestionSource {
    strategies: Vec<Box<dyn QuestionStrategy>>,
    generic: GenericTemplates,
    fallback_delay: Duration,
}

impl QuestionSource {
    /// A source with no strategies: only the generic templates answer.
    pub fn new(generic: GenericTemplates) -> Self {
        Self {
            strategies: Vec::new(),
            generic,
            fallback_delay: DEFAULT_FALLBACK_DELAY,
        }
    }

    /// The standard chain: optional remote generator, curated decks, then
    /// generic templates from `deck`.
    pub fn standard(remote: Option<Box<dyn QuestionStrategy>>, deck: TemplateDeck) -> Self {
        let mut source = Self::new(GenericTemplates::new(deck));
        if let Some(remote) = remote {
            source = source.with_strategy(remote);
        }
        source.with_strategy(Box::new(CuratedStrategy))
    }

    /// Box a generator as a remote strategy for [`QuestionSource::standard`].
    pub fn remote<G: QuestionGenerator + 'static>(generator: G) -> Box<dyn QuestionStrategy> {
        Box::new(RemoteStrategy::new(generator))
    }

    /// Append a strategy to the chain. Strategies are tried in insertion order.
    pub fn with_strategy(mut self, strategy: Box<dyn QuestionStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Set the delay observed before answering from local data.
    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    /// Whether any strategy leaves the process.
    pub fn has_remote(&self) -> bool {
        self.strategies.iter().any(|strategy| !strategy.is_local())
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    pub async fn fetch_questions(&self, topic: &Topic, count: usize) -> QuestionSet {
        let mut remote_failure: Option<String> = None;
        let mut delayed = false;

        for strategy in &self.strategies {
            if strategy.is_local() && !delayed {
                self.local_delay().await;
                delayed = true;
            }

            debug!(strategy = strategy.name(), %topic, count, "Trying question strategy");
            match strategy.fetch(topic, count).await {
                Ok(set) if !set.is_empty() => {
                    info!(
                        strategy = strategy.name(),
                        %topic,
                        provenance = %set.provenance,
                        questions = set.len(),
                        "Questions ready"
                    );
                    return attach_warning(set, remote_failure);
                }
                Ok(_) => {
                    warn!(strategy = strategy.name(), %topic, "Strategy returned no questions");
                }
                Err(SourceError::NoCuratedMatch) => {
                    debug!(strategy = strategy.name(), %topic, "No curated deck for topic");
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), %topic, error = %e, "Question strategy failed");
                    if !strategy.is_local() {
                        remote_failure = Some(e.to_string());
                    }
                }
            }
        }

        if !delayed {
            self.local_delay().await;
        }

        let questions = self.generic.generate(topic, count);
        info!(%topic, questions = questions.len(), "Using generic template questions");
        attach_warning(QuestionSet::new(questions, Provenance::Generic), remote_failure)
    }

    async fn local_delay(&self) {
        if !self.fallback_delay.is_zero() {
            tokio::time::sleep(self.fallback_delay).await;
        }
    }
}

fn attach_warning(set: QuestionSet, remote_failure: Option<String>) -> QuestionSet {
    match remote_failure {
        Some(reason) if set.provenance != Provenance::Generated => {
            set.with_warning(format!("Used fallback due to API error: {}", reason))
        }
        _ => set,
    }
}
