//! # duel-trivia
//!
//! Two-player trivia on a shared keyboard. Questions for any topic come from
//! a remote language model when one is configured, and from curated or
//! generic local decks otherwise.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use duel_trivia::{Game, QuestionSource, TemplateDeck, TriviaError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), TriviaError> {
//!     let source = QuestionSource::standard(None, TemplateDeck::Fixed);
//!     Game::new(source, 5).run().await
//! }
//! ```
//!
//! The same [`QuestionSource`] backs the HTTP endpoint in [`server`].

mod app;
pub mod config;
mod data;
pub mod game;
pub mod llm;
pub mod models;
pub mod protocol;
pub mod server;
pub mod source;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info};

pub use app::{App, KeyOutcome};
pub use data::{
    CURATED_TOPICS, GenericTemplates, TemplateDeck, ValidationError, curated_questions, validator,
};
pub use game::{InputRouter, LoadRequest, Phase, RoundController};
pub use models::{Provenance, QuestionRecord, QuestionSet, Topic};
pub use source::QuestionSource;

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for running the terminal game.
#[derive(Debug, Error)]
pub enum TriviaError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result of a background question fetch, tagged with its load ticket.
enum LoadEvent {
    Ready { ticket: u64, set: QuestionSet },
    Failed { ticket: u64 },
}

/// A terminal game session.
pub struct Game {
    app: App,
    source: Arc<QuestionSource>,
    question_count: usize,
}

impl Game {
    /// Create a session that asks `source` for `question_count` questions per round.
    pub fn new(source: QuestionSource, question_count: usize) -> Self {
        Self {
            app: App::new(),
            source: Arc::new(source),
            question_count,
        }
    }

    /// Take over the terminal and play until a player quits.
    pub async fn run(mut self) -> Result<(), TriviaError> {
        let mut term = terminal::init()?;
        let result = self.event_loop(&mut term).await;
        terminal::restore()?;
        result
    }

    async fn event_loop(&mut self, term: &mut terminal::AppTerminal) -> Result<(), TriviaError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<LoadEvent>();
        let mut last_tick = Instant::now();
        let mut epoch = self.app.round.timer_epoch();

        loop {
            term.draw(|frame| ui::render(frame, &self.app))?;

            while let Ok(load) = rx.try_recv() {
                match load {
                    LoadEvent::Ready { ticket, set } => {
                        self.app.round.questions_loaded(ticket, set);
                    }
                    LoadEvent::Failed { ticket } => {
                        self.app.round.load_failed(ticket);
                    }
                }
            }

            // Each newly scheduled task counts from the moment it was scheduled.
            if self.app.round.timer_epoch() != epoch {
                epoch = self.app.round.timer_epoch();
                last_tick = Instant::now();
            }
            if last_tick.elapsed() >= TICK_INTERVAL {
                last_tick = Instant::now();
                self.app.round.tick();
                epoch = self.app.round.timer_epoch();
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match self.app.handle_key(key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Load(request) => self.spawn_load(request, tx.clone()),
                KeyOutcome::Quit => break,
            }
        }

        info!("Game closed");
        Ok(())
    }

    fn spawn_load(&self, request: LoadRequest, tx: mpsc::UnboundedSender<LoadEvent>) {
        let source = Arc::clone(&self.source);
        let count = self.question_count;

        tokio::spawn(async move {
            let LoadRequest { ticket, topic } = request;
            let fetch = tokio::spawn(async move { source.fetch_questions(&topic, count).await });
            let event = match fetch.await {
                Ok(set) => LoadEvent::Ready { ticket, set },
                Err(e) => {
                    error!(ticket, error = %e, "Question fetch task failed");
                    LoadEvent::Failed { ticket }
                }
            };
            // The receiver is gone once the game has closed.
            let _ = tx.send(event);
        });
    }
}
