//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::data::TemplateDeck;
use crate::llm::{ApiServerGenerator, DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiGenerator};
use crate::protocol::DEFAULT_PORT;
use crate::source::{DEFAULT_FALLBACK_DELAY, DEFAULT_QUESTION_COUNT, QuestionSource};

/// Value shipped in sample `.env` files; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

#[derive(Parser, Debug)]
#[command(name = "duel-trivia")]
#[command(version, about = "Two-player trivia on one keyboard, on any topic")]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// OpenAI API key; leave unset to play from local question decks
    #[arg(long, env = "OPENAI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat model used for question generation
    #[arg(long, env = "OPENAI_MODEL", global = true, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of questions per round
    #[arg(
        long,
        env = "QUESTIONS_PER_GAME",
        global = true,
        default_value_t = DEFAULT_QUESTION_COUNT as u16,
        value_parser = clap::value_parser!(u16).range(1..=20)
    )]
    pub questions: u16,

    /// Delay in milliseconds before answering from local decks
    #[arg(
        long,
        env = "FALLBACK_DELAY_MS",
        global = true,
        default_value_t = DEFAULT_FALLBACK_DELAY.as_millis() as u64
    )]
    pub fallback_delay_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a round in the terminal
    Play {
        /// Fetch questions from a running duel-trivia server instead of OpenAI
        #[arg(short, long, value_name = "URL")]
        server: Option<String>,

        /// Write logs to this file
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,
    },
    /// Serve the question generation API over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Directory of static files served alongside the API
        #[arg(long, env = "STATIC_DIR", value_name = "DIR")]
        static_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// The API key, if one is usable.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn question_count(&self) -> usize {
        usize::from(self.questions)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    fn openai(&self) -> Option<OpenAiGenerator> {
        self.credential().map(|key| {
            OpenAiGenerator::new(key)
                .with_model(self.model.clone())
                .with_base_url(self.base_url.clone())
        })
    }

    /// Question source for the terminal game.
    ///
    /// A `--server` URL takes precedence over a local API key.
    pub fn play_source(&self, server: Option<&str>) -> QuestionSource {
        let remote = match server {
            Some(url) => Some(QuestionSource::remote(ApiServerGenerator::new(url))),
            None => self.openai().map(QuestionSource::remote),
        };
        QuestionSource::standard(remote, TemplateDeck::Fixed).with_fallback_delay(self.fallback_delay())
    }

    /// Question source for the HTTP endpoint.
    pub fn serve_source(&self) -> QuestionSource {
        let remote = self.openai().map(QuestionSource::remote);
        QuestionSource::standard(remote, TemplateDeck::Sampled)
            .with_fallback_delay(self.fallback_delay())
    }
}
