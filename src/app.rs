use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{InputRouter, LoadRequest, Phase, RoundController, key_name};

const MAX_TOPIC_LENGTH: usize = 60;

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    /// A topic was accepted; questions must be fetched for it.
    Load(LoadRequest),
    Quit,
}

/// Interactive state for the terminal game: the round plus the text being
/// typed on the topic screen.
pub struct App {
    pub round: RoundController,
    router: InputRouter,
    topic_input: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            round: RoundController::new(),
            router: InputRouter::new(),
            topic_input: String::new(),
        }
    }

    pub fn topic_input(&self) -> &str {
        &self.topic_input
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }

        match self.round.phase() {
            Phase::TopicEntry => self.handle_topic_input(key.code),
            Phase::Loading => self.handle_loading_input(key.code),
            Phase::QuestionOpen | Phase::QuestionResolved => self.handle_question_input(key.code),
            Phase::RoundComplete => self.handle_result_input(key.code),
        }
    }

    fn handle_topic_input(&mut self, key: KeyCode) -> KeyOutcome {
        match key {
            KeyCode::Enter => match self.round.submit_topic(&self.topic_input) {
                Ok(request) => KeyOutcome::Load(request),
                Err(_) => KeyOutcome::Continue,
            },
            KeyCode::Char(c) => {
                if self.topic_input.chars().count() < MAX_TOPIC_LENGTH {
                    self.topic_input.push(c);
                }
                KeyOutcome::Continue
            }
            KeyCode::Backspace => {
                self.topic_input.pop();
                KeyOutcome::Continue
            }
            KeyCode::Esc => KeyOutcome::Quit,
            _ => KeyOutcome::Continue,
        }
    }

    fn handle_loading_input(&mut self, key: KeyCode) -> KeyOutcome {
        if key == KeyCode::Esc {
            self.round.cancel_loading();
        }
        KeyOutcome::Continue
    }

    fn handle_question_input(&mut self, key: KeyCode) -> KeyOutcome {
        if key == KeyCode::Esc {
            return KeyOutcome::Quit;
        }
        if let Some(name) = key_name(key) {
            self.router.on_key(&name, &mut self.round);
        }
        KeyOutcome::Continue
    }

    fn handle_result_input(&mut self, key: KeyCode) -> KeyOutcome {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                if self.round.replay().is_ok() {
                    self.topic_input.clear();
                }
                KeyOutcome::Continue
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyOutcome::Quit,
            _ => KeyOutcome::Continue,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
