//! The round lifecycle state machine.
//!
//! `TopicEntry -> Loading -> QuestionOpen -> QuestionResolved -> ... ->
//! RoundComplete -> TopicEntry`. All round state lives in [`RoundState`] and
//! is only mutated through [`RoundController`] methods. Time advances through
//! [`RoundController::tick`], one unit per call.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::timer::{Scheduled, TaskKind, TimerEvent, TimerSlot};
use crate::models::{
    ANSWER_COUNT, EMPTY_TOPIC_MESSAGE, Outcome, Player, Provenance, QuestionRecord, QuestionSet,
    Scores, Selections, Topic, TopicError,
};

/// Time units each question stays open.
pub const QUESTION_TIME: u32 = 15;

/// Time units the resolved question stays on screen.
pub const REVEAL_DELAY: u32 = 3;

pub const TRY_AGAIN_MESSAGE: &str =
    "Sorry, there was an error generating questions. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    TopicEntry,
    Loading,
    QuestionOpen,
    QuestionResolved,
    RoundComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error(transparent)]
    Topic(#[from] TopicError),

    #[error("cannot {action} during {phase:?}")]
    WrongPhase { action: &'static str, phase: Phase },
}

/// Handed to the caller when a topic is accepted. The matching
/// [`RoundController::questions_loaded`] call must carry the same ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: u64,
    pub topic: Topic,
}

/// How one answer option should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    Neutral,
    Correct,
    Incorrect,
}

/// Summary of a resolved question, kept for the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuestion {
    pub question_id: u32,
    pub correct_index: usize,
    pub selections: Selections,
}

impl ResolvedQuestion {
    pub fn was_correct(&self, player: Player) -> bool {
        self.selections.get(player) == Some(self.correct_index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoundState {
    pub topic: Option<Topic>,
    pub questions: Vec<QuestionRecord>,
    pub provenance: Option<Provenance>,
    pub current_index: usize,
    pub scores: Scores,
    pub selections: Selections,
    /// Set once the current question is resolved; guards against double scoring.
    pub answered: bool,
    pub time_remaining: u32,
    pub in_progress: bool,
    pub history: Vec<ResolvedQuestion>,
}

pub struct RoundController {
    phase: Phase,
    state: RoundState,
    timer: TimerSlot,
    notice: Option<String>,
    outcome: Option<Outcome>,
    next_ticket: u64,
    pending_ticket: Option<u64>,
}

impl RoundController {
    /// Create a controller waiting for a topic.
    pub fn new() -> Self {
        Self {
            phase: Phase::TopicEntry,
            state: RoundState::default(),
            timer: TimerSlot::new(),
            notice: None,
            outcome: None,
            next_ticket: 0,
            pending_ticket: None,
        }
    }

    /// Current phase of the round.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only view of the round state. Only the controller mutates it.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// User-visible message for the topic screen, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Winner or tie, once the round is complete.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The question on screen, while one is open or being revealed.
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        match self.phase {
            Phase::QuestionOpen | Phase::QuestionResolved => {
                self.state.questions.get(self.state.current_index)
            }
            _ => None,
        }
    }

    /// The scheduled countdown or advance, if any.
    pub fn pending_timer(&self) -> Option<Scheduled> {
        self.timer.pending()
    }

    pub fn timer_epoch(&self) -> u64 {
        self.timer.epoch()
    }

    /// `TopicEntry -> Loading`. A blank topic leaves the phase unchanged and
    /// sets the validation notice.
    pub fn submit_topic(&mut self, raw: &str) -> Result<LoadRequest, RoundError> {
        self.expect_phase(Phase::TopicEntry, "submit a topic")?;

        let topic = match Topic::parse(raw) {
            Ok(topic) => topic,
            Err(e) => {
                self.notice = Some(EMPTY_TOPIC_MESSAGE.to_string());
                return Err(e.into());
            }
        };

        self.timer.cancel();
        self.next_ticket += 1;
        self.pending_ticket = Some(self.next_ticket);
        self.notice = None;
        self.state.topic = Some(topic.clone());
        self.phase = Phase::Loading;
        info!(%topic, ticket = self.next_ticket, "Loading questions");

        Ok(LoadRequest {
            ticket: self.next_ticket,
            topic,
        })
    }

    /// `Loading -> QuestionOpen`. Results for a stale ticket are ignored.
    pub fn questions_loaded(&mut self, ticket: u64, set: QuestionSet) -> bool {
        if !self.is_pending(ticket) {
            debug!(ticket, "Ignoring stale question set");
            return false;
        }
        if set.is_empty() {
            warn!(ticket, "Question source returned an empty set");
            return self.load_failed(ticket);
        }
        if let Some(warning) = &set.warning {
            warn!(%warning, "Questions came from a fallback source");
        }

        self.pending_ticket = None;
        self.state.questions = set.questions;
        self.state.provenance = Some(set.provenance);
        self.state.scores = Scores::default();
        self.state.current_index = 0;
        self.state.history.clear();
        self.state.in_progress = true;
        self.start_question();
        true
    }

    /// `Loading -> TopicEntry` with the "try again" notice.
    pub fn load_failed(&mut self, ticket: u64) -> bool {
        if !self.is_pending(ticket) {
            return false;
        }
        self.clear();
        self.notice = Some(TRY_AGAIN_MESSAGE.to_string());
        true
    }

    /// Abandon a pending load and return to topic entry.
    pub fn cancel_loading(&mut self) -> bool {
        if self.phase != Phase::Loading {
            return false;
        }
        self.clear();
        true
    }

    /// Record a player's pick for the open question. Returns false when the
    /// pick is not accepted: the question is not open, the player already
    /// picked, or the index is out of range.
    pub fn select(&mut self, player: Player, answer_index: usize) -> bool {
        if self.phase != Phase::QuestionOpen || self.state.answered || answer_index >= ANSWER_COUNT {
            return false;
        }
        if !self.state.selections.record(player, answer_index) {
            return false;
        }

        debug!(player = player.label(), answer_index, "Selection recorded");
        if self.state.selections.both_selected() {
            self.resolve();
        }
        true
    }

    /// Advance time by one unit.
    pub fn tick(&mut self) {
        match self.timer.tick() {
            Some(TimerEvent::Tick {
                kind: TaskKind::Countdown,
                remaining,
            }) => self.state.time_remaining = remaining,
            Some(TimerEvent::Tick {
                kind: TaskKind::Advance,
                ..
            }) => {}
            Some(TimerEvent::Fired(TaskKind::Countdown)) => {
                self.state.time_remaining = 0;
                self.resolve();
            }
            Some(TimerEvent::Fired(TaskKind::Advance)) => self.advance(),
            None => {}
        }
    }

    /// `RoundComplete -> TopicEntry`.
    pub fn replay(&mut self) -> Result<(), RoundError> {
        self.expect_phase(Phase::RoundComplete, "replay")?;
        self.clear();
        Ok(())
    }

    /// Per-option marks for the current question. Everything is neutral
    /// until the question is resolved.
    pub fn answer_marks(&self) -> [AnswerMark; ANSWER_COUNT] {
        let mut marks = [AnswerMark::Neutral; ANSWER_COUNT];
        let Some(question) = self.current_question() else {
            return marks;
        };
        if !self.state.answered {
            return marks;
        }

        for player in Player::ALL {
            if let Some(index) = self.state.selections.get(player) {
                marks[index] = AnswerMark::Incorrect;
            }
        }
        marks[question.correct_index()] = AnswerMark::Correct;
        marks
    }

    fn start_question(&mut self) {
        self.state.selections = Selections::default();
        self.state.answered = false;
        self.state.time_remaining = QUESTION_TIME;
        self.phase = Phase::QuestionOpen;
        self.timer.start(TaskKind::Countdown, QUESTION_TIME);
    }

    /// `QuestionOpen -> QuestionResolved`. Idempotent.
    fn resolve(&mut self) {
        if self.state.answered || self.phase != Phase::QuestionOpen {
            return;
        }
        self.state.answered = true;
        self.timer.cancel();

        let Some(question) = self.state.questions.get(self.state.current_index) else {
            return;
        };
        let correct_index = question.correct_index();
        let question_id = question.id();

        for player in Player::ALL {
            if let Some(index) = self.state.selections.get(player)
                && question.is_correct(index)
            {
                self.state.scores.award(player);
            }
        }
        self.state.history.push(ResolvedQuestion {
            question_id,
            correct_index,
            selections: self.state.selections,
        });

        debug!(
            question = self.state.current_index + 1,
            player1 = self.state.scores.player1,
            player2 = self.state.scores.player2,
            "Question resolved"
        );
        self.phase = Phase::QuestionResolved;
        self.timer.start(TaskKind::Advance, REVEAL_DELAY);
    }

    fn advance(&mut self) {
        if self.phase != Phase::QuestionResolved {
            return;
        }

        if self.state.current_index + 1 < self.state.questions.len() {
            self.state.current_index += 1;
            self.start_question();
            return;
        }

        self.timer.cancel();
        self.state.in_progress = false;
        self.phase = Phase::RoundComplete;
        let outcome = Outcome::from_scores(&self.state.scores);
        info!(
            player1 = self.state.scores.player1,
            player2 = self.state.scores.player2,
            result = %outcome.headline(),
            "Round complete"
        );
        self.outcome = Some(outcome);
    }

    fn clear(&mut self) {
        self.timer.cancel();
        self.state = RoundState::default();
        self.phase = Phase::TopicEntry;
        self.outcome = None;
        self.notice = None;
        self.pending_ticket = None;
    }

    fn is_pending(&self, ticket: u64) -> bool {
        self.phase == Phase::Loading && self.pending_ticket == Some(ticket)
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), RoundError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RoundError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}
