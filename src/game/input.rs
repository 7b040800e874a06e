//! Keyboard routing for the two players.
//!
//! Keys are matched by lower-cased name (`"w"`, `"arrowup"`, ...) so the
//! table does not depend on the terminal backend.

use crossterm::event::KeyCode;

use super::round::RoundController;
use crate::models::{Player, Selection};

pub struct KeyBinding {
    pub key: &'static str,
    pub player: Player,
    pub answer_index: usize,
}

const fn bind(key: &'static str, player: Player, answer_index: usize) -> KeyBinding {
    KeyBinding {
        key,
        player,
        answer_index,
    }
}

/// Player 1 uses WASD, player 2 the arrow keys. Up/left/down/right map to
/// answers A/B/C/D for both.
pub const KEY_BINDINGS: [KeyBinding; 8] = [
    bind("w", Player::One, 0),
    bind("a", Player::One, 1),
    bind("s", Player::One, 2),
    bind("d", Player::One, 3),
    bind("arrowup", Player::Two, 0),
    bind("arrowleft", Player::Two, 1),
    bind("arrowdown", Player::Two, 2),
    bind("arrowright", Player::Two, 3),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct InputRouter;

impl InputRouter {
    pub fn new() -> Self {
        Self
    }

    /// Map a raw key name to a selection without touching any state.
    pub fn lookup(&self, raw_key: &str) -> Option<Selection> {
        let key = raw_key.to_lowercase();
        KEY_BINDINGS
            .iter()
            .find(|binding| binding.key == key)
            .map(|binding| Selection {
                player: binding.player,
                answer_index: binding.answer_index,
            })
    }

    /// Route a key press into the round. Returns the selection only when the
    /// round accepted it; unmapped keys and presses outside an open question
    /// are silently ignored.
    pub fn on_key(&self, raw_key: &str, round: &mut RoundController) -> Option<Selection> {
        let selection = self.lookup(raw_key)?;
        round
            .select(selection.player, selection.answer_index)
            .then_some(selection)
    }

    /// Key names of a player's four answer keys, in answer order.
    pub fn keys_for(&self, player: Player) -> [&'static str; 4] {
        let mut keys = [""; 4];
        for binding in KEY_BINDINGS.iter().filter(|binding| binding.player == player) {
            keys[binding.answer_index] = binding.key;
        }
        keys
    }
}

/// Name of a terminal key in the routing table's vocabulary.
pub fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(c) => Some(c.to_lowercase().to_string()),
        KeyCode::Up => Some("arrowup".to_string()),
        KeyCode::Down => Some("arrowdown".to_string()),
        KeyCode::Left => Some("arrowleft".to_string()),
        KeyCode::Right => Some("arrowright".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::round::Phase;
    use crate::models::{Provenance, QuestionRecord, QuestionSet};

    fn open_round() -> RoundController {
        let mut round = RoundController::new();
        let request = round.submit_topic("science").unwrap();
        let questions = vec![
            QuestionRecord::with_first_correct(1, "Q1", ["a", "b", "c", "d"]),
            QuestionRecord::with_first_correct(2, "Q2", ["a", "b", "c", "d"]),
        ];
        round.questions_loaded(request.ticket, QuestionSet::new(questions, Provenance::Curated));
        round
    }

    #[test]
    fn test_lookup_table() {
        let router = InputRouter::new();
        assert_eq!(
            router.lookup("W"),
            Some(Selection {
                player: Player::One,
                answer_index: 0
            })
        );
        assert_eq!(
            router.lookup("ArrowRight"),
            Some(Selection {
                player: Player::Two,
                answer_index: 3
            })
        );
        assert_eq!(router.lookup("q"), None);
        assert_eq!(router.lookup("enter"), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::Char('D')).as_deref(), Some("d"));
        assert_eq!(key_name(KeyCode::Left).as_deref(), Some("arrowleft"));
        assert_eq!(key_name(KeyCode::Enter), None);
    }

    #[test]
    fn test_keys_for_players() {
        let router = InputRouter::new();
        assert_eq!(router.keys_for(Player::One), ["w", "a", "s", "d"]);
        assert_eq!(
            router.keys_for(Player::Two),
            ["arrowup", "arrowleft", "arrowdown", "arrowright"]
        );
    }

    #[test]
    fn test_repeat_press_is_noop() {
        let router = InputRouter::new();
        let mut round = open_round();

        assert!(router.on_key("s", &mut round).is_some());
        assert!(router.on_key("w", &mut round).is_none());
        assert_eq!(round.state().selections.player1, Some(2));
        assert_eq!(round.state().scores.player1, 0);
        assert_eq!(round.phase(), Phase::QuestionOpen);
    }

    #[test]
    fn test_both_players_resolve_question() {
        let router = InputRouter::new();
        let mut round = open_round();

        router.on_key("w", &mut round);
        router.on_key("arrowdown", &mut round);

        assert_eq!(round.phase(), Phase::QuestionResolved);
        assert_eq!(round.state().scores.player1, 1);
        assert_eq!(round.state().scores.player2, 0);
    }

    #[test]
    fn test_keys_ignored_outside_open_question() {
        let router = InputRouter::new();
        let mut round = RoundController::new();
        assert!(router.on_key("w", &mut round).is_none());
        assert_eq!(round.state().selections.player1, None);

        let mut round = open_round();
        assert!(router.on_key("x", &mut round).is_none());
        assert_eq!(round.state().selections, Default::default());
    }
}
