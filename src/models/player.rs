/// One of the two players sharing the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub fn label(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }
}

/// A player's pick for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub player: Player,
    pub answer_index: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub player1: u32,
    pub player2: u32,
}

impl Scores {
    /// Get a player's score.
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Add one point for a correct answer.
    pub fn award(&mut self, player: Player) {
        match player {
            Player::One => self.player1 += 1,
            Player::Two => self.player2 += 1,
        }
    }
}

/// Per-question selections, at most one per player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selections {
    pub player1: Option<usize>,
    pub player2: Option<usize>,
}

impl Selections {
    /// Get a player's pick for the current question.
    pub fn get(&self, player: Player) -> Option<usize> {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    fn slot(&mut self, player: Player) -> &mut Option<usize> {
        match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        }
    }

    /// Record a pick. Returns false if the player already picked.
    pub fn record(&mut self, player: Player, answer_index: usize) -> bool {
        let slot = self.slot(player);
        if slot.is_some() {
            return false;
        }
        *slot = Some(answer_index);
        true
    }

    pub fn both_selected(&self) -> bool {
        self.player1.is_some() && self.player2.is_some()
    }
}

/// Result of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

impl Outcome {
    pub fn from_scores(scores: &Scores) -> Self {
        use std::cmp::Ordering;

        match scores.player1.cmp(&scores.player2) {
            Ordering::Greater => Outcome::Winner(Player::One),
            Ordering::Less => Outcome::Winner(Player::Two),
            Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn headline(&self) -> String {
        match self {
            Outcome::Winner(player) => format!("{} Wins!", player.label()),
            Outcome::Tie => "It's a Tie!".to_string(),
        }
    }
}
