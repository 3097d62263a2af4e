//! Results of guesses and of completed games.

use serde::{Deserialize, Serialize};

use crate::core::Symbol;

/// The first guess that did not match the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// 0-based position in the sequence.
    pub position: usize,
    /// Symbol the sequence holds at `position`.
    pub expected: Symbol,
    /// Symbol the player gave.
    pub actual: Symbol,
}

/// Result of submitting one guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Matches; more symbols are needed this round.
    Correct,
    /// Matches and completes the round.
    RoundComplete,
    /// Does not match. The game is over.
    Mismatch(Mismatch),
}

impl GuessOutcome {
    /// Check if this guess ended the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, GuessOutcome::Mismatch(_))
    }
}

/// Summary of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Number of fully completed rounds (sequence length at failure minus one).
    pub score: u32,

    /// Full sequence at the time of failure.
    pub sequence: Vec<Symbol>,

    /// Guesses of the failed round, including the wrong one.
    pub guesses: Vec<Symbol>,

    /// Where the failed round went wrong.
    pub mismatch: Mismatch,
}

impl GameOutcome {
    /// Round the game ended in (1-based).
    #[must_use]
    pub fn final_round(&self) -> usize {
        self.sequence.len()
    }
}
