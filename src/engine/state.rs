//! The sequence game state machine.
//!
//! `SequenceGame` owns the Sequence and the Guess buffer and applies the
//! transition rules. It performs no I/O: symbols come in as arguments, so
//! every rule can be exercised without hardware or a runner.
//!
//! ## Lifecycle
//!
//! ```text
//! AwaitingStart --start(s)--> Playback --finish_playback()--> Collecting
//!       ^                        ^                                |
//!       |                        +------begin_round(s)------------+ (round complete)
//!    reset()                                                      |
//!       +--------------------- Finished <--------submit(mismatch)-+
//! ```

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameConfig, Symbol};
use crate::error::{GameError, StateError};

use super::outcome::{GameOutcome, GuessOutcome, Mismatch};

/// Phase of a single game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start signal.
    AwaitingStart,
    /// The whole sequence is being shown. No input is accepted.
    Playback,
    /// Gestures are being collected and matched.
    Collecting,
    /// The player made a mistake. Terminal until `reset`.
    Finished,
}

/// Sequence memory game state.
///
/// The Sequence uses `im::Vector` so per-round snapshots are O(1) clones.
///
/// Deserialization is checked: a state that no run of transitions could
/// reach is rejected with [`StateError`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct SequenceGame {
    symbol_count: u8,
    phase: GamePhase,
    sequence: Vector<Symbol>,
    guesses: SmallVec<[Symbol; 16]>,
    mismatch: Option<Mismatch>,
}

impl SequenceGame {
    /// Create a game over an alphabet of `symbol_count` symbols.
    ///
    /// # Panics
    ///
    /// Panics if `symbol_count` is zero.
    #[must_use]
    pub fn new(symbol_count: u8) -> Self {
        assert!(symbol_count > 0, "Must have at least 1 symbol");

        Self {
            symbol_count,
            phase: GamePhase::AwaitingStart,
            sequence: Vector::new(),
            guesses: SmallVec::new(),
            mismatch: None,
        }
    }

    /// Create a game from a validated configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::new(config.symbol_count))
    }

    // === Accessors ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Alphabet size.
    #[must_use]
    pub fn symbol_count(&self) -> u8 {
        self.symbol_count
    }

    /// The sequence so far.
    #[must_use]
    pub fn sequence(&self) -> &Vector<Symbol> {
        &self.sequence
    }

    /// O(1) copy of the sequence, for callers that keep per-round history.
    #[must_use]
    pub fn sequence_snapshot(&self) -> Vector<Symbol> {
        self.sequence.clone()
    }

    /// Guesses collected in the current round.
    #[must_use]
    pub fn guesses(&self) -> &[Symbol] {
        &self.guesses
    }

    /// Current round (1-based). Zero before the game starts.
    #[must_use]
    pub fn round(&self) -> usize {
        self.sequence.len()
    }

    /// True once the Guess buffer matches the whole sequence and the next
    /// symbol has not been appended yet.
    #[must_use]
    pub fn round_complete(&self) -> bool {
        self.phase == GamePhase::Collecting && self.guesses.len() == self.sequence.len()
    }

    /// The mismatch that ended the game, if any.
    #[must_use]
    pub fn mismatch(&self) -> Option<Mismatch> {
        self.mismatch
    }

    /// Final score. `None` until the game is finished.
    #[must_use]
    pub fn score(&self) -> Option<u32> {
        match self.phase {
            GamePhase::Finished => Some(self.completed_rounds()),
            _ => None,
        }
    }

    /// Rounds fully reproduced so far.
    #[must_use]
    pub fn completed_rounds(&self) -> u32 {
        let completed = if self.round_complete() {
            self.sequence.len()
        } else {
            self.sequence.len().saturating_sub(1)
        };
        u32::try_from(completed).unwrap_or(u32::MAX)
    }

    /// Summary of the game once finished.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        let mismatch = self.mismatch?;
        let score = self.score()?;
        Some(GameOutcome {
            score,
            sequence: self.sequence.iter().copied().collect(),
            guesses: self.guesses.to_vec(),
            mismatch,
        })
    }

    // === Transitions ===

    /// Start the game with its first symbol.
    pub fn start(&mut self, first: Symbol) -> Result<(), GameError> {
        self.expect_phase(GamePhase::AwaitingStart)?;
        self.append(first);
        self.phase = GamePhase::Playback;
        Ok(())
    }

    /// Mark the current playback as done and open the Guess buffer.
    pub fn finish_playback(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Playback)?;
        self.guesses.clear();
        self.phase = GamePhase::Collecting;
        Ok(())
    }

    /// Submit one recognised gesture.
    ///
    /// The guess is checked against the same position of the sequence right
    /// away; a wrong symbol finishes the game even if later guesses would
    /// have matched.
    pub fn submit(&mut self, symbol: Symbol) -> Result<GuessOutcome, GameError> {
        self.expect_phase(GamePhase::Collecting)?;
        if self.round_complete() {
            return Err(GameError::RoundPending);
        }
        debug_assert!(
            symbol.is_valid(self.symbol_count),
            "gesture source returned {} outside alphabet of {}",
            symbol,
            self.symbol_count
        );

        let position = self.guesses.len();
        let expected = self.sequence[position];
        self.guesses.push(symbol);

        if symbol != expected {
            let mismatch = Mismatch {
                position,
                expected,
                actual: symbol,
            };
            debug!(
                "Mismatch at position {} of round {}: expected {}, got {}",
                position,
                self.round(),
                expected,
                symbol
            );
            self.mismatch = Some(mismatch);
            self.phase = GamePhase::Finished;
            return Ok(GuessOutcome::Mismatch(mismatch));
        }

        if self.guesses.len() == self.sequence.len() {
            Ok(GuessOutcome::RoundComplete)
        } else {
            Ok(GuessOutcome::Correct)
        }
    }

    /// Apply one gesture sample. `None` changes nothing.
    pub fn sample(&mut self, gesture: Option<Symbol>) -> Result<Option<GuessOutcome>, GameError> {
        self.expect_phase(GamePhase::Collecting)?;
        match gesture {
            Some(symbol) => self.submit(symbol).map(Some),
            None => Ok(None),
        }
    }

    /// Append the next symbol after a completed round and go back to playback.
    pub fn begin_round(&mut self, next: Symbol) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Collecting)?;
        if !self.round_complete() {
            return Err(GameError::RoundIncomplete {
                matched: self.guesses.len(),
                required: self.sequence.len(),
            });
        }
        self.append(next);
        self.phase = GamePhase::Playback;
        Ok(())
    }

    /// Discard the current game and wait for a new start signal.
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.guesses.clear();
        self.mismatch = None;
        self.phase = GamePhase::AwaitingStart;
    }

    fn append(&mut self, symbol: Symbol) {
        debug_assert!(
            symbol.is_valid(self.symbol_count),
            "symbol source returned {} outside alphabet of {}",
            symbol,
            self.symbol_count
        );
        self.sequence.push_back(symbol);
        debug!("Round {} begins", self.sequence.len());
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}

/// Unchecked wire form of [`SequenceGame`].
#[derive(Deserialize)]
struct GameRecord {
    symbol_count: u8,
    phase: GamePhase,
    sequence: Vector<Symbol>,
    guesses: SmallVec<[Symbol; 16]>,
    mismatch: Option<Mismatch>,
}

impl TryFrom<GameRecord> for SequenceGame {
    type Error = StateError;

    fn try_from(record: GameRecord) -> Result<Self, StateError> {
        let GameRecord {
            symbol_count,
            phase,
            sequence,
            guesses,
            mismatch,
        } = record;

        if symbol_count == 0 {
            return Err(StateError::EmptyAlphabet);
        }
        if let Some(&symbol) = sequence.iter().chain(guesses.iter()).find(|s| !s.is_valid(symbol_count)) {
            return Err(StateError::SymbolOutOfRange { symbol, symbol_count });
        }

        match phase {
            GamePhase::AwaitingStart => {
                if !sequence.is_empty() || !guesses.is_empty() || mismatch.is_some() {
                    return Err(StateError::StaleStart);
                }
            }
            _ if sequence.is_empty() => return Err(StateError::EmptySequence(phase)),
            _ => {}
        }

        if guesses.len() > sequence.len() {
            return Err(StateError::TooManyGuesses {
                guesses: guesses.len(),
                sequence: sequence.len(),
            });
        }
        if mismatch.is_some() != (phase == GamePhase::Finished) {
            return Err(StateError::MismatchPhase);
        }

        // Every guess matches the sequence except the final one of a lost game
        let matched = match mismatch {
            Some(m) => {
                let last = guesses.len().checked_sub(1).ok_or(StateError::InconsistentMismatch)?;
                let consistent = m.position == last
                    && m.expected == sequence[last]
                    && m.actual == guesses[last]
                    && m.actual != m.expected;
                if !consistent {
                    return Err(StateError::InconsistentMismatch);
                }
                last
            }
            None => guesses.len(),
        };
        if let Some(position) = (0..matched).find(|&i| guesses[i] != sequence[i]) {
            return Err(StateError::DivergentGuess(position));
        }

        Ok(Self {
            symbol_count,
            phase,
            sequence,
            guesses,
            mismatch,
        })
    }
}
