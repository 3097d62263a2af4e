//! A simulated player for demos and benchmarks.
//!
//! The player watches playback through its `PlayerEyes` sink and repeats what
//! it saw through its `PlayerHands` gesture source. It makes a single mistake,
//! on the last symbol of a chosen round, so every simulated game terminates.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::trace;

use crate::core::{Symbol, SymbolRng};

use super::traits::{GestureSource, PlaybackSink};

#[derive(Debug)]
struct Memory {
    symbol_count: u8,
    fail_round: usize,
    hesitation: usize,
    watching: bool,
    round: usize,
    seen: Vec<Symbol>,
    cursor: usize,
    waited: usize,
}

/// Handle shared by a simulated player's eyes and hands.
#[derive(Clone, Debug)]
pub struct SimulatedPlayer {
    memory: Rc<RefCell<Memory>>,
}

impl SimulatedPlayer {
    /// A player that fails on `fail_round` (1-based).
    ///
    /// With a single-symbol alphabet a wrong gesture does not exist, so the
    /// player never fails.
    pub fn new(symbol_count: u8, fail_round: usize) -> Self {
        Self {
            memory: Rc::new(RefCell::new(Memory {
                symbol_count,
                fail_round,
                hesitation: 0,
                watching: false,
                round: 0,
                seen: Vec::new(),
                cursor: 0,
                waited: 0,
            })),
        }
    }

    /// A player whose failing round is drawn uniformly from `1..=max_round`.
    pub fn random(symbol_count: u8, max_round: usize, rng: &mut SymbolRng) -> Self {
        let fail_round = rng.gen_range_usize(1..max_round.max(1) + 1);
        Self::new(symbol_count, fail_round)
    }

    /// Report no gesture for `polls` polls before each gesture.
    #[must_use]
    pub fn with_hesitation(self, polls: usize) -> Self {
        self.memory.borrow_mut().hesitation = polls;
        self
    }

    /// Round on which this player will make its mistake.
    #[must_use]
    pub fn fail_round(&self) -> usize {
        self.memory.borrow().fail_round
    }

    /// Change the failing round, e.g. before a new game.
    pub fn set_fail_round(&self, fail_round: usize) {
        self.memory.borrow_mut().fail_round = fail_round;
    }

    /// Sink half: observes playback.
    #[must_use]
    pub fn eyes(&self) -> PlayerEyes {
        PlayerEyes {
            memory: Rc::clone(&self.memory),
        }
    }

    /// Gesture half: repeats what was observed.
    #[must_use]
    pub fn hands(&self) -> PlayerHands {
        PlayerHands {
            memory: Rc::clone(&self.memory),
        }
    }
}

/// Playback sink of a `SimulatedPlayer`.
#[derive(Clone, Debug)]
pub struct PlayerEyes {
    memory: Rc<RefCell<Memory>>,
}

impl PlaybackSink for PlayerEyes {
    fn render(&mut self, symbol: Symbol, _duration: Duration) {
        let mut memory = self.memory.borrow_mut();
        if memory.watching {
            memory.seen.push(symbol);
        }
    }

    fn begin_playback(&mut self, round: usize) {
        let mut memory = self.memory.borrow_mut();
        memory.watching = true;
        memory.round = round;
        memory.seen.clear();
        memory.cursor = 0;
        memory.waited = 0;
    }

    fn prompt(&mut self) {
        self.memory.borrow_mut().watching = false;
    }
}

/// Gesture source of a `SimulatedPlayer`.
#[derive(Clone, Debug)]
pub struct PlayerHands {
    memory: Rc<RefCell<Memory>>,
}

impl GestureSource for PlayerHands {
    fn sample_gesture(&mut self) -> Option<Symbol> {
        let mut memory = self.memory.borrow_mut();
        if memory.watching {
            return None;
        }
        if memory.waited < memory.hesitation {
            memory.waited += 1;
            return None;
        }

        let recalled = *memory.seen.get(memory.cursor)?;
        memory.cursor += 1;
        memory.waited = 0;

        let last = memory.cursor == memory.seen.len();
        if last && memory.round == memory.fail_round && memory.symbol_count > 1 {
            let wrong = Symbol((recalled.0 + 1) % memory.symbol_count);
            trace!("Simulated player errs in round {}: {} instead of {}", memory.round, wrong, recalled);
            return Some(wrong);
        }
        Some(recalled)
    }
}
