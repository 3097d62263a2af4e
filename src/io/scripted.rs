//! Scripted and recording collaborators.
//!
//! Deterministic stand-ins for hardware. Each keeps its observations behind a
//! shared handle, so a clone kept by the caller can inspect what the runner
//! did after the original has been moved into it.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::core::Symbol;

use super::traits::{Clock, GestureSource, PlaybackSink, ScoreReporter, StartSignal, SymbolSource};

// =============================================================================
// Inputs
// =============================================================================

/// Symbol source that replays a fixed script, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedSymbols {
    script: Rc<Vec<Symbol>>,
    draws: Rc<Cell<usize>>,
}

impl ScriptedSymbols {
    /// Create from a non-empty script.
    ///
    /// # Panics
    ///
    /// Panics if `script` is empty.
    pub fn new(script: impl IntoIterator<Item = Symbol>) -> Self {
        let script: Vec<_> = script.into_iter().collect();
        assert!(!script.is_empty(), "Symbol script must not be empty");
        Self {
            script: Rc::new(script),
            draws: Rc::new(Cell::new(0)),
        }
    }

    /// Create from raw symbol indices.
    pub fn from_indices(indices: &[u8]) -> Self {
        Self::new(indices.iter().copied().map(Symbol::new))
    }

    /// Number of symbols drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.draws.get()
    }
}

impl SymbolSource for ScriptedSymbols {
    fn draw_symbol(&mut self, _symbol_count: u8) -> Symbol {
        let n = self.draws.get();
        self.draws.set(n + 1);
        self.script[n % self.script.len()]
    }
}

/// Gesture source that replays a fixed list of samples, then reports no
/// gesture forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedGestures {
    samples: Rc<RefCell<VecDeque<Option<Symbol>>>>,
    polls: Rc<Cell<usize>>,
}

impl ScriptedGestures {
    /// Create from raw samples (`None` = no gesture on that poll).
    pub fn new(samples: impl IntoIterator<Item = Option<Symbol>>) -> Self {
        Self {
            samples: Rc::new(RefCell::new(samples.into_iter().collect())),
            polls: Rc::new(Cell::new(0)),
        }
    }

    /// One gesture per poll, from raw symbol indices.
    pub fn from_indices(indices: &[u8]) -> Self {
        Self::new(indices.iter().map(|&i| Some(Symbol::new(i))))
    }

    /// A source that never reports a gesture.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Queue more samples behind the remaining ones.
    pub fn push(&self, samples: impl IntoIterator<Item = Option<Symbol>>) {
        self.samples.borrow_mut().extend(samples);
    }

    /// Number of times the source has been polled.
    #[must_use]
    pub fn polls(&self) -> usize {
        self.polls.get()
    }

    /// Samples not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.samples.borrow().len()
    }
}

impl GestureSource for ScriptedGestures {
    fn sample_gesture(&mut self) -> Option<Symbol> {
        self.polls.set(self.polls.get() + 1);
        self.samples.borrow_mut().pop_front().flatten()
    }
}

/// Start signal that stays low for a number of polls, then goes high.
#[derive(Clone, Debug)]
pub struct ScriptedStart {
    low_polls: usize,
    polls: Rc<Cell<usize>>,
}

impl ScriptedStart {
    pub fn after(low_polls: usize) -> Self {
        Self {
            low_polls,
            polls: Rc::new(Cell::new(0)),
        }
    }

    #[must_use]
    pub fn polls(&self) -> usize {
        self.polls.get()
    }
}

impl StartSignal for ScriptedStart {
    fn start_signal(&mut self) -> bool {
        let n = self.polls.get();
        self.polls.set(n + 1);
        n >= self.low_polls
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// Everything a `RecordingSink` observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    Rendered { symbol: Symbol, duration: Duration },
    Attract { lit: bool },
    BeginPlayback { round: usize },
    Prompt,
    RoundPassed { round: usize },
    GameOver { score: u32 },
}

/// Sink that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in call order.
    #[must_use]
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.borrow().clone()
    }

    /// Symbols passed to `render`, in order.
    #[must_use]
    pub fn rendered(&self) -> Vec<Symbol> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Rendered { symbol, .. } => Some(*symbol),
                _ => None,
            })
            .collect()
    }

    /// Number of `render` calls.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, SinkEvent::Rendered { .. }))
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn record(&self, event: SinkEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl PlaybackSink for RecordingSink {
    fn render(&mut self, symbol: Symbol, duration: Duration) {
        self.record(SinkEvent::Rendered { symbol, duration });
    }

    fn attract(&mut self, lit: bool) {
        self.record(SinkEvent::Attract { lit });
    }

    fn begin_playback(&mut self, round: usize) {
        self.record(SinkEvent::BeginPlayback { round });
    }

    fn prompt(&mut self) {
        self.record(SinkEvent::Prompt);
    }

    fn round_passed(&mut self, round: usize) {
        self.record(SinkEvent::RoundPassed { round });
    }

    fn game_over(&mut self, score: u32) {
        self.record(SinkEvent::GameOver { score });
    }
}

/// Reporter that keeps every reported score.
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    scores: Rc<RefCell<Vec<u32>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scores(&self) -> Vec<u32> {
        self.scores.borrow().clone()
    }
}

impl ScoreReporter for RecordingReporter {
    fn report_score(&mut self, score: u32) {
        self.scores.borrow_mut().push(score);
    }
}

/// Clock that records requested sleeps instead of sleeping.
#[derive(Clone, Debug, Default)]
pub struct RecordingClock {
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every requested sleep, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    /// Sum of all requested sleeps.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.sleeps.borrow().iter().sum()
    }
}

impl Clock for RecordingClock {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}
