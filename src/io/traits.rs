//! Capability traits the runner depends on.
//!
//! Each trait is a narrow, function-shaped contract. Hardware backends,
//! simulators and test doubles implement them; closures implement the ones
//! that are a single call.

use std::time::Duration;

use log::info;

use crate::core::{Symbol, SymbolRng};

// =============================================================================
// Symbol Source
// =============================================================================

/// Source of new sequence symbols.
pub trait SymbolSource {
    /// Draw a symbol uniformly from `[0, symbol_count)`.
    ///
    /// Returning a symbol outside the alphabet is a contract violation;
    /// the engine does not correct it.
    fn draw_symbol(&mut self, symbol_count: u8) -> Symbol;
}

impl SymbolSource for SymbolRng {
    fn draw_symbol(&mut self, symbol_count: u8) -> Symbol {
        self.draw(symbol_count)
    }
}

impl<F: FnMut(u8) -> Symbol> SymbolSource for F {
    fn draw_symbol(&mut self, symbol_count: u8) -> Symbol {
        self(symbol_count)
    }
}

// =============================================================================
// Playback Sink
// =============================================================================

/// Display/sound output.
///
/// Only `render` is required. The other hooks mirror the reference board's
/// cosmetic feedback and default to doing nothing.
pub trait PlaybackSink {
    /// Show or sound `symbol` for approximately `duration`.
    ///
    /// Must not block for much longer than `duration`.
    fn render(&mut self, symbol: Symbol, duration: Duration);

    /// One frame of the idle animation while waiting for the start signal.
    fn attract(&mut self, _lit: bool) {}

    /// Playback of `round` symbols is about to begin.
    fn begin_playback(&mut self, _round: usize) {}

    /// The engine is waiting for a gesture.
    fn prompt(&mut self) {}

    /// `round` was reproduced correctly.
    fn round_passed(&mut self, _round: usize) {}

    /// The game ended with `score`.
    fn game_over(&mut self, _score: u32) {}
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PlaybackSink for NullSink {
    fn render(&mut self, _symbol: Symbol, _duration: Duration) {}
}

/// Forward every call to both sinks, first `A` then `B`.
impl<A: PlaybackSink, B: PlaybackSink> PlaybackSink for (A, B) {
    fn render(&mut self, symbol: Symbol, duration: Duration) {
        self.0.render(symbol, duration);
        self.1.render(symbol, duration);
    }

    fn attract(&mut self, lit: bool) {
        self.0.attract(lit);
        self.1.attract(lit);
    }

    fn begin_playback(&mut self, round: usize) {
        self.0.begin_playback(round);
        self.1.begin_playback(round);
    }

    fn prompt(&mut self) {
        self.0.prompt();
        self.1.prompt();
    }

    fn round_passed(&mut self, round: usize) {
        self.0.round_passed(round);
        self.1.round_passed(round);
    }

    fn game_over(&mut self, score: u32) {
        self.0.game_over(score);
        self.1.game_over(score);
    }
}

// =============================================================================
// Input
// =============================================================================

/// Discrete gesture input.
pub trait GestureSource {
    /// Non-blocking. Returns the symbol of the gesture currently asserted,
    /// or `None` if no recognisable gesture is asserted.
    fn sample_gesture(&mut self) -> Option<Symbol>;
}

impl<F: FnMut() -> Option<Symbol>> GestureSource for F {
    fn sample_gesture(&mut self) -> Option<Symbol> {
        self()
    }
}

/// Start trigger (e.g. both buttons held).
pub trait StartSignal {
    /// Non-blocking. True once the player asks to start.
    fn start_signal(&mut self) -> bool;
}

impl<F: FnMut() -> bool> StartSignal for F {
    fn start_signal(&mut self) -> bool {
        self()
    }
}

/// Start signal that is always asserted.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateStart;

impl StartSignal for ImmediateStart {
    fn start_signal(&mut self) -> bool {
        true
    }
}

// =============================================================================
// Output and Time
// =============================================================================

/// Receives the final score, once per finished game.
pub trait ScoreReporter {
    fn report_score(&mut self, score: u32);
}

impl<F: FnMut(u32)> ScoreReporter for F {
    fn report_score(&mut self, score: u32) {
        self(score)
    }
}

/// Reporter that writes the score to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl ScoreReporter for LogReporter {
    fn report_score(&mut self, score: u32) {
        info!("SCORE: {}", score);
    }
}

/// The environment's notion of waiting.
///
/// All pacing delays go through this trait so tests and simulations can
/// run without sleeping.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Clock backed by `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
