//! # simon-says
//!
//! A hardware-agnostic Simon-style sequence memory game engine.
//!
//! ## Design Principles
//!
//! 1. **Pure Core**: `SequenceGame` holds the Sequence and the Guess buffer
//!    and applies the transition rules. It performs no I/O.
//!
//! 2. **Injected Capabilities**: Randomness, playback, gesture input, the
//!    start signal, score output and waiting are traits. Hardware, simulators
//!    and tests plug in through the same seams.
//!
//! 3. **Fail Fast**: Each guess is compared against the same position of the
//!    sequence as soon as it arrives. The first wrong symbol ends the game.
//!
//! ## Game Flow
//!
//! Wait for the start signal, then repeat: append one random symbol, play
//! the whole sequence, collect the player's reproduction. The score is the
//! number of rounds reproduced in full.
//!
//! ## Modules
//!
//! - `core`: Symbols, RNG, configuration
//! - `engine`: State machine and runner
//! - `io`: Capability traits, scripted doubles, simulated player
//! - `error`: Configuration and API misuse errors

pub mod core;
pub mod engine;
pub mod error;
pub mod io;

// Re-export commonly used types
pub use crate::core::{Direction, GameConfig, Symbol, SymbolRng, Timings};

pub use crate::engine::{
    GameOutcome, GamePhase, GameRunner, GameRunnerBuilder, GuessOutcome, Mismatch, SequenceGame, Tick,
};

pub use crate::error::{ConfigError, GameError, StateError};

pub use crate::io::{
    Clock, GestureSource, PlaybackSink, ScoreReporter, StartSignal, SymbolSource,
};
