//! Collaborator interfaces and their stock implementations.
//!
//! - `traits`: The capabilities the runner consumes (symbols, playback,
//!   gestures, start signal, score output, clock)
//! - `scripted`: Deterministic and recording doubles
//! - `simulated`: A player that watches playback and repeats it

pub mod traits;
pub mod scripted;
pub mod simulated;

pub use traits::{
    Clock, GestureSource, ImmediateStart, LogReporter, NullSink, PlaybackSink, ScoreReporter,
    StartSignal, StdClock, SymbolSource,
};
pub use scripted::{
    RecordingClock, RecordingReporter, RecordingSink, ScriptedGestures, ScriptedStart,
    ScriptedSymbols, SinkEvent,
};
pub use simulated::{PlayerEyes, PlayerHands, SimulatedPlayer};
