//! The sequence game engine.
//!
//! - `state`: `SequenceGame`, the pure state machine (Sequence, Guess buffer,
//!   transition rules)
//! - `runner`: `GameRunner`, which polls the collaborators and feeds the
//!   state machine
//! - `outcome`: Guess and game results

pub mod state;
pub mod runner;
pub mod outcome;

pub use state::{GamePhase, SequenceGame};
pub use runner::{GameRunner, GameRunnerBuilder, Tick};
pub use outcome::{GameOutcome, GuessOutcome, Mismatch};
