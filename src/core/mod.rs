//! Core types: symbols, RNG, configuration.
//!
//! These building blocks are hardware-agnostic. Sinks and gesture sources
//! interpret symbols; the core only identifies them.

pub mod symbol;
pub mod rng;
pub mod config;

pub use symbol::{Direction, Symbol};
pub use rng::SymbolRng;
pub use config::{GameConfig, Timings};
