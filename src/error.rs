use thiserror::Error;

use crate::core::Symbol;
use crate::engine::GamePhase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The symbol alphabet is empty")]
    EmptyAlphabet,
    #[error("The {0} poll interval must be non-zero")]
    ZeroPollInterval(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration:")]
    Config {
        #[from]
        source: ConfigError,
    },
    #[error("Operation requires phase {expected:?}, but the game is in {actual:?}")]
    WrongPhase { expected: GamePhase, actual: GamePhase },
    #[error("The round is complete; the next symbol must be appended first")]
    RoundPending,
    #[error("Round not complete: {matched} of {required} symbols matched")]
    RoundIncomplete { matched: usize, required: usize },
}

/// A deserialized game state that no sequence of transitions could produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("The symbol alphabet is empty")]
    EmptyAlphabet,
    #[error("{symbol} is outside the alphabet of {symbol_count}")]
    SymbolOutOfRange { symbol: Symbol, symbol_count: u8 },
    #[error("A game in {0:?} must have a non-empty sequence")]
    EmptySequence(GamePhase),
    #[error("A game awaiting start must have no sequence, guesses or mismatch")]
    StaleStart,
    #[error("{guesses} guesses recorded against a sequence of {sequence}")]
    TooManyGuesses { guesses: usize, sequence: usize },
    #[error("Guess at position {0} diverges from the sequence")]
    DivergentGuess(usize),
    #[error("Mismatch recorded outside the finished phase, or missing from it")]
    MismatchPhase,
    #[error("The recorded mismatch disagrees with the guesses")]
    InconsistentMismatch,
}
