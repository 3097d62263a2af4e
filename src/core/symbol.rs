//! Symbol identification and the reference direction alphabet.
//!
//! ## Symbol
//!
//! Type-safe symbol identifier. A symbol is an index into an alphabet of
//! `symbol_count` entries and carries no payload beyond its identity.
//!
//! ## Direction
//!
//! The four tilt directions of the reference board, with the cue tone played
//! for each. Games with a different alphabet ignore this table.

use serde::{Deserialize, Serialize};

/// Symbol identifier supporting alphabets of 1-255 entries.
///
/// Symbol indices are 0-based: the first symbol is `Symbol(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw symbol index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check whether this symbol belongs to an alphabet of `symbol_count` entries.
    #[must_use]
    pub const fn is_valid(self, symbol_count: u8) -> bool {
        self.0 < symbol_count
    }

    /// Iterate over every symbol of an alphabet with `symbol_count` entries.
    ///
    /// ```
    /// use simon_says::core::Symbol;
    ///
    /// let symbols: Vec<_> = Symbol::all(4).collect();
    /// assert_eq!(symbols.len(), 4);
    /// assert_eq!(symbols[0], Symbol::new(0));
    /// assert_eq!(symbols[3], Symbol::new(3));
    /// ```
    pub fn all(symbol_count: u8) -> impl Iterator<Item = Symbol> {
        (0..symbol_count).map(Symbol)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol {}", self.0)
    }
}

impl From<Direction> for Symbol {
    fn from(direction: Direction) -> Self {
        direction.symbol()
    }
}

/// Tilt direction of the reference four-symbol alphabet.
///
/// The board reports a gesture by the edge that points *up*, so tilting
/// toward north is reported as the "down" gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    West,
    East,
    South,
}

impl Direction {
    /// All directions in symbol order.
    pub const ALL: [Direction; 4] = [Direction::North, Direction::West, Direction::East, Direction::South];

    /// Symbol assigned to this direction.
    #[must_use]
    pub const fn symbol(self) -> Symbol {
        match self {
            Direction::North => Symbol(0),
            Direction::West => Symbol(1),
            Direction::East => Symbol(2),
            Direction::South => Symbol(3),
        }
    }

    /// Map a symbol back to its direction.
    ///
    /// Returns `None` for symbols outside the four-entry alphabet.
    #[must_use]
    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        Self::ALL.get(symbol.index()).copied()
    }

    /// Accelerometer gesture name that selects this direction.
    #[must_use]
    pub const fn gesture_name(self) -> &'static str {
        match self {
            Direction::North => "down",
            Direction::West => "left",
            Direction::East => "right",
            Direction::South => "up",
        }
    }

    /// Cue tone in Hz (C4, E4, G4, C5).
    #[must_use]
    pub const fn tone_hz(self) -> u32 {
        match self {
            Direction::North => 262,
            Direction::West => 330,
            Direction::East => 392,
            Direction::South => 523,
        }
    }

    /// Arrow glyph for text displays.
    #[must_use]
    pub const fn arrow(self) -> char {
        match self {
            Direction::North => '↑',
            Direction::West => '←',
            Direction::East => '→',
            Direction::South => '↓',
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.arrow())
    }
}
