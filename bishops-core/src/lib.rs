//! Bishops puzzle engine.
//!
//! White bishops start on the last column and must cross to column 0, black
//! bishops start on column 0 and must cross to the last column. A bishop slides
//! diagonally until blocked and may never land on a square the other color
//! attacks. Every committed move creates a new board state; the engine keeps
//! the graph of explored states and can search for the shortest solution.
//!
//! # State Hash
//!
//! ```text
//! One character per square, row-major:
//!   'w' = white bishop
//!   'b' = black bishop
//!   '-' = empty
//!
//! 4 x 5, all pieces (initial position):
//!   b---w
//!   b---w      => "b---wb---wb---wb---w"
//!   b---w
//!   b---w
//! ```
//!
//! # Coordinates
//!
//! ```text
//! Coord { row, col } is 0-based from the top-left square.
//! Grid index = row * cols + col.
//!
//! Human labels: row letter counted from the bottom, column number counted
//! from the right, so the bottom-right square is "a1".
//! ```

pub mod config;
pub mod error;
pub mod explorer;
pub mod game;
pub mod graph;
pub mod notation;
pub mod priors;
pub mod registry;
pub mod solver;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use config::{deadline_from_secs, GameSettings, PieceFilter, SolverSettings, MAX_DEADLINE};
pub use error::{EngineError, EngineResult};
pub use explorer::{
    BoardView, Connection, Expansion, Explorer, OptionView, SquareView, StateSummary,
};
pub use game::{Attacks, Game, MoveKind, MoveOption, Square};
pub use graph::{NodeId, StateGraph};
pub use priors::OptionTally;
pub use registry::Registry;
pub use solver::{LayerSnapshot, Search, SearchStep, SolveOutcome};

/// Bishop color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other color.
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Character used for this color in a [`StateHash`].
    #[inline]
    pub fn hash_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Parse a hash character. `None` for anything but `w`/`b`.
    #[inline]
    pub fn from_hash_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// Column a bishop of this color must reach.
    #[inline]
    pub fn goal_col(self, cols: u8) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => cols - 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

/// Hash character for an empty square.
pub const EMPTY_CHAR: char = '-';

/// A square on the board, 0-based from the top-left.
///
/// Serialized as `[row, col]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Coord {
        Coord { row, col }
    }

    /// Row-major grid index on a board with `cols` columns.
    #[inline]
    pub fn index(self, cols: u8) -> usize {
        self.row as usize * cols as usize + self.col as usize
    }

    /// Inverse of [`Coord::index`].
    #[inline]
    pub fn from_index(index: usize, cols: u8) -> Coord {
        let cols = cols as usize;
        Coord {
            row: (index / cols) as u8,
            col: (index % cols) as u8,
        }
    }

    /// Offset by a signed step, `None` when leaving `rows x cols`.
    #[inline]
    pub fn offset(self, d_row: i16, d_col: i16, rows: u8, cols: u8) -> Option<Coord> {
        let row = self.row as i16 + d_row;
        let col = self.col as i16 + d_col;
        if row < 0 || col < 0 || row >= rows as i16 || col >= cols as i16 {
            return None;
        }
        Some(Coord::new(row as u8, col as u8))
    }
}

impl From<[u8; 2]> for Coord {
    fn from([row, col]: [u8; 2]) -> Self {
        Coord { row, col }
    }
}

impl From<Coord> for [u8; 2] {
    fn from(c: Coord) -> Self {
        [c.row, c.col]
    }
}

/// A bishop move from one square to another.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})->({},{})",
            self.from.row, self.from.col, self.to.row, self.to.col
        )
    }
}

/// Canonical occupancy string of a board; the dedup key for states.
///
/// See the module documentation for the encoding.
#[derive(Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateHash(String);

impl StateHash {
    /// Wrap a raw hash string. The caller is responsible for its shape;
    /// [`Game::from_hash`] validates it against a board size.
    pub fn new(raw: impl Into<String>) -> StateHash {
        StateHash(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StateHash {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
