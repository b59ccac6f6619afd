//! Puzzle and solver settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::Color;

/// Largest board side. Row labels use one letter each.
pub const MAX_SIDE: u8 = 26;

/// Longest deadline a single search may be given.
pub const MAX_DEADLINE: Duration = Duration::from_secs(3600);

/// Deadline for a caller-supplied number of seconds, clamped to
/// `0..=MAX_DEADLINE`. NaN and negative values mean no time at all.
pub fn deadline_from_secs(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).map_or(MAX_DEADLINE, |d| d.min(MAX_DEADLINE))
}

/// Which starting pieces are placed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceFilter {
    /// Every square of both edge columns.
    #[default]
    All,
    /// Only edge squares that are white checker squares.
    White,
    /// Only edge squares that are black checker squares.
    Black,
}

impl PieceFilter {
    /// Whether a square of the given checker color keeps its starting piece.
    #[inline]
    pub fn keeps(self, square_color: Color) -> bool {
        match self {
            PieceFilter::All => true,
            PieceFilter::White => square_color == Color::White,
            PieceFilter::Black => square_color == Color::Black,
        }
    }
}

impl std::str::FromStr for PieceFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<PieceFilter> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PieceFilter::All),
            "white" => Ok(PieceFilter::White),
            "black" => Ok(PieceFilter::Black),
            other => Err(EngineError::config(format!(
                "unknown piece filter '{other}' (expected all, white or black)"
            ))),
        }
    }
}

/// Board configuration for a new puzzle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub rows: u8,
    pub cols: u8,
    pub pieces: PieceFilter,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            rows: 4,
            cols: 5,
            pieces: PieceFilter::All,
        }
    }
}

impl GameSettings {
    pub fn new(rows: u8, cols: u8, pieces: PieceFilter) -> GameSettings {
        GameSettings { rows, cols, pieces }
    }

    /// Reject boards that cannot hold two distinct edge columns.
    pub fn validate(&self) -> EngineResult<()> {
        if self.rows == 0 || self.rows > MAX_SIDE {
            return Err(EngineError::config(format!(
                "rows must be between 1 and {MAX_SIDE}, got {}",
                self.rows
            )));
        }
        if self.cols < 2 || self.cols > MAX_SIDE {
            return Err(EngineError::config(format!(
                "cols must be between 2 and {MAX_SIDE}, got {}",
                self.cols
            )));
        }
        Ok(())
    }

    /// Number of squares on the board.
    #[inline]
    pub fn squares(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Checker color of a square: `((rows - r) + (cols - c)) % 2`, odd is white.
    #[inline]
    pub fn square_color(&self, row: u8, col: u8) -> Color {
        let parity = ((self.rows - row) as u32 + (self.cols - col) as u32) % 2;
        if parity == 1 {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Solver limits.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Wall-clock budget for one search.
    pub deadline_secs: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings { deadline_secs: 15.0 }
    }
}

impl SolverSettings {
    pub fn deadline(&self) -> Duration {
        deadline_from_secs(self.deadline_secs)
    }
}
