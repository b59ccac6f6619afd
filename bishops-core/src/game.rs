//! Board state, move generation and move classification.
//!
//! A [`Game`] is built once (initial layout, parsed hash, or parent + one
//! move), analyzed immediately, and never mutated afterwards.

use std::cell::OnceCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameSettings;
use crate::error::{EngineError, EngineResult};
use crate::{Color, Coord, Move, StateHash, EMPTY_CHAR};

/// Scan order for the four diagonal rays.
const DIAGONALS: [(i16, i16); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Which colors can reach a square in one move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Attacks {
    pub white: bool,
    pub black: bool,
}

impl Attacks {
    #[inline]
    pub fn by(&self, color: Color) -> bool {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline]
    fn mark(&mut self, color: Color) {
        match color {
            Color::White => self.white = true,
            Color::Black => self.black = true,
        }
    }
}

/// Classification of a move option.
///
/// Analysis only produces `Valid` and `Invalid`. The prior kinds depend on
/// the explored-state graph and are derived by [`crate::priors`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveKind {
    /// Destination is not attacked by the other color.
    Valid,
    /// Destination is attacked by the other color.
    Invalid,
    /// Leads to a registered state already connected to this one.
    PriorConnected,
    /// Leads to a registered state not yet connected to this one.
    PriorExplored,
}

/// One reachable destination of a bishop.
#[derive(Clone, Debug)]
pub struct MoveOption {
    to: Coord,
    kind: MoveKind,
    result: OnceCell<StateHash>,
}

impl MoveOption {
    fn new(to: Coord, kind: MoveKind) -> MoveOption {
        MoveOption {
            to,
            kind,
            result: OnceCell::new(),
        }
    }

    #[inline]
    pub fn to(&self) -> Coord {
        self.to
    }

    /// `Valid` or `Invalid`, as decided by attack analysis.
    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub fn is_safe(&self) -> bool {
        self.kind == MoveKind::Valid
    }

    /// Hash of the state this move leads to, if already resolved.
    #[inline]
    pub fn cached_result(&self) -> Option<&StateHash> {
        self.result.get()
    }
}

/// A board square.
#[derive(Clone, Debug, Default)]
pub struct Square {
    occupant: Option<Color>,
    attacked_by: Attacks,
    options: Vec<MoveOption>,
}

impl Square {
    #[inline]
    pub fn occupant(&self) -> Option<Color> {
        self.occupant
    }

    #[inline]
    pub fn attacked_by(&self) -> Attacks {
        self.attacked_by
    }

    /// Move options of the bishop on this square (empty for empty squares).
    #[inline]
    pub fn options(&self) -> &[MoveOption] {
        &self.options
    }
}

/// An analyzed board state.
#[derive(Clone, Debug)]
pub struct Game {
    rows: u8,
    cols: u8,
    squares: Vec<Square>,
    hash: StateHash,
    last_move: Option<Move>,
    solved_pieces: u32,
    total_pieces: u32,
}

impl Game {
    /// Initial layout: black on column 0, white on the last column, filtered
    /// by checker color.
    pub fn new(settings: &GameSettings) -> EngineResult<Game> {
        settings.validate()?;
        let GameSettings { rows, cols, pieces } = *settings;

        let mut occupancy = Vec::with_capacity(settings.squares());
        for row in 0..rows {
            for col in 0..cols {
                let bishop = if col == 0 {
                    Some(Color::Black)
                } else if col == cols - 1 {
                    Some(Color::White)
                } else {
                    None
                };
                let keep = pieces.keeps(settings.square_color(row, col));
                occupancy.push(bishop.filter(|_| keep));
            }
        }

        Ok(Game::from_occupancy(rows, cols, occupancy, None))
    }

    /// Rebuild a state from its hash.
    pub fn from_hash(rows: u8, cols: u8, hash: &str) -> EngineResult<Game> {
        GameSettings::new(rows, cols, Default::default()).validate()?;

        let expected = rows as usize * cols as usize;
        let mut occupancy = Vec::with_capacity(expected);
        for c in hash.chars() {
            match (c, Color::from_hash_char(c)) {
                (_, Some(color)) => occupancy.push(Some(color)),
                (EMPTY_CHAR, None) => occupancy.push(None),
                (other, None) => {
                    return Err(EngineError::config(format!(
                        "unexpected character '{other}' in state hash"
                    )))
                }
            }
        }
        if occupancy.len() != expected {
            return Err(EngineError::config(format!(
                "state hash has {} squares, board {rows}x{cols} needs {expected}",
                occupancy.len()
            )));
        }

        Ok(Game::from_occupancy(rows, cols, occupancy, None))
    }

    fn from_occupancy(
        rows: u8,
        cols: u8,
        occupancy: Vec<Option<Color>>,
        last_move: Option<Move>,
    ) -> Game {
        let hash = StateHash::new(
            occupancy
                .iter()
                .map(|o| o.map_or(EMPTY_CHAR, Color::hash_char))
                .collect::<String>(),
        );
        let squares = occupancy
            .into_iter()
            .map(|occupant| Square {
                occupant,
                ..Default::default()
            })
            .collect();

        let mut game = Game {
            rows,
            cols,
            squares,
            hash,
            last_move,
            solved_pieces: 0,
            total_pieces: 0,
        };
        game.analyze();
        game
    }

    // ========== Accessors ==========

    #[inline]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u8 {
        self.cols
    }

    #[inline]
    pub fn hash(&self) -> &StateHash {
        &self.hash
    }

    /// The move that produced this state from its parent.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[inline]
    pub fn solved_pieces(&self) -> u32 {
        self.solved_pieces
    }

    #[inline]
    pub fn total_pieces(&self) -> u32 {
        self.total_pieces
    }

    /// Every bishop sits on its goal column.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solved_pieces == self.total_pieces
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Square at `coord`. Panics when out of bounds.
    #[inline]
    pub fn square(&self, coord: Coord) -> &Square {
        &self.squares[coord.index(self.cols)]
    }

    /// All squares, row-major.
    #[inline]
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    #[inline]
    pub fn occupant(&self, coord: Coord) -> Option<Color> {
        self.square(coord).occupant
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        self.squares.iter().enumerate().filter_map(|(index, sq)| {
            sq.occupant
                .map(|color| (Coord::from_index(index, self.cols), color))
        })
    }

    /// Every move option on the board with its source square.
    pub fn options(&self) -> impl Iterator<Item = (Move, &MoveOption)> + '_ {
        self.squares.iter().enumerate().flat_map(|(index, sq)| {
            let from = Coord::from_index(index, self.cols);
            sq.options.iter().map(move |opt| (Move::new(from, opt.to), opt))
        })
    }

    /// Moves a player may take: every option that is not `Invalid`.
    pub fn safe_moves(&self) -> Vec<Move> {
        self.options()
            .filter(|(_, opt)| opt.is_safe())
            .map(|(mv, _)| mv)
            .collect()
    }

    // ========== Move Generation ==========

    /// Empty squares reachable from `(row, col)` along the four diagonals.
    ///
    /// Each ray stops before the first occupied square or the board edge.
    pub fn find_bishop_moves(&self, row: u8, col: u8) -> Vec<Coord> {
        let from = Coord::new(row, col);
        let mut moves = Vec::new();

        for (d_row, d_col) in DIAGONALS {
            let mut dist = 1;
            while let Some(to) = from.offset(d_row * dist, d_col * dist, self.rows, self.cols) {
                if self.squares[to.index(self.cols)].occupant.is_some() {
                    break;
                }
                moves.push(to);
                dist += 1;
            }
        }

        moves
    }

    // ========== Analysis ==========

    /// Recompute attacks, move options and piece counts from scratch.
    fn analyze(&mut self) {
        self.solved_pieces = 0;
        self.total_pieces = 0;
        for sq in &mut self.squares {
            sq.attacked_by = Attacks::default();
            sq.options.clear();
        }

        // First pass: reachable squares become attacked by the mover's color
        let mut reach = Vec::new();
        for index in 0..self.squares.len() {
            let Some(color) = self.squares[index].occupant else {
                continue;
            };
            let at = Coord::from_index(index, self.cols);

            self.total_pieces += 1;
            if at.col == color.goal_col(self.cols) {
                self.solved_pieces += 1;
            }

            let moves = self.find_bishop_moves(at.row, at.col);
            for to in &moves {
                self.squares[to.index(self.cols)].attacked_by.mark(color);
            }
            reach.push((index, color, moves));
        }

        // Second pass: a destination the other color reaches is unsafe
        for (index, color, moves) in reach {
            let options = moves
                .into_iter()
                .map(|to| {
                    let attacked = self.squares[to.index(self.cols)]
                        .attacked_by
                        .by(color.opposite());
                    let kind = if attacked {
                        MoveKind::Invalid
                    } else {
                        MoveKind::Valid
                    };
                    MoveOption::new(to, kind)
                })
                .collect();
            self.squares[index].options = options;
        }
    }

    // ========== Apply ==========

    /// Check that a move starts on a bishop and is one of its safe options.
    pub fn check_move(&self, mv: &Move) -> EngineResult<()> {
        if !self.in_bounds(mv.from) || !self.in_bounds(mv.to) {
            return Err(EngineError::illegal(*mv, "coordinates are off the board"));
        }
        let source = self.square(mv.from);
        if source.occupant.is_none() {
            return Err(EngineError::illegal(*mv, "no bishop on the source square"));
        }
        match source.options.iter().find(|opt| opt.to == mv.to) {
            None => Err(EngineError::illegal(*mv, "destination is not reachable")),
            Some(opt) if !opt.is_safe() => Err(EngineError::illegal(
                *mv,
                "destination is attacked by the other color",
            )),
            Some(_) => Ok(()),
        }
    }

    /// Produce the successor state of a legal move.
    pub fn apply_move(&self, mv: &Move) -> EngineResult<Game> {
        self.check_move(mv)?;
        Ok(self.successor(*mv))
    }

    /// Apply a generated move without legality checks.
    pub(crate) fn successor(&self, mv: Move) -> Game {
        let mut occupancy: Vec<Option<Color>> =
            self.squares.iter().map(|sq| sq.occupant).collect();
        let from = mv.from.index(self.cols);
        let to = mv.to.index(self.cols);
        occupancy[to] = occupancy[from].take();
        Game::from_occupancy(self.rows, self.cols, occupancy, Some(mv))
    }

    /// Hash of the successor state, without analyzing it.
    pub fn hash_after(&self, mv: Move) -> StateHash {
        let mut chars: Vec<char> = self.hash.as_str().chars().collect();
        let from = mv.from.index(self.cols);
        let to = mv.to.index(self.cols);
        chars[to] = chars[from];
        chars[from] = EMPTY_CHAR;
        StateHash::new(chars.into_iter().collect::<String>())
    }

    /// Resolve and cache the result hash of option `option` of the bishop
    /// on `from`. `None` if there is no such option.
    pub fn result_hash(&self, from: Coord, option: usize) -> Option<&StateHash> {
        if !self.in_bounds(from) {
            return None;
        }
        let opt = self.square(from).options.get(option)?;
        Some(
            opt.result
                .get_or_init(|| self.hash_after(Move::new(from, opt.to))),
        )
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hash = self.hash.as_str();
        for row in 0..self.rows as usize {
            let start = row * self.cols as usize;
            writeln!(f, "{}", &hash[start..start + self.cols as usize])?;
        }
        Ok(())
    }
}
