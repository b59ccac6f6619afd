//! Human-readable square labels.
//!
//! Rows are lettered from the bottom (`a` is the last row), columns are
//! numbered from the right (`1` is the last column).

use std::cmp::Ordering;

use crate::error::{EngineError, EngineResult};
use crate::{Coord, Move};

/// Label of a square, e.g. `a1` for the bottom-right one.
pub fn format_coord(coord: Coord, rows: u8, cols: u8) -> EngineResult<String> {
    if coord.row >= rows || coord.col >= cols {
        return Err(EngineError::config(format!(
            "({}, {}) is not a square on a {rows}x{cols} board",
            coord.row, coord.col
        )));
    }
    let letter = (b'a' + (rows - 1 - coord.row)) as char;
    Ok(format!("{letter}{}", cols - coord.col))
}

/// Parse a label such as `c4` back into a coordinate.
pub fn parse_coord(label: &str, rows: u8, cols: u8) -> EngineResult<Coord> {
    let label = label.trim();
    let bad = || EngineError::config(format!("'{label}' is not a square on a {rows}x{cols} board"));

    let mut chars = label.chars();
    let letter = chars.next().ok_or_else(bad)?.to_ascii_lowercase();
    if !letter.is_ascii_lowercase() {
        return Err(bad());
    }
    let from_bottom = letter as u8 - b'a';
    let from_right: u8 = chars.as_str().parse().map_err(|_| bad())?;

    if from_bottom >= rows || from_right == 0 || from_right > cols {
        return Err(bad());
    }
    Ok(Coord::new(rows - 1 - from_bottom, cols - from_right))
}

pub fn format_move(mv: &Move, rows: u8, cols: u8) -> EngineResult<String> {
    Ok(format!(
        "{} → {}",
        format_coord(mv.from, rows, cols)?,
        format_coord(mv.to, rows, cols)?
    ))
}

/// Label for an edge created by `mv`, read from the shallower state to the
/// deeper one.
///
/// `from_depth` is the distance of the state `mv` was played in,
/// `to_depth` the distance of the state it produced.
pub fn connection_label(
    mv: &Move,
    from_depth: Option<u32>,
    to_depth: Option<u32>,
    rows: u8,
    cols: u8,
) -> EngineResult<String> {
    let (start, end, order) = match (from_depth, to_depth) {
        (Some(a), Some(b)) if b < a => (mv.to, mv.from, a.cmp(&b)),
        (Some(a), Some(b)) => (mv.from, mv.to, b.cmp(&a)),
        _ => (mv.from, mv.to, Ordering::Equal),
    };
    let arrow = match order {
        Ordering::Greater => '→',
        Ordering::Equal => '-',
        Ordering::Less => '←',
    };
    Ok(format!(
        "{} {arrow} {}",
        format_coord(start, rows, cols)?,
        format_coord(end, rows, cols)?
    ))
}
