// Cell and coordinate types shared by the model, the finder and the display

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single grid cell.
///
/// Serialized as `0` (empty) / `1` (block), the same shape the grid arrays
/// had in the browser version of this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellState {
    #[default]
    Empty,
    Block,
}

impl CellState {
    pub fn is_block(self) -> bool {
        self == CellState::Block
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Empty => CellState::Block,
            CellState::Block => CellState::Empty,
        }
    }

    /// Parse a pattern glyph (`#`, `B`, `1` for blocks; `.`, `E`, `0` for background)
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' | 'B' | 'b' | '1' => Some(CellState::Block),
            '.' | 'E' | 'e' | '0' => Some(CellState::Empty),
            _ => None,
        }
    }
}

impl From<bool> for CellState {
    fn from(is_block: bool) -> Self {
        if is_block {
            CellState::Block
        } else {
            CellState::Empty
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        match state {
            CellState::Empty => 0,
            CellState::Block => 1,
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellState::Empty),
            1 => Ok(CellState::Block),
            other => Err(format!("cell value must be 0 or 1, got {}", other)),
        }
    }
}

/// A position on the grid. Always in bounds for the model it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Orthogonal neighbors in fill order: +x, -x, +y, -y.
    /// Neighbors that would fall below zero are skipped; the upper bound is
    /// left to the caller since a coordinate does not know its grid.
    pub fn neighbors(self) -> impl DoubleEndedIterator<Item = Coordinate> {
        let Coordinate { x, y } = self;
        [
            Some(Coordinate::new(x + 1, y)),
            x.checked_sub(1).map(|nx| Coordinate::new(nx, y)),
            Some(Coordinate::new(x, y + 1)),
            y.checked_sub(1).map(|ny| Coordinate::new(x, ny)),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_order() {
        let neighbors: Vec<_> = Coordinate::new(1, 1).neighbors().collect();
        assert_eq!(
            neighbors,
            vec![
                Coordinate::new(2, 1),
                Coordinate::new(0, 1),
                Coordinate::new(1, 2),
                Coordinate::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_neighbors_at_origin_skip_negative() {
        let neighbors: Vec<_> = Coordinate::new(0, 0).neighbors().collect();
        assert_eq!(neighbors, vec![Coordinate::new(1, 0), Coordinate::new(0, 1)]);
    }

    #[test]
    fn test_cell_state_json_uses_integers() {
        let json = serde_json::to_string(&vec![CellState::Block, CellState::Empty]).unwrap();
        assert_eq!(json, "[1,0]");

        let parsed: Vec<CellState> = serde_json::from_str("[0,1,1]").unwrap();
        assert_eq!(parsed, vec![CellState::Empty, CellState::Block, CellState::Block]);

        let invalid: Result<CellState, _> = serde_json::from_str("2");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(CellState::from_glyph('#'), Some(CellState::Block));
        assert_eq!(CellState::from_glyph('.'), Some(CellState::Empty));
        assert_eq!(CellState::from_glyph('x'), None);
        assert_eq!(CellState::Block.toggled(), CellState::Empty);
    }
}
