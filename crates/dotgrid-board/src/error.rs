//! Error types for the board model.

use crate::{Line, LineCoords, Point};

/// Errors produced when building or mutating a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The line has already been drawn. Lines are never drawn twice.
    #[error("line {0} is already drawn")]
    DuplicateLine(Line),

    /// The two endpoints are not one step apart horizontally or vertically.
    #[error("points {0} and {1} are not adjacent")]
    NotAdjacent(Point, Point),

    /// A coordinate is negative or too large for any grid.
    #[error("coordinates {0} are outside any grid")]
    CoordinatesOutOfRange(LineCoords),

    /// The line has an endpoint outside the grid.
    #[error("line {line} lies outside a {size}x{size} grid")]
    OutOfBounds { line: Line, size: u8 },

    /// A grid needs at least two dots per edge to hold a square.
    #[error("grid size {0} is too small")]
    InvalidSize(u8),

    /// A textual key (`"r,c"` or `"r,c-r,c"`) could not be parsed.
    #[error("cannot parse {0:?}")]
    Parse(String),
}
