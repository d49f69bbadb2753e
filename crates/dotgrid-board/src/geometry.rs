//! Grid geometry: dots, the lines between them, and the squares they enclose.
//!
//! Every type here has exactly one representation. A [`Line`] always stores
//! its smaller endpoint first (row, then column), so two lines compare equal
//! iff they connect the same dots, regardless of the order a client sent them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BoardError;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A dot on the grid, addressed by row and column from the top-left.
///
/// Field order matters: the derived `Ord` compares `row` first, then `col`,
/// which is the canonical endpoint order for lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: u8,
    pub col: u8,
}

impl Point {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Point {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || BoardError::Parse(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(parse_err)?;
        let row = row.trim().parse().map_err(|_| parse_err())?;
        let col = col.trim().parse().map_err(|_| parse_err())?;
        Ok(Self { row, col })
    }
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// Whether a line runs along a row or along a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The wire shape of a line: two endpoints in whatever order the sender
/// chose.
///
/// ```json
/// { "row1": 0, "col1": 1, "row2": 0, "col2": 0 }
/// ```
///
/// Coordinates are signed and wide so that any integer a client sends
/// decodes; [`Line::try_from`] does the validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCoords {
    pub row1: i32,
    pub col1: i32,
    pub row2: i32,
    pub col2: i32,
}

impl fmt::Display for LineCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}-{},{}", self.row1, self.col1, self.row2, self.col2)
    }
}

/// A segment between two grid-adjacent dots, in canonical form.
///
/// Construct with [`Line::new`], which rejects non-adjacent endpoints and
/// orders the endpoints. Serializes as [`LineCoords`] with the canonical
/// order, and deserializes from any endpoint order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "LineCoords", try_from = "LineCoords")]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    /// Builds the canonical line between `a` and `b`.
    ///
    /// # Errors
    /// [`BoardError::NotAdjacent`] unless the points differ by exactly one
    /// step in one axis.
    pub fn new(a: Point, b: Point) -> Result<Self, BoardError> {
        let distance = a.row.abs_diff(b.row) + a.col.abs_diff(b.col);
        if distance != 1 {
            return Err(BoardError::NotAdjacent(a, b));
        }
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Ok(Self { start, end })
    }

    /// The line from `(row, col)` to `(row, col + 1)`.
    pub const fn horizontal(row: u8, col: u8) -> Self {
        Self {
            start: Point::new(row, col),
            end: Point::new(row, col + 1),
        }
    }

    /// The line from `(row, col)` to `(row + 1, col)`.
    pub const fn vertical(row: u8, col: u8) -> Self {
        Self {
            start: Point::new(row, col),
            end: Point::new(row + 1, col),
        }
    }

    /// The smaller endpoint (top or left).
    pub fn start(&self) -> Point {
        self.start
    }

    /// The larger endpoint (bottom or right).
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn orientation(&self) -> Orientation {
        if self.start.row == self.end.row {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for Line {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| BoardError::Parse(s.to_string()))?;
        Line::new(a.parse()?, b.parse()?)
    }
}

impl From<Line> for LineCoords {
    fn from(line: Line) -> Self {
        Self {
            row1: line.start.row.into(),
            col1: line.start.col.into(),
            row2: line.end.row.into(),
            col2: line.end.col.into(),
        }
    }
}

impl TryFrom<LineCoords> for Line {
    type Error = BoardError;

    fn try_from(c: LineCoords) -> Result<Self, Self::Error> {
        let point = |row: i32, col: i32| match (u8::try_from(row), u8::try_from(col)) {
            (Ok(row), Ok(col)) => Ok(Point::new(row, col)),
            _ => Err(BoardError::CoordinatesOutOfRange(c)),
        };
        Line::new(point(c.row1, c.col1)?, point(c.row2, c.col2)?)
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A unit cell, identified by its top-left dot.
///
/// On the wire and as a map key a square is the string `"row,col"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct Square {
    origin: Point,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self {
            origin: Point::new(row, col),
        }
    }

    /// The top-left dot.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The four bounding lines: top, bottom, left, right.
    pub fn edges(&self) -> [Line; 4] {
        let Point { row, col } = self.origin;
        [
            Line::horizontal(row, col),
            Line::horizontal(row + 1, col),
            Line::vertical(row, col),
            Line::vertical(row, col + 1),
        ]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)
    }
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self { origin: s.parse()? })
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
