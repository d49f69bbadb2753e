//! The board: which lines are drawn and who owns which squares.

use std::collections::{BTreeMap, BTreeSet};

use crate::{BoardError, Line, Orientation, Point, Square};

/// Dots per edge of the standard board (4 × 4 = 16 squares).
pub const GRID_SIZE: u8 = 5;

/// A dots-and-boxes board of `size × size` dots.
///
/// `P` is the owner type recorded for completed squares. The board never
/// decides ownership itself; the caller claims squares after asking
/// [`completed_squares`](crate::completed_squares) which ones a line closed.
///
/// Invariants:
/// - a line is added at most once and never removed;
/// - a square is claimed at most once and never changes owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<P> {
    size: u8,
    lines: BTreeSet<Line>,
    squares: BTreeMap<Square, P>,
}

impl<P> Board<P> {
    /// Creates an empty board with `size` dots per edge.
    ///
    /// # Errors
    /// [`BoardError::InvalidSize`] if `size < 2`.
    pub fn new(size: u8) -> Result<Self, BoardError> {
        if size < 2 {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            lines: BTreeSet::new(),
            squares: BTreeMap::new(),
        })
    }

    /// An empty board of the standard [`GRID_SIZE`].
    pub fn standard() -> Self {
        Self {
            size: GRID_SIZE,
            lines: BTreeSet::new(),
            squares: BTreeMap::new(),
        }
    }

    /// Dots per edge.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of squares on a full board, `(size - 1)²`.
    pub fn square_count(&self) -> usize {
        let cells = usize::from(self.size - 1);
        cells * cells
    }

    /// Returns `true` if both endpoints of `line` lie on this grid.
    pub fn contains(&self, line: &Line) -> bool {
        // The canonical end point carries the largest row and column.
        let end = line.end();
        end.row < self.size && end.col < self.size
    }

    pub fn has_line(&self, line: &Line) -> bool {
        self.lines.contains(line)
    }

    /// Records a newly drawn line.
    ///
    /// # Errors
    /// - [`BoardError::OutOfBounds`] if the line is not on this grid.
    /// - [`BoardError::DuplicateLine`] if the line was already drawn. The
    ///   board is unchanged in both cases.
    pub fn add_line(&mut self, line: Line) -> Result<(), BoardError> {
        if !self.contains(&line) {
            return Err(BoardError::OutOfBounds {
                line,
                size: self.size,
            });
        }
        if !self.lines.insert(line) {
            return Err(BoardError::DuplicateLine(line));
        }
        Ok(())
    }

    /// Drawn lines in canonical order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of lines on a full board.
    pub fn total_lines(&self) -> usize {
        2 * usize::from(self.size) * usize::from(self.size - 1)
    }

    /// Every line on the grid: all horizontal lines row by row, then all
    /// vertical lines.
    pub fn all_lines(&self) -> impl Iterator<Item = Line> + use<P> {
        let size = self.size;
        let horizontal = (0..size)
            .flat_map(move |row| (0..size - 1).map(move |col| Line::horizontal(row, col)));
        let vertical = (0..size - 1)
            .flat_map(move |row| (0..size).map(move |col| Line::vertical(row, col)));
        horizontal.chain(vertical)
    }

    /// Every line not yet drawn, in [`all_lines`](Self::all_lines) order.
    pub fn legal_lines(&self) -> Vec<Line> {
        self.all_lines().filter(|l| !self.has_line(l)).collect()
    }

    /// The squares that have `line` as one of their sides: above then below
    /// for a horizontal line, left then right for a vertical one. Border
    /// lines have one neighbour, inner lines two.
    pub fn adjacent_squares(&self, line: &Line) -> Vec<Square> {
        let Point { row, col } = line.start();
        let last = self.size - 1;
        let mut out = Vec::with_capacity(2);
        match line.orientation() {
            Orientation::Horizontal => {
                if row > 0 {
                    out.push(Square::new(row - 1, col));
                }
                if row < last {
                    out.push(Square::new(row, col));
                }
            }
            Orientation::Vertical => {
                if col > 0 {
                    out.push(Square::new(row, col - 1));
                }
                if col < last {
                    out.push(Square::new(row, col));
                }
            }
        }
        out
    }

    /// How many of the square's four sides are drawn.
    pub fn sides_drawn(&self, square: &Square) -> usize {
        square.edges().iter().filter(|e| self.has_line(e)).count()
    }

    /// Owned squares in `(row, col)` order.
    pub fn squares(&self) -> &BTreeMap<Square, P> {
        &self.squares
    }

    pub fn owner(&self, square: &Square) -> Option<&P> {
        self.squares.get(square)
    }

    /// Records `owner` as the owner of `square`.
    ///
    /// Returns `false` and leaves the existing owner in place if the square
    /// was already claimed.
    pub fn claim(&mut self, square: Square, owner: P) -> bool {
        if self.squares.contains_key(&square) {
            return false;
        }
        self.squares.insert(square, owner);
        true
    }

    /// Returns `true` once every square has an owner.
    pub fn is_complete(&self) -> bool {
        self.squares.len() == self.square_count()
    }
}

impl<P> Default for Board<P> {
    fn default() -> Self {
        Self::standard()
    }
}
