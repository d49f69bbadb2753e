//! An in-process oracle that plays by simple move priorities.
//!
//! Every undrawn line falls into one class:
//!
//! 1. **completing**: closes at least one square;
//! 2. **unsafe**: leaves a square with three sides for the opponent;
//! 3. **strategic**: leaves squares with two sides next to sparsely drawn
//!    ones, which tends to build chains;
//! 4. **safe**: everything else.
//!
//! The oracle takes a completing line when it can, prefers strategic lines
//! early in the game, then safe ones, and only then the unsafe line that
//! hands over the fewest squares. Ties are broken at random.

use std::sync::Mutex;

use dotgrid_board::{Board, Line, Square, completed_squares};
use dotgrid_protocol::PlayerId;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::{Oracle, OracleError, OutcomeReport};

/// Share of owned squares below which strategic lines beat safe ones.
const EARLY_GAME: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Completing,
    Strategic,
    Safe,
    /// `risk` squares would be left with three sides.
    Unsafe { risk: usize },
}

/// Local move policy. Seed it for reproducible games.
#[derive(Debug)]
pub struct HeuristicOracle {
    rng: Mutex<StdRng>,
}

impl HeuristicOracle {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Picks a line for the current board, or `None` if it is full.
    ///
    /// # Errors
    /// [`OracleError::Internal`] if the RNG lock is poisoned.
    pub fn pick<P>(&self, board: &Board<P>) -> Result<Option<Line>, OracleError> {
        let mut completing = Vec::new();
        let mut strategic = Vec::new();
        let mut safe = Vec::new();
        let mut risky = Vec::new();
        for line in board.legal_lines() {
            match classify(board, &line) {
                Class::Completing => completing.push(line),
                Class::Strategic => strategic.push(line),
                Class::Safe => safe.push(line),
                Class::Unsafe { risk } => risky.push((line, risk)),
            }
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| OracleError::Internal(format!("RNG lock poisoned: {e}")))?;

        let early = (board.squares().len() as f64) < EARLY_GAME * board.square_count() as f64;
        let line = if !completing.is_empty() {
            completing.choose(&mut *rng).copied()
        } else if early && !strategic.is_empty() {
            strategic.choose(&mut *rng).copied()
        } else if !safe.is_empty() {
            safe.choose(&mut *rng).copied()
        } else if let Some((line, _)) = risky.iter().min_by_key(|(_, risk)| *risk) {
            Some(*line)
        } else {
            strategic.choose(&mut *rng).copied()
        };
        Ok(line)
    }
}

impl Oracle for HeuristicOracle {
    async fn choose_move(
        &self,
        board: &Board<PlayerId>,
        _player: &PlayerId,
    ) -> Result<Option<Line>, OracleError> {
        self.pick(board)
    }

    async fn report_outcome(&self, _report: &OutcomeReport) -> Result<(), OracleError> {
        Ok(())
    }
}

fn classify<P>(board: &Board<P>, line: &Line) -> Class {
    if !completed_squares(board, line).is_empty() {
        return Class::Completing;
    }

    let adjacent = board.adjacent_squares(line);
    let risk = adjacent
        .iter()
        .filter(|sq| sides_after(board, sq, line) == 3)
        .count();
    if risk > 0 {
        return Class::Unsafe { risk };
    }

    let developing: Vec<Square> = adjacent
        .into_iter()
        .filter(|sq| sides_after(board, sq, line) == 2)
        .collect();
    let feeds_chain = developing.iter().any(|sq| {
        neighbours(board, sq).any(|n| sides_after(board, &n, line) == 1)
    });
    if feeds_chain || developing.len() > 1 {
        Class::Strategic
    } else {
        Class::Safe
    }
}

/// Sides of `square` drawn once `line` is added.
fn sides_after<P>(board: &Board<P>, square: &Square, line: &Line) -> usize {
    let extra = usize::from(square.edges().contains(line) && !board.has_line(line));
    board.sides_drawn(square) + extra
}

/// Squares sharing an edge with `square`.
fn neighbours<P>(board: &Board<P>, square: &Square) -> impl Iterator<Item = Square> {
    let origin = square.origin();
    let (row, col) = (i16::from(origin.row), i16::from(origin.col));
    let cells = i16::from(board.size()) - 1;
    [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
        .into_iter()
        .filter(move |(r, c)| (0..cells).contains(r) && (0..cells).contains(c))
        .map(|(r, c)| Square::new(r as u8, c as u8))
}
