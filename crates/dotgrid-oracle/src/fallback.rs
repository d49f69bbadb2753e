//! The move of last resort.

use dotgrid_board::{Board, Line};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Picks uniformly at random among the undrawn lines, or `None` on a full
/// board.
pub fn random_legal_line<P, R: Rng + ?Sized>(board: &Board<P>, rng: &mut R) -> Option<Line> {
    board.legal_lines().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fallback_only_picks_undrawn_lines() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut board: Board<u8> = Board::standard();
        while let Some(line) = random_legal_line(&board, &mut rng) {
            board.add_line(line).expect("fallback must never pick a drawn line");
        }
        assert_eq!(board.line_count(), board.total_lines());
    }

    #[test]
    fn test_fallback_single_remaining_line() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut board: Board<u8> = Board::standard();
        let last: Line = "4,3-4,4".parse().unwrap();
        for line in board.all_lines().filter(|l| *l != last).collect::<Vec<_>>() {
            board.add_line(line).unwrap();
        }
        assert_eq!(random_legal_line(&board, &mut rng), Some(last));
    }
}
