//! Square completion detection.

use crate::{Board, Line, Square};

/// Returns the unowned squares that `line` encloses, given every other line
/// already on `board`.
///
/// Call it right after adding `line` to learn which squares that line
/// completed. Only the (at most two) squares bordering `line` are examined,
/// and a square counts only if its other three sides are drawn. Squares
/// that already have an owner are never reported, so a square is reported
/// exactly once: for the line that closed it.
///
/// The same call on a board where `line` is *not* drawn yet answers "which
/// squares would this line close", which move policies use.
///
/// Results are ordered above-before-below and left-before-right.
pub fn completed_squares<P>(board: &Board<P>, line: &Line) -> Vec<Square> {
    board
        .adjacent_squares(line)
        .into_iter()
        .filter(|square| board.owner(square).is_none())
        .filter(|square| {
            square
                .edges()
                .iter()
                .filter(|edge| *edge != line)
                .all(|edge| board.has_line(edge))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(board: &mut Board<u8>, key: &str) -> Vec<Square> {
        let line: Line = key.parse().unwrap();
        board.add_line(line).unwrap();
        let done = completed_squares(board, &line);
        for sq in &done {
            board.claim(*sq, 1);
        }
        done
    }

    #[test]
    fn test_no_square_from_lone_line() {
        let mut b = Board::standard();
        assert!(draw(&mut b, "2,2-2,3").is_empty());
    }

    #[test]
    fn test_fourth_side_completes_top_left_square() {
        let mut b = Board::standard();
        assert!(draw(&mut b, "0,0-0,1").is_empty());
        assert!(draw(&mut b, "0,0-1,0").is_empty());
        assert!(draw(&mut b, "1,0-1,1").is_empty());

        let done = draw(&mut b, "0,1-1,1");

        assert_eq!(done, vec![Square::new(0, 0)]);
        assert_eq!(done[0].to_string(), "0,0");
    }

    #[test]
    fn test_bottom_right_square_is_reported_once() {
        let mut b = Board::standard();
        draw(&mut b, "3,3-3,4");
        draw(&mut b, "4,3-4,4");
        draw(&mut b, "3,3-4,3");

        let done = draw(&mut b, "3,4-4,4");
        assert_eq!(done, vec![Square::new(3, 3)]);
        let closing: Line = "3,4-4,4".parse().unwrap();
        assert!(completed_squares(&b, &closing).is_empty());

        // A later line on a neighbouring square must not report it again.
        assert!(draw(&mut b, "2,3-3,3").is_empty());
        assert!(draw(&mut b, "2,4-3,4").is_empty());
    }

    #[test]
    fn test_middle_line_completes_two_squares_in_order() {
        let mut b = Board::standard();
        // Square (1,1) and (2,1) share the horizontal line 2,1-2,2.
        for key in ["1,1-1,2", "1,1-2,1", "1,2-2,2", "3,1-3,2", "2,1-3,1", "2,2-3,2"] {
            assert!(draw(&mut b, key).is_empty());
        }

        let done = draw(&mut b, "2,2-2,1");

        assert_eq!(done, vec![Square::new(1, 1), Square::new(2, 1)]);
    }

    #[test]
    fn test_vertical_line_completes_left_then_right() {
        let mut b = Board::standard();
        for key in ["0,1-0,2", "1,1-1,2", "0,1-1,1", "0,2-0,3", "1,2-1,3", "0,3-1,3"] {
            assert!(draw(&mut b, key).is_empty());
        }

        let done = draw(&mut b, "1,2-0,2");

        assert_eq!(done, vec![Square::new(0, 1), Square::new(0, 2)]);
    }

    #[test]
    fn test_border_line_checks_only_inner_side() {
        let mut b = Board::standard();
        draw(&mut b, "0,4-1,4");
        draw(&mut b, "0,3-0,4");
        draw(&mut b, "1,3-1,4");

        let done = draw(&mut b, "0,3-1,3");

        assert_eq!(done, vec![Square::new(0, 3)]);
    }

    #[test]
    fn test_hypothetical_line_reports_closable_square() {
        let mut b = Board::standard();
        draw(&mut b, "0,0-0,1");
        draw(&mut b, "0,0-1,0");
        draw(&mut b, "1,0-1,1");

        let pending: Line = "0,1-1,1".parse().unwrap();
        assert!(!b.has_line(&pending));
        assert_eq!(completed_squares(&b, &pending), vec![Square::new(0, 0)]);
    }
}
