//! JSON bodies exchanged with the oracle service.
//!
//! The service predates the server and keys everything by strings: lines as
//! `"r1,c1-r2,c2"`, squares as `"r,c"`, field names in snake_case.

use std::collections::BTreeMap;

use dotgrid_board::{Board, LineCoords, Square};
use dotgrid_protocol::PlayerId;
use serde::{Deserialize, Serialize};

/// The board as the oracle sees it.
///
/// ```json
/// { "lines": { "0,0-0,1": true }, "squares": { "0,0": "ai-player" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub lines: BTreeMap<String, bool>,
    pub squares: BTreeMap<Square, PlayerId>,
}

impl From<&Board<PlayerId>> for BoardSnapshot {
    fn from(board: &Board<PlayerId>) -> Self {
        Self {
            lines: board.lines().map(|l| (l.to_string(), true)).collect(),
            squares: board.squares().clone(),
        }
    }
}

/// Body of `POST /api/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub board: BoardSnapshot,
    pub player_id: PlayerId,
}

/// Response of `POST /api/move`. `move` is `null` when the oracle sees no
/// legal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    #[serde(rename = "move", default)]
    pub line: Option<LineCoords>,
}

/// Body of `POST /api/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub board: BoardSnapshot,
    pub completed_squares: Vec<Square>,
    pub player_id: PlayerId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_uses_string_keys() {
        let mut board = Board::standard();
        for l in ["0,0-0,1", "0,0-1,0", "1,0-1,1", "0,1-1,1"] {
            board.add_line(l.parse().unwrap()).unwrap();
        }
        board.claim(Square::new(0, 0), PlayerId::automated());

        let json = serde_json::to_value(BoardSnapshot::from(&board)).unwrap();

        assert_eq!(
            json,
            json!({
                "lines": {
                    "0,0-0,1": true,
                    "0,0-1,0": true,
                    "0,1-1,1": true,
                    "1,0-1,1": true
                },
                "squares": { "0,0": "ai-player" }
            })
        );
    }

    #[test]
    fn test_move_request_field_names() {
        let request = MoveRequest {
            board: BoardSnapshot::from(&Board::standard()),
            player_id: PlayerId::automated(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["player_id"], "ai-player");
        assert_eq!(json["board"]["lines"], json!({}));
    }

    #[test]
    fn test_move_response_null_and_line() {
        let none: MoveResponse = serde_json::from_str(r#"{"move":null}"#).unwrap();
        assert_eq!(none.line, None);

        let some: MoveResponse =
            serde_json::from_str(r#"{"move":{"row1":2,"col1":3,"row2":3,"col2":3}}"#).unwrap();
        assert_eq!(
            some.line,
            Some(LineCoords {
                row1: 2,
                col1: 3,
                row2: 3,
                col2: 3
            })
        );
    }

    #[test]
    fn test_update_request_lists_completed_squares() {
        let request = UpdateRequest {
            board: BoardSnapshot::from(&Board::standard()),
            completed_squares: vec![Square::new(1, 2), Square::new(2, 2)],
            player_id: PlayerId::automated(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["completed_squares"], json!(["1,2", "2,2"]));
    }
}
