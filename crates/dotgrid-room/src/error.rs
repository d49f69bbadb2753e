//! Error types for the room layer.
//!
//! Every variant is a rejection of client input. None of them change any
//! state, and all of them are reported to the sender only.

use dotgrid_board::{BoardError, Line};
use dotgrid_protocol::{PlayerId, RoomCode};

/// A move was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The actor does not hold the turn.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// The line is already on the board.
    #[error("line {0} is already drawn")]
    DuplicateLine(Line),

    /// The line is not on the grid.
    #[error("invalid line: {0}")]
    InvalidLine(BoardError),

    /// Every square is owned; the game accepts no more moves.
    #[error("the game is over")]
    GameOver,

    /// A human room still has only its creator.
    #[error("waiting for an opponent to join")]
    WaitingForOpponent,
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::DuplicateLine(line) => Self::DuplicateLine(line),
            other => Self::InvalidLine(other),
        }
    }
}

/// A room operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// No open room has this code.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// The room already has two participants.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// The participant is already a member of this room.
    #[error("player {0} already in room {1}")]
    AlreadyInRoom(PlayerId, RoomCode),
}
