//! Core protocol types for Dotgrid's wire format.
//!
//! Every frame is one internally-named event:
//!
//! ```json
//! { "event": "move", "data": { "roomCode": "K7QX3M", "line": { "row1": 0, "col1": 0, "row2": 0, "col2": 1 } } }
//! ```
//!
//! Field names are camelCase because the clients are browsers.

use std::collections::BTreeMap;
use std::fmt;

use dotgrid_board::{Line, LineCoords, Square};
use dotgrid_transport::ConnectionId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A participant in a game.
///
/// Humans are identified by their connection (`"conn-7"`); the automated
/// opponent by the fixed sentinel `"ai-player"`, which is also the identity
/// the oracle service expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wire identity of the automated opponent.
    pub const AUTOMATED: &'static str = "ai-player";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The automated-opponent sentinel.
    pub fn automated() -> Self {
        Self(Self::AUTOMATED.to_string())
    }

    pub fn is_automated(&self) -> bool {
        self.0 == Self::AUTOMATED
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ConnectionId> for PlayerId {
    fn from(id: ConnectionId) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The short code people type to join a room.
///
/// Codes are case-insensitive: they are stored upper-cased, including when
/// deserialized from a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RoomCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accumulated score per participant. Ordered so that serialized tables are
/// stable.
pub type Scores = BTreeMap<PlayerId, u32>;

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Who should receive a server event.
///
/// Game code returns `(Recipient, ServerEvent)` pairs; the room resolves
/// them against its members. The automated opponent has no connection, so
/// events addressed to it are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Every member of the room.
    All,
    /// One member.
    Player(PlayerId),
    /// Every member except one.
    AllExcept(PlayerId),
}

// ---------------------------------------------------------------------------
// Client → server
// ---------------------------------------------------------------------------

/// Events a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Open a room for two humans. Answered with `gameCreated`.
    CreateGame,

    /// Take the second seat in an existing room.
    #[serde(rename_all = "camelCase")]
    JoinGame { room_code: RoomCode },

    /// Open a room against the automated opponent.
    #[serde(rename = "createAIGame")]
    CreateAiGame,

    /// Draw a line. The coordinates are validated by the game, after the
    /// turn checks.
    #[serde(rename_all = "camelCase")]
    Move {
        room_code: RoomCode,
        line: LineCoords,
    },
}

// ---------------------------------------------------------------------------
// Server → client
// ---------------------------------------------------------------------------

/// Events the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// To the creator: the room exists. `player_id` is the creator's own
    /// identity, so the client can recognise its turns.
    #[serde(rename_all = "camelCase")]
    GameCreated {
        room_code: RoomCode,
        player_id: PlayerId,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        ai_mode: bool,
    },

    /// To the joiner: you are in.
    #[serde(rename_all = "camelCase")]
    GameJoined {
        room_code: RoomCode,
        player_id: PlayerId,
        players: Vec<PlayerId>,
        current_player: PlayerId,
    },

    /// To the existing occupant: an opponent arrived.
    #[serde(rename_all = "camelCase")]
    PlayerJoined {
        player_id: PlayerId,
        current_player: PlayerId,
    },

    /// To the would-be joiner: the join was refused.
    JoinError { message: String },

    /// To the room: a line was drawn.
    #[serde(rename_all = "camelCase")]
    MoveMade {
        line: Line,
        player: PlayerId,
        completed_squares: Vec<Square>,
        scores: Scores,
    },

    /// To the room: every square is owned. Terminal.
    GameOver { scores: Scores },

    /// To the room: who moves next.
    #[serde(rename_all = "camelCase")]
    TurnChange {
        current_player: PlayerId,
        scores: Scores,
    },

    /// To the sender: it is not your turn.
    NotYourTurn,

    /// To the sender: the line was refused (already drawn, off the grid,
    /// game over, or no opponent yet).
    InvalidMove { message: String },

    /// To the remaining human: the opponent left and the room is closed.
    #[serde(rename_all = "camelCase")]
    PlayerDisconnected { player_id: PlayerId },

    /// To the sender: the frame could not be understood.
    Error { message: String },
}

// =========================================================================
// Tests
// =========================================================================
