//! Games and rooms for Dotgrid.
//!
//! A room is one isolated two-seat game behind a short code. This crate
//! owns everything that happens inside rooms:
//!
//! - [`Game`]: the turn state machine and the only code path that draws
//!   lines on a board.
//! - [`Room`]: a game plus the outbound channels of its human members;
//!   turns game transitions into [`ServerEvent`](dotgrid_protocol::ServerEvent)s.
//! - [`RoomRegistry`]: room code → room; create, join, teardown.
//!
//! Nothing here is async or locked. The server wraps the registry in a
//! single `tokio::sync::Mutex` so every event runs to completion before the
//! next one sees the state.

mod code;
mod error;
mod game;
mod registry;
mod room;

pub use code::{CODE_ALPHABET, CODE_LEN, generate_code};
pub use error::{GameError, RoomError};
pub use game::{Game, MoveOutcome, Phase, Transition};
pub use registry::RoomRegistry;
pub use room::{PlayerSender, Room};
