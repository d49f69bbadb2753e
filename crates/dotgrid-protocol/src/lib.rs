//! Wire protocol for Dotgrid.
//!
//! This crate defines what clients and the server say to each other:
//!
//! - **Events** ([`ClientEvent`], [`ServerEvent`]): one JSON object per
//!   frame, `{"event": "<name>", "data": {...}}`.
//! - **Identities** ([`PlayerId`], [`RoomCode`]) and the [`Scores`] table.
//! - **Routing** ([`Recipient`]): who a server event is for.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): events to bytes and back.
//!
//! ```text
//! Transport (bytes) → Protocol (events) → Room (game state)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientEvent, PlayerId, Recipient, RoomCode, Scores, ServerEvent};
