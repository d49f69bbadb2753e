//! # Dotgrid
//!
//! Authoritative dots-and-boxes server for browser clients.
//!
//! Clients connect over WebSocket and exchange JSON events. The server
//! keeps every room's board, validates each move, awards completed squares,
//! and decides whose turn it is. Rooms are either two humans joined by a
//! six-character room code, or one human against an automated opponent
//! driven by an [`Oracle`](dotgrid_oracle::Oracle).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotgrid::prelude::*;
//! use dotgrid_oracle::HeuristicOracle;
//!
//! # async fn run() -> Result<(), DotgridError> {
//! let server = DotgridServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build(HeuristicOracle::new(None))
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod coordinator;
mod error;
mod handler;
mod server;

pub use config::{OracleKind, ServerConfig};
pub use error::DotgridError;
pub use server::{DotgridServer, DotgridServerBuilder};

/// The types most servers need.
pub mod prelude {
    pub use crate::{DotgridError, DotgridServer, DotgridServerBuilder, OracleKind, ServerConfig};
    pub use dotgrid_protocol::{ClientEvent, PlayerId, RoomCode, ServerEvent};
}
