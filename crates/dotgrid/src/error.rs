//! Unified error type for the Dotgrid server.

use dotgrid_oracle::OracleError;
use dotgrid_protocol::ProtocolError;
use dotgrid_transport::TransportError;

/// Top-level error that wraps the sub-crate errors the server can surface.
///
/// Player-facing rejections (`GameError`, `RoomError`) never show up here:
/// they are turned into events for the sender.
#[derive(Debug, thiserror::Error)]
pub enum DotgridError {
    /// Binding, accepting, or talking to a connection failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An event could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The oracle client could not be built or its process started.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// A configuration value is malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
