//! Error types for oracles.

use dotgrid_board::BoardError;

/// Why an oracle could not produce a move or take a report.
///
/// None of these reach players. The server logs them and falls back to a
/// random legal line.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The HTTP request failed: connection refused, timeout, non-2xx
    /// status, or an undecodable body.
    #[error("oracle request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The oracle answered with coordinates that are not a line.
    #[error("oracle proposed an invalid line: {0}")]
    InvalidLine(#[from] BoardError),

    /// The oracle process could not be started.
    #[error("failed to start oracle process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The configured oracle command is empty.
    #[error("oracle command is empty")]
    EmptyCommand,

    /// An in-process oracle hit an internal fault.
    #[error("oracle internal error: {0}")]
    Internal(String),
}
