//! Move oracles for Dotgrid's automated opponent.
//!
//! The server never decides the automated opponent's moves itself. It asks
//! an [`Oracle`] and validates whatever comes back through the same path as
//! human moves. When the oracle is unreachable, errors, has no move, or
//! proposes a line that is not legal, the server falls back to
//! [`random_legal_line`].
//!
//! Implementations:
//!
//! - [`HttpOracle`]: the external policy service (`POST /api/move`,
//!   `POST /api/update`).
//! - [`HeuristicOracle`]: an in-process policy with the same move
//!   priorities, for deployments without the service.
//! - [`ConfiguredOracle`]: one of the two, picked at startup.
//!
//! [`OracleLauncher`] starts the external service as a child process when
//! the server is configured to own it.

mod configured;
mod error;
mod fallback;
mod heuristic;
mod http;
mod launcher;
mod wire;

pub use configured::ConfiguredOracle;
pub use error::OracleError;
pub use fallback::random_legal_line;
pub use heuristic::HeuristicOracle;
pub use http::HttpOracle;
pub use launcher::OracleLauncher;
pub use wire::{BoardSnapshot, MoveRequest, MoveResponse, UpdateRequest};

use dotgrid_board::{Board, Line, Square};
use dotgrid_protocol::PlayerId;

/// What the oracle is told after one of its moves was applied.
#[derive(Debug, Clone)]
pub struct OutcomeReport {
    /// The board after the move.
    pub board: Board<PlayerId>,
    /// Squares the move closed.
    pub completed: Vec<Square>,
    /// The participant the oracle played for.
    pub player: PlayerId,
}

/// A source of moves for the automated opponent.
///
/// `Send + Sync + 'static` because one oracle is shared by every room's
/// automated-turn task.
///
/// # Example
///
/// ```rust
/// use dotgrid_board::{Board, Line};
/// use dotgrid_oracle::{Oracle, OracleError, OutcomeReport};
/// use dotgrid_protocol::PlayerId;
///
/// /// Always draws the first undrawn line.
/// struct FirstLine;
///
/// impl Oracle for FirstLine {
///     async fn choose_move(
///         &self,
///         board: &Board<PlayerId>,
///         _player: &PlayerId,
///     ) -> Result<Option<Line>, OracleError> {
///         Ok(board.legal_lines().first().copied())
///     }
///
///     async fn report_outcome(&self, _report: &OutcomeReport) -> Result<(), OracleError> {
///         Ok(())
///     }
/// }
/// ```
pub trait Oracle: Send + Sync + 'static {
    /// Proposes a line for `player` on `board`.
    ///
    /// `Ok(None)` means the oracle has no move. The caller validates the
    /// line; an oracle may return anything.
    fn choose_move(
        &self,
        board: &Board<PlayerId>,
        player: &PlayerId,
    ) -> impl std::future::Future<Output = Result<Option<Line>, OracleError>> + Send;

    /// Tells the oracle how its last move turned out. Failures are logged
    /// by the caller and never retried.
    fn report_outcome(
        &self,
        report: &OutcomeReport,
    ) -> impl std::future::Future<Output = Result<(), OracleError>> + Send;
}
