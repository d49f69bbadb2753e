//! Runtime choice between the oracle implementations.

use dotgrid_board::{Board, Line};
use dotgrid_protocol::PlayerId;

use crate::{HeuristicOracle, HttpOracle, Oracle, OracleError, OutcomeReport};

/// The oracle picked by configuration at startup.
///
/// [`Oracle`] returns `impl Future`, so it cannot be a trait object; this
/// enum stands in for `Box<dyn Oracle>`.
#[derive(Debug)]
pub enum ConfiguredOracle {
    Http(HttpOracle),
    Heuristic(HeuristicOracle),
}

impl Oracle for ConfiguredOracle {
    async fn choose_move(
        &self,
        board: &Board<PlayerId>,
        player: &PlayerId,
    ) -> Result<Option<Line>, OracleError> {
        match self {
            Self::Http(oracle) => oracle.choose_move(board, player).await,
            Self::Heuristic(oracle) => oracle.choose_move(board, player).await,
        }
    }

    async fn report_outcome(&self, report: &OutcomeReport) -> Result<(), OracleError> {
        match self {
            Self::Http(oracle) => oracle.report_outcome(report).await,
            Self::Heuristic(oracle) => oracle.report_outcome(report).await,
        }
    }
}

impl From<HttpOracle> for ConfiguredOracle {
    fn from(oracle: HttpOracle) -> Self {
        Self::Http(oracle)
    }
}

impl From<HeuristicOracle> for ConfiguredOracle {
    fn from(oracle: HeuristicOracle) -> Self {
        Self::Heuristic(oracle)
    }
}
