//! Client for the external oracle service.

use std::time::Duration;

use dotgrid_board::{Board, Line};
use dotgrid_protocol::PlayerId;

use crate::{BoardSnapshot, MoveRequest, MoveResponse, Oracle, OracleError, OutcomeReport, UpdateRequest};

/// Talks to the oracle service over HTTP.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct HttpOracle {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOracle {
    /// A client for the service at `base_url` (e.g. `http://127.0.0.1:5000`)
    /// with no request timeout.
    ///
    /// # Errors
    /// [`OracleError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, OracleError> {
        Self::with_timeout(base_url, None)
    }

    /// Like [`new`](Self::new), with an optional per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, OracleError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Oracle for HttpOracle {
    async fn choose_move(
        &self,
        board: &Board<PlayerId>,
        player: &PlayerId,
    ) -> Result<Option<Line>, OracleError> {
        let request = MoveRequest {
            board: BoardSnapshot::from(board),
            player_id: player.clone(),
        };
        let response: MoveResponse = self
            .client
            .post(self.endpoint("/api/move"))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let line = response.line.map(Line::try_from).transpose()?;
        tracing::debug!(player_id = %player, line = ?line, "oracle proposed move");
        Ok(line)
    }

    async fn report_outcome(&self, report: &OutcomeReport) -> Result<(), OracleError> {
        let request = UpdateRequest {
            board: BoardSnapshot::from(&report.board),
            completed_squares: report.completed.clone(),
            player_id: report.player.clone(),
        };
        self.client
            .post(self.endpoint("/api/update"))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
