//! `DotgridServer` builder and server loop.
//!
//! Ties the layers together: transport → protocol → rooms, with the oracle
//! on the side for automated turns.

use std::sync::Arc;
use std::time::Duration;

use dotgrid_oracle::{Oracle, OracleLauncher};
use dotgrid_protocol::{Codec, JsonCodec};
use dotgrid_room::RoomRegistry;
use dotgrid_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::{DotgridError, ServerConfig};

/// Shared server state passed to each connection handler and automated-turn
/// task.
///
/// Every registry mutation happens under the one `registry` lock, so each
/// inbound event runs to completion before the next sees the rooms.
pub(crate) struct ServerState<O: Oracle, C: Codec> {
    pub(crate) registry: Mutex<RoomRegistry>,
    pub(crate) oracle: O,
    pub(crate) codec: C,
    pub(crate) ai_delay: Duration,
    pub(crate) launcher: Option<OracleLauncher>,
}

/// Builder for configuring and starting a Dotgrid server.
///
/// # Example
///
/// ```rust,no_run
/// use dotgrid::{DotgridServer, ServerConfig};
/// use dotgrid_oracle::HeuristicOracle;
///
/// # async fn run() -> Result<(), dotgrid::DotgridError> {
/// let server = DotgridServer::builder()
///     .config(ServerConfig::from_env()?)
///     .bind("0.0.0.0:3000")
///     .build(HeuristicOracle::new(None))
///     .await?;
/// server.run().await
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DotgridServerBuilder {
    config: ServerConfig,
}

impl DotgridServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets the pause before each automated move.
    pub fn ai_delay(mut self, delay: Duration) -> Self {
        self.config.ai_delay = delay;
        self
    }

    /// Sets the command that starts the oracle service.
    pub fn oracle_command(mut self, command: impl Into<String>) -> Self {
        self.config.oracle_command = Some(command.into());
        self
    }

    /// Binds the listener and returns a server driven by `oracle`.
    pub async fn build<O: Oracle>(
        self,
        oracle: O,
    ) -> Result<DotgridServer<O, JsonCodec>, DotgridError> {
        let transport = WebSocketTransport::bind(&self.config.bind_addr).await?;

        let state = Arc::new(ServerState {
            registry: Mutex::new(RoomRegistry::new()),
            oracle,
            codec: JsonCodec,
            ai_delay: self.config.ai_delay,
            launcher: self.config.oracle_command.map(OracleLauncher::new),
        });

        Ok(DotgridServer { transport, state })
    }
}

/// A bound Dotgrid server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct DotgridServer<O: Oracle, C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<O, C>>,
}

impl DotgridServer<dotgrid_oracle::ConfiguredOracle, JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> DotgridServerBuilder {
        DotgridServerBuilder::new()
    }
}

impl<O, C> DotgridServer<O, C>
where
    O: Oracle,
    C: Codec,
{
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop, spawning a handler task per connection. Runs
    /// until the process is terminated.
    pub async fn run(mut self) -> Result<(), DotgridError> {
        tracing::info!("Dotgrid server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
