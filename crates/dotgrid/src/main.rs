use dotgrid::{DotgridError, DotgridServer, OracleKind, ServerConfig};
use dotgrid_oracle::{ConfiguredOracle, HeuristicOracle, HttpOracle};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), DotgridError> {
    init_tracing();

    let config = ServerConfig::from_env()?;
    let oracle: ConfiguredOracle = match config.oracle {
        OracleKind::Http => {
            HttpOracle::with_timeout(&config.oracle_url, config.oracle_timeout)?.into()
        }
        OracleKind::Local => HeuristicOracle::new(None).into(),
    };
    tracing::info!(oracle = %config.oracle, url = %config.oracle_url, "oracle configured");

    let server = DotgridServer::builder().config(config).build(oracle).await?;
    if let Ok(addr) = server.local_addr() {
        tracing::info!(%addr, "listening");
    }
    server.run().await
}
