//! Server configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::DotgridError;

/// Which oracle drives the automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OracleKind {
    /// The external service at [`ServerConfig::oracle_url`].
    #[default]
    Http,
    /// The in-process heuristic policy.
    Local,
}

impl FromStr for OracleKind {
    type Err = DotgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "local" => Ok(Self::Local),
            other => Err(DotgridError::Config(format!(
                "oracle must be `http` or `local`, got `{other}`"
            ))),
        }
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Http => "http",
            Self::Local => "local",
        })
    }
}

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address for WebSocket clients.
    pub bind_addr: String,
    pub oracle: OracleKind,
    /// Base URL of the oracle service.
    pub oracle_url: String,
    /// Command that starts the oracle service. When set, the first
    /// `createAIGame` launches it, and later ones restart it if it exited.
    pub oracle_command: Option<String>,
    /// Pause before each automated move.
    pub ai_delay: Duration,
    /// Per-request timeout for the oracle. `None` waits indefinitely.
    pub oracle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            oracle: OracleKind::Http,
            oracle_url: "http://127.0.0.1:5000".to_string(),
            oracle_command: None,
            ai_delay: Duration::from_millis(1000),
            oracle_timeout: None,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `DOTGRID_*` environment variables.
    ///
    /// # Errors
    /// [`DotgridError::Config`] if a variable is set but malformed.
    pub fn from_env() -> Result<Self, DotgridError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DotgridError> {
        let mut config = Self::default();
        if let Some(addr) = lookup("DOTGRID_BIND") {
            config.bind_addr = addr;
        }
        if let Some(kind) = lookup("DOTGRID_ORACLE") {
            config.oracle = kind.parse()?;
        }
        if let Some(url) = lookup("DOTGRID_ORACLE_URL") {
            config.oracle_url = url;
        }
        if let Some(cmd) = lookup("DOTGRID_ORACLE_CMD") {
            config.oracle_command = Some(cmd).filter(|c| !c.trim().is_empty());
        }
        if let Some(ms) = lookup("DOTGRID_AI_DELAY_MS") {
            config.ai_delay = parse_millis("DOTGRID_AI_DELAY_MS", &ms)?;
        }
        if let Some(ms) = lookup("DOTGRID_ORACLE_TIMEOUT_MS") {
            config.oracle_timeout = Some(parse_millis("DOTGRID_ORACLE_TIMEOUT_MS", &ms)?)
                .filter(|d| !d.is_zero());
        }
        Ok(config)
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, DotgridError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| DotgridError::Config(format!("{key}={value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.oracle, OracleKind::Http);
        assert_eq!(config.oracle_timeout, None);
    }

    #[test]
    fn test_every_variable_is_read() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DOTGRID_BIND", "127.0.0.1:9000"),
            ("DOTGRID_ORACLE", "LOCAL"),
            ("DOTGRID_ORACLE_URL", "http://oracle:5000"),
            ("DOTGRID_ORACLE_CMD", "python ai_server.py"),
            ("DOTGRID_AI_DELAY_MS", "250"),
            ("DOTGRID_ORACLE_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.oracle, OracleKind::Local);
        assert_eq!(config.oracle_url, "http://oracle:5000");
        assert_eq!(config.oracle_command.as_deref(), Some("python ai_server.py"));
        assert_eq!(config.ai_delay, Duration::from_millis(250));
        assert_eq!(config.oracle_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_zero_timeout_and_blank_command_mean_none() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DOTGRID_ORACLE_CMD", "  "),
            ("DOTGRID_ORACLE_TIMEOUT_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.oracle_command, None);
        assert_eq!(config.oracle_timeout, None);
    }

    #[test]
    fn test_malformed_values_are_config_errors() {
        let err = ServerConfig::from_lookup(lookup(&[("DOTGRID_AI_DELAY_MS", "soon")])).unwrap_err();
        assert!(matches!(err, DotgridError::Config(_)));
        assert!(err.to_string().contains("DOTGRID_AI_DELAY_MS"));

        let err = ServerConfig::from_lookup(lookup(&[("DOTGRID_ORACLE", "magic")])).unwrap_err();
        assert!(matches!(err, DotgridError::Config(_)));
    }
}
