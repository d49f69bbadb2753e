//! Owns the oracle service's process when the server is configured to
//! start it.

use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use crate::OracleError;

/// Starts the oracle service on demand and restarts it if it has exited.
///
/// The child is killed when the launcher is dropped.
#[derive(Debug)]
pub struct OracleLauncher {
    command: String,
    child: Mutex<Option<Child>>,
}

impl OracleLauncher {
    /// `command` is split on whitespace: program first, then arguments.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            child: Mutex::new(None),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Makes sure the service process is alive, spawning it if it was
    /// never started or has exited.
    ///
    /// # Errors
    /// [`OracleError::EmptyCommand`] or [`OracleError::Spawn`].
    pub async fn ensure_running(&self) -> Result<(), OracleError> {
        let mut child = self.child.lock().await;
        if let Some(running) = child.as_mut() {
            match running.try_wait()? {
                None => return Ok(()),
                Some(status) => {
                    tracing::warn!(%status, command = %self.command, "oracle process exited, restarting");
                }
            }
        }

        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or(OracleError::EmptyCommand)?;
        let spawned = Command::new(program).args(parts).kill_on_drop(true).spawn()?;
        tracing::info!(pid = ?spawned.id(), command = %self.command, "oracle process started");
        *child = Some(spawned);
        Ok(())
    }

    /// OS process id of the live child, if any.
    pub async fn pid(&self) -> Option<u32> {
        let mut child = self.child.lock().await;
        let running = child.as_mut()?;
        match running.try_wait() {
            Ok(None) => running.id(),
            _ => None,
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let launcher = OracleLauncher::new("   ");
        let err = launcher.ensure_running().await.unwrap_err();
        assert!(matches!(err, OracleError::EmptyCommand));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let launcher = OracleLauncher::new("/definitely/not/a/real/oracle --port 5000");
        let err = launcher.ensure_running().await.unwrap_err();
        assert!(matches!(err, OracleError::Spawn(_)));
    }

    #[tokio::test]
    async fn test_running_process_is_not_spawned_twice() {
        let launcher = OracleLauncher::new("sleep 30");
        launcher.ensure_running().await.unwrap();
        let first = launcher.pid().await.expect("child should be running");

        launcher.ensure_running().await.unwrap();

        assert_eq!(launcher.pid().await, Some(first));
    }

    #[tokio::test]
    async fn test_exited_process_is_restarted() {
        let launcher = OracleLauncher::new("true");
        launcher.ensure_running().await.unwrap();

        // Wait for `true` to exit.
        for _ in 0..100 {
            if launcher.pid().await.is_none() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(launcher.pid().await, None);

        launcher.ensure_running().await.unwrap();
        // The restarted child may already have exited again; what matters
        // is that a new process was spawned without error.
        assert!(launcher.child.lock().await.is_some());
    }
}
