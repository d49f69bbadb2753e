//! Per-connection handler: event decoding, routing, and disconnect cleanup.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Derive the participant's identity from the connection id
//!   2. Spawn a writer task draining the connection's outbound channel
//!   3. Loop: receive frames → decode → apply to the registry
//!   4. On exit, tear down every room the participant was in

use std::sync::Arc;

use dotgrid_board::LineCoords;
use dotgrid_oracle::Oracle;
use dotgrid_protocol::{ClientEvent, Codec, PlayerId, RoomCode, ServerEvent};
use dotgrid_room::{GameError, PlayerSender};
use dotgrid_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::DotgridError;
use crate::coordinator;
use crate::server::ServerState;

/// Removes the participant's rooms when the handler exits, panics included.
/// The registry lock is async, so teardown runs in a spawned task.
struct DisconnectGuard<O: Oracle, C: Codec> {
    player_id: PlayerId,
    state: Arc<ServerState<O, C>>,
}

impl<O: Oracle, C: Codec> Drop for DisconnectGuard<O, C> {
    fn drop(&mut self) {
        let player_id = self.player_id.clone();
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let closed = state.registry.lock().await.remove_participant(&player_id);
            tracing::info!(%player_id, rooms_closed = closed.len(), "player disconnected");
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<O, C>(
    conn: WebSocketConnection,
    state: Arc<ServerState<O, C>>,
) -> Result<(), DotgridError>
where
    O: Oracle,
    C: Codec,
{
    let player_id = PlayerId::from(conn.id());
    tracing::info!(%player_id, "player connected");

    let conn = Arc::new(conn);
    let (tx, rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_events(Arc::clone(&conn), Arc::clone(&state), rx));

    let _guard = DisconnectGuard {
        player_id: player_id.clone(),
        state: Arc::clone(&state),
    };

    let result = read_events(&conn, &state, &player_id, &tx).await;

    // Events still queued for a closed connection are dropped.
    writer.abort();
    result
    // _guard drops here → room teardown fires.
}

/// Drains the outbound channel into the connection.
async fn write_events<O, C>(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState<O, C>>,
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
) where
    O: Oracle,
    C: Codec,
{
    while let Some(event) = rx.recv().await {
        let bytes = match state.codec.encode(&event) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(conn_id = %conn.id(), error = %e, "failed to encode event");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(conn_id = %conn.id(), error = %e, "send failed, stopping writer");
            break;
        }
    }
}

async fn read_events<O, C>(
    conn: &WebSocketConnection,
    state: &Arc<ServerState<O, C>>,
    player_id: &PlayerId,
    tx: &PlayerSender,
) -> Result<(), DotgridError>
where
    O: Oracle,
    C: Codec,
{
    loop {
        let data = match conn.recv().await? {
            Some(data) => data,
            None => {
                tracing::info!(%player_id, "connection closed cleanly");
                return Ok(());
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "failed to decode event");
                let _ = tx.send(ServerEvent::Error {
                    message: e.to_string(),
                });
                continue;
            }
        };

        handle_event(state, player_id, tx, event).await;
    }
}

async fn handle_event<O, C>(
    state: &Arc<ServerState<O, C>>,
    player_id: &PlayerId,
    tx: &PlayerSender,
    event: ClientEvent,
) where
    O: Oracle,
    C: Codec,
{
    match event {
        ClientEvent::CreateGame => {
            state
                .registry
                .lock()
                .await
                .create_room(player_id.clone(), tx.clone());
        }

        ClientEvent::CreateAiGame => {
            if let Some(launcher) = &state.launcher {
                if let Err(e) = launcher.ensure_running().await {
                    tracing::warn!(error = %e, "could not start oracle process");
                }
            }
            state
                .registry
                .lock()
                .await
                .create_automated_room(player_id.clone(), tx.clone());
        }

        ClientEvent::JoinGame { room_code } => {
            let result = state
                .registry
                .lock()
                .await
                .join_room(&room_code, player_id.clone(), tx.clone());
            if let Err(e) = result {
                tracing::debug!(%player_id, %room_code, error = %e, "join rejected");
                let _ = tx.send(ServerEvent::JoinError {
                    message: e.to_string(),
                });
            }
        }

        ClientEvent::Move { room_code, line } => {
            handle_move(state, player_id, tx, room_code, line).await;
        }
    }
}

async fn handle_move<O, C>(
    state: &Arc<ServerState<O, C>>,
    player_id: &PlayerId,
    tx: &PlayerSender,
    room_code: RoomCode,
    line: LineCoords,
) where
    O: Oracle,
    C: Codec,
{
    let mut registry = state.registry.lock().await;
    let Some(room) = registry.get_mut(&room_code) else {
        tracing::debug!(%player_id, %room_code, "move for unknown room ignored");
        return;
    };

    match room.play(player_id, line) {
        Ok(_) => {
            if room.game().awaiting_automated() {
                coordinator::schedule(state, room);
            }
        }
        Err(e) => {
            tracing::debug!(%player_id, %room_code, error = %e, "move rejected");
            let rejection = match e {
                GameError::NotYourTurn(_) => ServerEvent::NotYourTurn,
                other => ServerEvent::InvalidMove {
                    message: other.to_string(),
                },
            };
            let _ = tx.send(rejection);
        }
    }
}
