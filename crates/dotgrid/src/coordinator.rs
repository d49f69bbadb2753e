//! Automated-opponent turns.
//!
//! When the turn passes to the automated opponent, [`schedule`] spawns one
//! task for the room. The task loops while the opponent keeps earning extra
//! turns: wait, ask the oracle with the lock released, then re-lock and
//! apply the move through [`Room::play`] like any human move. The task's
//! abort handle lives on the room, so deleting the room cancels it.

use std::sync::Arc;

use dotgrid_board::{Board, Line};
use dotgrid_oracle::{Oracle, OutcomeReport, random_legal_line};
use dotgrid_protocol::{Codec, PlayerId, RoomCode};
use dotgrid_room::{Room, Transition};

use crate::server::ServerState;

/// Starts the automated opponent's turn in `room`.
///
/// Must be called with the registry lock held, right after the move that
/// handed over the turn.
pub(crate) fn schedule<O, C>(state: &Arc<ServerState<O, C>>, room: &mut Room)
where
    O: Oracle,
    C: Codec,
{
    let task = tokio::spawn(run_turns(Arc::clone(state), room.code().clone()));
    room.set_pending_turn(task.abort_handle());
}

async fn run_turns<O, C>(state: Arc<ServerState<O, C>>, room_code: RoomCode)
where
    O: Oracle,
    C: Codec,
{
    let player = PlayerId::automated();

    loop {
        tokio::time::sleep(state.ai_delay).await;

        let board = {
            let registry = state.registry.lock().await;
            match registry.get(&room_code) {
                Some(room) if room.game().awaiting_automated() => room.game().board().clone(),
                _ => return,
            }
        };

        let proposal = match state.oracle.choose_move(&board, &player).await {
            Ok(Some(line)) => Some(line),
            Ok(None) => {
                tracing::warn!(%room_code, "oracle returned no move, using fallback");
                None
            }
            Err(e) => {
                tracing::warn!(%room_code, error = %e, "oracle failed, using fallback");
                None
            }
        };

        let mut registry = state.registry.lock().await;
        // The room may have closed while the oracle was thinking.
        let Some(room) = registry.get_mut(&room_code) else {
            tracing::debug!(%room_code, "room closed during automated turn");
            return;
        };
        if !room.game().awaiting_automated() {
            return;
        }

        let board = room.game().board();
        let (line, from_oracle) = match proposal {
            Some(line) if is_legal(board, &line) => (line, true),
            proposal => {
                if let Some(line) = proposal {
                    tracing::warn!(%room_code, %line, "oracle proposed an illegal line, using fallback");
                }
                match fallback_line(board) {
                    Some(line) => (line, false),
                    None => return,
                }
            }
        };

        let outcome = match room.play(&player, line) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(%room_code, %line, error = %e, "automated move rejected");
                return;
            }
        };
        tracing::debug!(%room_code, %line, from_oracle, completed = outcome.completed.len(), "automated move applied");

        if from_oracle {
            report(&state, OutcomeReport {
                board: room.game().board().clone(),
                completed: outcome.completed.clone(),
                player: player.clone(),
            });
        }

        if !matches!(outcome.transition, Transition::ExtraTurn { .. }) {
            return;
        }
    }
}

fn is_legal(board: &Board<PlayerId>, line: &Line) -> bool {
    board.contains(line) && !board.has_line(line)
}

/// The thread-local RNG is not `Send`, so it never lives across an await.
fn fallback_line(board: &Board<PlayerId>) -> Option<Line> {
    random_legal_line(board, &mut rand::rng())
}

/// Sends the outcome to the oracle in the background. Failures are logged
/// and dropped.
fn report<O, C>(state: &Arc<ServerState<O, C>>, outcome: OutcomeReport)
where
    O: Oracle,
    C: Codec,
{
    let state = Arc::clone(state);
    tokio::spawn(async move {
        if let Err(e) = state.oracle.report_outcome(&outcome).await {
            tracing::warn!(error = %e, "failed to report outcome to oracle");
        }
    });
}
