//! A room: one game plus the connections of its human members.
//!
//! The room turns game transitions into [`ServerEvent`]s and routes them by
//! [`Recipient`]. Delivery goes through each member's unbounded channel, so
//! nothing here ever waits on a slow peer.

use std::collections::HashMap;

use dotgrid_board::LineCoords;
use dotgrid_protocol::{PlayerId, Recipient, RoomCode, ServerEvent};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::{Game, GameError, MoveOutcome, RoomError, Transition};

/// Channel sender for delivering events to a member's connection.
pub type PlayerSender = mpsc::UnboundedSender<ServerEvent>;

/// One open room.
///
/// Dropping the room aborts its pending automated turn, if any.
#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    game: Game,
    /// Human members only; the automated opponent has no connection.
    members: HashMap<PlayerId, PlayerSender>,
    pending_turn: Option<AbortHandle>,
}

impl Room {
    /// Opens a room around `game` and tells its creator the code.
    pub(crate) fn open(code: RoomCode, game: Game, creator: PlayerId, sender: PlayerSender) -> Self {
        let mut room = Self {
            code,
            game,
            members: HashMap::new(),
            pending_turn: None,
        };
        let event = ServerEvent::GameCreated {
            room_code: room.code.clone(),
            player_id: creator.clone(),
            ai_mode: room.game.is_automated(),
        };
        room.members.insert(creator.clone(), sender);
        room.send_to(&creator, event);
        room
    }

    /// Seats `player` as the second participant.
    ///
    /// The joiner receives `gameJoined`; the occupant receives
    /// `playerJoined`.
    pub(crate) fn join(&mut self, player: PlayerId, sender: PlayerSender) -> Result<(), RoomError> {
        if self.game.contains(&player) {
            return Err(RoomError::AlreadyInRoom(player, self.code.clone()));
        }
        if !self.game.add_player(player.clone()) {
            return Err(RoomError::RoomFull(self.code.clone()));
        }
        self.members.insert(player.clone(), sender);

        let current_player = self
            .game
            .current_player()
            .unwrap_or(&player)
            .clone();
        self.dispatch(vec![
            (
                Recipient::Player(player.clone()),
                ServerEvent::GameJoined {
                    room_code: self.code.clone(),
                    player_id: player.clone(),
                    players: self.game.players().to_vec(),
                    current_player: current_player.clone(),
                },
            ),
            (
                Recipient::AllExcept(player.clone()),
                ServerEvent::PlayerJoined {
                    player_id: player,
                    current_player,
                },
            ),
        ]);
        Ok(())
    }

    /// Applies a move and broadcasts the result.
    ///
    /// On success every member receives `moveMade`, followed by `gameOver`
    /// or `turnChange`. On rejection nothing is sent; reporting the error
    /// to the mover is the caller's job.
    pub fn play(
        &mut self,
        player: &PlayerId,
        line: impl Into<LineCoords>,
    ) -> Result<MoveOutcome, GameError> {
        let outcome = self.game.apply_move(player, line)?;
        let scores = self.game.scores().clone();

        let mut events = vec![(
            Recipient::All,
            ServerEvent::MoveMade {
                line: outcome.line,
                player: outcome.player.clone(),
                completed_squares: outcome.completed.clone(),
                scores: scores.clone(),
            },
        )];
        match &outcome.transition {
            Transition::GameOver { scores } => {
                tracing::info!(room_code = %self.code, ?scores, "game over");
                events.push((
                    Recipient::All,
                    ServerEvent::GameOver {
                        scores: scores.clone(),
                    },
                ));
            }
            Transition::ExtraTurn { player: next } | Transition::TurnPassed { next } => {
                events.push((
                    Recipient::All,
                    ServerEvent::TurnChange {
                        current_player: next.clone(),
                        scores,
                    },
                ));
            }
        }
        self.dispatch(events);
        Ok(outcome)
    }

    /// Removes a human member and tells whoever is left.
    pub(crate) fn depart(&mut self, player: &PlayerId) {
        self.members.remove(player);
        self.dispatch(vec![(
            Recipient::AllExcept(player.clone()),
            ServerEvent::PlayerDisconnected {
                player_id: player.clone(),
            },
        )]);
    }

    /// Records the task running the automated opponent's turn so that it
    /// is aborted with the room.
    pub fn set_pending_turn(&mut self, handle: AbortHandle) {
        if let Some(previous) = self.pending_turn.replace(handle) {
            previous.abort();
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns `true` if `player` has a live connection in this room.
    pub fn is_member(&self, player: &PlayerId) -> bool {
        self.members.contains_key(player)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Routes events to their recipients.
    pub fn dispatch(&self, events: Vec<(Recipient, ServerEvent)>) {
        for (recipient, event) in events {
            match recipient {
                Recipient::All => {
                    for player in self.members.keys() {
                        self.send_to(player, event.clone());
                    }
                }
                Recipient::Player(player) => self.send_to(&player, event),
                Recipient::AllExcept(excluded) => {
                    for player in self.members.keys().filter(|p| **p != excluded) {
                        self.send_to(player, event.clone());
                    }
                }
            }
        }
    }

    /// Silently drops the event if the member's connection is gone.
    fn send_to(&self, player: &PlayerId, event: ServerEvent) {
        if let Some(sender) = self.members.get(player) {
            let _ = sender.send(event);
        }
    }
}

impl Drop for Room {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_turn.take() {
            handle.abort();
        }
    }
}
