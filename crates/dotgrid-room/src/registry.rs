//! Room registry: room code → room.

use std::collections::HashMap;

use dotgrid_protocol::{PlayerId, RoomCode};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{Game, PlayerSender, Room, RoomError, generate_code};

/// Every open room, keyed by code.
///
/// The registry is the sole owner of rooms and guarantees that no two open
/// rooms share a code. It is a plain value: the server keeps one behind a
/// mutex, and tests build as many independent ones as they like.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, Room>,
    rng: StdRng,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A registry whose room codes come from a seeded generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rooms: HashMap::new(),
            rng,
        }
    }

    /// Opens a human room with `initiator` alone in it.
    ///
    /// The initiator receives `gameCreated` on `sender`.
    pub fn create_room(&mut self, initiator: PlayerId, sender: PlayerSender) -> RoomCode {
        self.open(Game::new(initiator.clone()), initiator, sender)
    }

    /// Opens a room pairing `initiator` with the automated opponent.
    pub fn create_automated_room(&mut self, initiator: PlayerId, sender: PlayerSender) -> RoomCode {
        self.open(Game::new_automated(initiator.clone()), initiator, sender)
    }

    fn open(&mut self, game: Game, initiator: PlayerId, sender: PlayerSender) -> RoomCode {
        let code = self.unique_code();
        let automated = game.is_automated();
        let room = Room::open(code.clone(), game, initiator.clone(), sender);
        self.rooms.insert(code.clone(), room);
        tracing::info!(room_code = %code, player_id = %initiator, automated, "room created");
        code
    }

    /// Draws codes until one is not in use.
    fn unique_code(&mut self) -> RoomCode {
        loop {
            let code = generate_code(&mut self.rng);
            if !self.rooms.contains_key(&code) {
                return code;
            }
            tracing::debug!(room_code = %code, "room code collision, retrying");
        }
    }

    /// Seats `player` as the second participant of room `code`.
    ///
    /// # Errors
    /// [`RoomError::NotFound`], [`RoomError::AlreadyInRoom`] or
    /// [`RoomError::RoomFull`].
    pub fn join_room(
        &mut self,
        code: &RoomCode,
        player: PlayerId,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let room = self
            .rooms
            .get_mut(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        room.join(player.clone(), sender)?;
        tracing::info!(room_code = %code, player_id = %player, "player joined");
        Ok(())
    }

    /// Tears down every room `player` belongs to.
    ///
    /// The remaining human of each room is told with `playerDisconnected`.
    /// Deleting a room aborts its pending automated turn. Returns the codes
    /// of the deleted rooms.
    pub fn remove_participant(&mut self, player: &PlayerId) -> Vec<RoomCode> {
        let codes: Vec<RoomCode> = self
            .rooms
            .values()
            .filter(|room| room.game().contains(player))
            .map(|room| room.code().clone())
            .collect();

        for code in &codes {
            if let Some(mut room) = self.rooms.remove(code) {
                room.depart(player);
                tracing::info!(room_code = %code, player_id = %player, "room closed");
            }
        }
        codes
    }

    pub fn get(&self, code: &RoomCode) -> Option<&Room> {
        self.rooms.get(code)
    }

    pub fn get_mut(&mut self, code: &RoomCode) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    pub fn contains(&self, code: &RoomCode) -> bool {
        self.rooms.contains_key(code)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
