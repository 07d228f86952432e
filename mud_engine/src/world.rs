//! Data structures representing the game world.
//!
//! [`WorldSeed`] is the immutable template produced by the loaders and shared by
//! every session; [`GameState`] is one session's mutable copy of it.

use crate::MUD_VERSION;
use crate::engine::EngineError;
use crate::item::Item;
use crate::npc::Npc;
use crate::player::Player;
use crate::room::Room;

use log::info;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;

/// Methods common to vocabulary entities (items and NPCs).
pub trait WorldObject {
    /// Canonical practice-language word; also the entity's lookup key.
    fn word(&self) -> &str;
    fn translation(&self) -> &str;
}

/// Complete state of one running game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub rooms: HashMap<String, Room>,
    pub version: String,
}

impl GameState {
    pub fn new(player: Player, rooms: HashMap<String, Room>) -> GameState {
        Self {
            player,
            rooms,
            version: MUD_VERSION.to_string(),
        }
    }

    pub fn current_room_id(&self) -> &str {
        &self.player.location
    }

    /// The room the player stands in.
    ///
    /// # Errors
    /// Returns [`EngineError::NoCurrentRoom`] if the location does not resolve.
    pub fn current_room(&self) -> Result<&Room, EngineError> {
        self.rooms
            .get(&self.player.location)
            .ok_or_else(|| EngineError::NoCurrentRoom(self.player.location.clone()))
    }

    /// Mutable access to the room the player stands in.
    ///
    /// # Errors
    /// Returns [`EngineError::NoCurrentRoom`] if the location does not resolve.
    pub fn current_room_mut(&mut self) -> Result<&mut Room, EngineError> {
        let location = &self.player.location;
        self.rooms
            .get_mut(location)
            .ok_or_else(|| EngineError::NoCurrentRoom(location.clone()))
    }

    /// Every item in the game together with the id of its holder
    /// (a room id, or `None` for the player's inventory).
    pub fn all_items(&self) -> impl Iterator<Item = (Option<&str>, &Item)> {
        let in_rooms = self
            .rooms
            .values()
            .flat_map(|room| room.items.iter().map(move |item| (Some(room.id.as_str()), item)));
        let carried = self.player.inventory.iter().map(|item| (None, item));
        in_rooms.chain(carried)
    }
}

/// Immutable world template loaded once and cloned into each new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSeed {
    pub title: String,
    pub intro: String,
    pub player_name: String,
    pub start_room: String,
    pub rooms: HashMap<String, Room>,
}

impl WorldSeed {
    /// Start a fresh game at the seed's start room.
    pub fn new_game(&self) -> GameState {
        let player = Player::new(self.player_name.clone(), self.start_room.clone());
        let mut state = GameState::new(player, self.rooms.clone());
        if let Some(start) = state.rooms.get_mut(&self.start_room) {
            start.state.visited = true;
        }
        info!("new game of '{}' started in room '{}'", self.title, self.start_room);
        state
    }

    /// The authored version of an NPC, preferring the copy placed in `room_id`.
    pub fn npc_template(&self, room_id: &str, word: &str) -> Option<&Npc> {
        self.rooms
            .get(room_id)
            .and_then(|room| room.find_npc(word))
            .or_else(|| self.rooms.values().find_map(|room| room.find_npc(word)))
    }
}
