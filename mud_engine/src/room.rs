//! Rooms: the fixed places of the world.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemHolder};
use crate::npc::Npc;

/// Mutable per-room state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    #[serde(default)]
    pub visited: bool,
}

/// A location in the world.
///
/// `description` may contain inline `**word**` vocabulary markers. Exits map a
/// direction word to a destination room id; destinations are only resolved
/// when the player walks through them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: String,
    pub exits: BTreeMap<String, String>,
    pub items: Vec<Item>,
    pub npcs: Vec<Npc>,
    #[serde(default)]
    pub state: RoomState,
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            exits: BTreeMap::new(),
            items: Vec::new(),
            npcs: Vec::new(),
            state: RoomState::default(),
        }
    }

    /// Builder-style exit registration, mostly for tests and loaders.
    #[must_use]
    pub fn with_exit(mut self, direction: impl Into<String>, to: impl Into<String>) -> Self {
        self.exits.insert(direction.into(), to.into());
        self
    }

    /// Destination room id for `direction`, if this room has such an exit.
    pub fn exit_to(&self, direction: &str) -> Option<&str> {
        self.exits.get(direction).map(String::as_str)
    }

    /// Exit directions in stable (sorted) order.
    pub fn exit_directions(&self) -> Vec<&str> {
        self.exits.keys().map(String::as_str).collect()
    }

    pub fn find_npc(&self, word: &str) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.word == word)
    }

    pub fn find_npc_mut(&mut self, word: &str) -> Option<&mut Npc> {
        self.npcs.iter_mut().find(|npc| npc.word == word)
    }

    /// True if an item or NPC with this word is in the room.
    pub fn is_visible(&self, word: &str) -> bool {
        self.contains_item(word) || self.find_npc(word).is_some()
    }
}

impl ItemHolder for Room {
    fn items(&self) -> &[Item] {
        &self.items
    }
    fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }
}
