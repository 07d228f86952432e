//! Non-playable characters.

use serde::{Deserialize, Serialize};

use crate::lexicon::LexiconEntry;
use crate::world::WorldObject;

/// Mutable per-NPC state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcState {
    #[serde(default)]
    pub greeted: bool,
}

/// A character the player can talk to. NPCs stay in the room they were placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub word: String,
    pub translation: String,
    pub dialogue: Vec<String>,
    /// Words taught to the player on `talk`.
    pub vocabulary: Vec<String>,
    #[serde(default)]
    pub state: NpcState,
}

impl Npc {
    pub fn from_entry(entry: &LexiconEntry, dialogue: Vec<String>, vocabulary: Vec<String>) -> Self {
        Self {
            word: entry.word.clone(),
            translation: entry.translation.clone(),
            dialogue,
            vocabulary,
            state: NpcState::default(),
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: NpcState) -> Self {
        self.state = state;
        self
    }
}

impl WorldObject for Npc {
    fn word(&self) -> &str {
        &self.word
    }
    fn translation(&self) -> &str {
        &self.translation
    }
}
