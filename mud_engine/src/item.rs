//! Items and the containers that own them.

use mud_data::PartOfSpeech;
use serde::{Deserialize, Serialize};

use crate::lexicon::LexiconEntry;
use crate::world::WorldObject;

/// Behavior flags an item takes from its lexicon entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ItemFlags {
    pub is_portable: bool,
    pub is_edible: bool,
    pub is_drinkable: bool,
    pub is_usable: bool,
}

impl From<&LexiconEntry> for ItemFlags {
    fn from(entry: &LexiconEntry) -> Self {
        Self {
            is_portable: entry.portable,
            is_edible: entry.edible,
            is_drinkable: entry.drinkable,
            is_usable: entry.usable,
        }
    }
}

/// Mutable per-item state. `is_open` stays `None` until the item is opened or closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemState {
    #[serde(default)]
    pub is_open: Option<bool>,
}

/// A vocabulary noun that exists in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub word: String,
    pub translation: String,
    pub pos: PartOfSpeech,
    pub flags: ItemFlags,
    #[serde(default)]
    pub state: ItemState,
}

impl Item {
    /// Create a fresh item for the given lexicon entry.
    pub fn from_entry(entry: &LexiconEntry) -> Self {
        Self {
            word: entry.word.clone(),
            translation: entry.translation.clone(),
            pos: entry.pos,
            flags: ItemFlags::from(entry),
            state: ItemState::default(),
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: ItemState) -> Self {
        self.state = state;
        self
    }

    pub fn is_portable(&self) -> bool {
        self.flags.is_portable
    }
    pub fn is_edible(&self) -> bool {
        self.flags.is_edible
    }
    pub fn is_drinkable(&self) -> bool {
        self.flags.is_drinkable
    }
    pub fn is_usable(&self) -> bool {
        self.flags.is_usable
    }
    pub fn is_open(&self) -> bool {
        self.state.is_open.unwrap_or(false)
    }
}

impl WorldObject for Item {
    fn word(&self) -> &str {
        &self.word
    }
    fn translation(&self) -> &str {
        &self.translation
    }
}

/// Anything that owns items: rooms and the player's inventory.
///
/// Items are plain values, so moving one between holders is a `remove_item`
/// followed by an `add_item` and an item can never sit in two places at once.
pub trait ItemHolder {
    fn items(&self) -> &[Item];
    fn items_mut(&mut self) -> &mut Vec<Item>;

    fn add_item(&mut self, item: Item) {
        self.items_mut().push(item);
    }

    /// Remove and return the first item with the given word.
    fn remove_item(&mut self, word: &str) -> Option<Item> {
        let index = self.items().iter().position(|item| item.word == word)?;
        Some(self.items_mut().remove(index))
    }

    fn find_item(&self, word: &str) -> Option<&Item> {
        self.items().iter().find(|item| item.word == word)
    }

    fn find_item_mut(&mut self, word: &str) -> Option<&mut Item> {
        self.items_mut().iter_mut().find(|item| item.word == word)
    }

    fn contains_item(&self, word: &str) -> bool {
        self.find_item(word).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn apple_entry() -> LexiconEntry {
        LexiconEntry {
            word: "سیب".into(),
            translation: "apple".into(),
            pos: PartOfSpeech::Noun,
            portable: true,
            edible: true,
            drinkable: false,
            usable: false,
        }
    }

    #[test]
    fn flags_come_from_entry() {
        let apple = Item::from_entry(&apple_entry());
        assert!(apple.is_portable());
        assert!(apple.is_edible());
        assert!(!apple.is_drinkable());
        assert!(!apple.is_open());
        assert_eq!(apple.state, ItemState::default());
    }

    #[test]
    fn holder_moves_items_by_value() {
        let mut player = Player::new("Tester", "library");
        player.add_item(Item::from_entry(&apple_entry()));
        assert!(player.contains_item("سیب"));

        let taken = player.remove_item("سیب");
        assert!(taken.is_some());
        assert!(!player.contains_item("سیب"));
        assert!(player.remove_item("سیب").is_none());
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut player = Player::new("Tester", "library");
        player.add_item(Item::from_entry(&apple_entry()));
        player.add_item(Item::from_entry(&apple_entry()));
        assert!(player.remove_item("سیب").is_some());
        assert_eq!(player.items().len(), 1);
    }
}
