//! Player -- the one character the user controls in a session
use crate::item::{Item, ItemHolder};

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Id of the room the player stands in. This is the game's only current-room pointer.
    pub location: String,
    pub inventory: Vec<Item>,
    /// Every word the player has been taught. Only ever grows.
    pub learned_words: BTreeSet<String>,
}

impl Player {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Player {
        Self {
            name: name.into(),
            location: location.into(),
            inventory: Vec::new(),
            learned_words: BTreeSet::new(),
        }
    }

    /// Add words to the learned set, returning those that were new (in input order).
    pub fn learn_words<'a, I>(&mut self, words: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut fresh = Vec::new();
        for word in words {
            if self.learned_words.insert(word.clone()) {
                fresh.push(word.clone());
            }
        }
        if !fresh.is_empty() {
            info!("{} learned {} new word(s): {}", self.name, fresh.len(), fresh.join(", "));
        }
        fresh
    }

    pub fn knows(&self, word: &str) -> bool {
        self.learned_words.contains(word)
    }
}

impl ItemHolder for Player {
    fn items(&self) -> &[Item] {
        &self.inventory
    }
    fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learn_words_reports_only_new_words() {
        let mut player = Player::new("Tester", "library");
        let first = player.learn_words(&["سیب".to_string(), "درخت".to_string()]);
        assert_eq!(first.len(), 2);
        let second = player.learn_words(&["سیب".to_string(), "نان".to_string()]);
        assert_eq!(second, vec!["نان".to_string()]);
        assert!(player.knows("درخت"));
        assert_eq!(player.learned_words.len(), 3);
    }
}
