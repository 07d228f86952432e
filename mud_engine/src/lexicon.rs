//! Read-only vocabulary that every in-game entity is built from.
//!
//! Items and NPCs never carry flags of their own authoring; portability,
//! edibility and the rest come from the lexicon entry for their identity word.

use std::collections::HashMap;

use log::warn;
use mud_data::{LexiconDef, PartOfSpeech, WordDef};
use serde::{Deserialize, Serialize};

/// Metadata about one practice-language word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct LexiconEntry {
    pub word: String,
    pub translation: String,
    pub pos: PartOfSpeech,
    pub portable: bool,
    pub edible: bool,
    pub drinkable: bool,
    pub usable: bool,
}

impl From<&WordDef> for LexiconEntry {
    fn from(def: &WordDef) -> Self {
        Self {
            word: def.word.trim().to_string(),
            translation: def.translation.trim().to_string(),
            pos: def.pos,
            // nouns can be picked up unless the lexicon says otherwise
            portable: def.portable.unwrap_or(def.pos == PartOfSpeech::Noun),
            edible: def.edible,
            drinkable: def.drinkable,
            usable: def.usable,
        }
    }
}

/// Read access to vocabulary data, shared by loaders, the engine and restore.
pub trait LexiconProvider: Send + Sync {
    /// Look up a single word by its exact (normalized) spelling.
    fn get_word(&self, word: &str) -> Option<&LexiconEntry>;
    /// All entries with the given part of speech, ordered by word.
    fn get_words_by_pos(&self, pos: PartOfSpeech) -> Vec<&LexiconEntry>;
}

/// In-memory lexicon keyed by word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashMap<String, LexiconEntry>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lexicon from a parsed lexicon file.
    ///
    /// Entries whose word is not written in the Persian/Arabic script block, or
    /// that have no translation, are skipped with a warning. A repeated word
    /// silently replaces the earlier entry; `mud_data::validate_lexicon`
    /// reports duplicates.
    pub fn from_def(def: &LexiconDef) -> Self {
        let mut lexicon = Self::new();
        for word_def in &def.words {
            if !is_practice_script(&word_def.word) {
                warn!("skipping lexicon entry '{}': not in Persian script", word_def.word);
                continue;
            }
            if word_def.translation.trim().is_empty() {
                warn!("skipping lexicon entry '{}': missing translation", word_def.word);
                continue;
            }
            lexicon.insert(LexiconEntry::from(word_def));
        }
        lexicon
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(&mut self, entry: LexiconEntry) -> Option<LexiconEntry> {
        self.words.insert(entry.word.clone(), entry)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl LexiconProvider for Lexicon {
    fn get_word(&self, word: &str) -> Option<&LexiconEntry> {
        self.words.get(word)
    }

    fn get_words_by_pos(&self, pos: PartOfSpeech) -> Vec<&LexiconEntry> {
        let mut found: Vec<&LexiconEntry> = self.words.values().filter(|entry| entry.pos == pos).collect();
        found.sort_by(|a, b| a.word.cmp(&b.word));
        found
    }
}

/// True if `word` is non-blank and made only of Arabic-block letters,
/// whitespace and zero-width non-joiners.
pub fn is_practice_script(word: &str) -> bool {
    !word.trim().is_empty()
        && word
            .chars()
            .all(|ch| ('\u{0600}'..='\u{06FF}').contains(&ch) || ch.is_whitespace() || ch == '\u{200C}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(word: &str, translation: &str, pos: PartOfSpeech) -> WordDef {
        WordDef {
            word: word.into(),
            translation: translation.into(),
            pos,
            portable: None,
            edible: false,
            drinkable: false,
            usable: false,
        }
    }

    #[test]
    fn script_check_accepts_persian_and_rejects_latin() {
        assert!(is_practice_script("کتاب"));
        assert!(is_practice_script("می\u{200C}روم"));
        assert!(!is_practice_script("book"));
        assert!(!is_practice_script("کتاب1"));
        assert!(!is_practice_script("   "));
    }

    #[test]
    fn from_def_skips_invalid_entries() {
        let def = LexiconDef {
            words: vec![
                word("کتاب", "book", PartOfSpeech::Noun),
                word("book", "book", PartOfSpeech::Noun),
                word("سیب", "  ", PartOfSpeech::Noun),
            ],
        };
        let lexicon = Lexicon::from_def(&def);
        assert_eq!(lexicon.len(), 1);
        assert!(lexicon.get_word("کتاب").is_some());
        assert!(lexicon.get_word("book").is_none());
    }

    #[test]
    fn nouns_default_to_portable() {
        let mut table = word("میز", "table", PartOfSpeech::Noun);
        table.portable = Some(false);
        let def = LexiconDef {
            words: vec![word("کتاب", "book", PartOfSpeech::Noun), table, word("خوردن", "to eat", PartOfSpeech::Verb)],
        };
        let lexicon = Lexicon::from_def(&def);
        assert!(lexicon.get_word("کتاب").is_some_and(|e| e.portable));
        assert!(lexicon.get_word("میز").is_some_and(|e| !e.portable));
        assert!(lexicon.get_word("خوردن").is_some_and(|e| !e.portable));
    }

    #[test]
    fn words_by_pos_are_sorted() {
        let def = LexiconDef {
            words: vec![
                word("سیب", "apple", PartOfSpeech::Noun),
                word("بزرگ", "big", PartOfSpeech::Adjective),
                word("کتاب", "book", PartOfSpeech::Noun),
                word("آب", "water", PartOfSpeech::Noun),
            ],
        };
        let lexicon = Lexicon::from_def(&def);
        let nouns: Vec<&str> = lexicon
            .get_words_by_pos(PartOfSpeech::Noun)
            .iter()
            .map(|e| e.word.as_str())
            .collect();
        let mut expected = vec!["سیب", "کتاب", "آب"];
        expected.sort_unstable();
        assert_eq!(nouns, expected);
        assert_eq!(lexicon.get_words_by_pos(PartOfSpeech::Adjective).len(), 1);
    }
}
