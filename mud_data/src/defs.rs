use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Stable identifier used for rooms in world data.
pub type Id = String;

/// Grammatical category of a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    #[serde(other)]
    Other,
}

impl PartOfSpeech {
    /// Look up a part of speech by its lowercase key (`"noun"`, `"verb"`, ...).
    pub fn from_key(key: &str) -> Option<PartOfSpeech> {
        match key.trim().to_lowercase().as_str() {
            "noun" | "n" => Some(PartOfSpeech::Noun),
            "verb" | "v" => Some(PartOfSpeech::Verb),
            "adjective" | "adj" => Some(PartOfSpeech::Adjective),
            "adverb" | "adv" => Some(PartOfSpeech::Adverb),
            "pronoun" | "pron" => Some(PartOfSpeech::Pronoun),
            "preposition" | "prep" => Some(PartOfSpeech::Preposition),
            "other" => Some(PartOfSpeech::Other),
            _ => None,
        }
    }
}

impl Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Other => "other",
        };
        write!(f, "{key}")
    }
}

/// Top-level lexicon file: a flat list of `[[words]]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconDef {
    #[serde(default)]
    pub words: Vec<WordDef>,
}

/// A single vocabulary entry.
///
/// Item behavior flags are optional. When `portable` is absent it is derived from
/// the part of speech (nouns can be carried); the other flags default to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDef {
    pub word: String,
    pub translation: String,
    pub pos: PartOfSpeech,
    #[serde(default)]
    pub portable: Option<bool>,
    #[serde(default)]
    pub edible: bool,
    #[serde(default)]
    pub drinkable: bool,
    #[serde(default)]
    pub usable: bool,
}

/// Top-level compiled world data loaded by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldDef {
    pub game: GameDef,
    #[serde(default)]
    pub rooms: Vec<RoomDef>,
}

/// Game-level metadata and startup configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameDef {
    pub title: String,
    #[serde(default)]
    pub intro: String,
    pub player: PlayerDef,
}

/// Starting player configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    pub name: String,
    pub start_room: Id,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            name: "Traveler".to_string(),
            start_room: String::new(),
        }
    }
}

/// Room definition used by the engine at load time.
///
/// Items are listed by identity word only; everything else about an item comes
/// from its lexicon entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    pub id: Id,
    pub name: String,
    pub desc: String,
    #[serde(default)]
    pub exits: Vec<ExitDef>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
}

/// A directed exit. The destination is only checked when the player walks through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitDef {
    pub direction: String,
    pub to: Id,
}

/// Non-playable character placed in a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcDef {
    pub word: String,
    #[serde(default)]
    pub dialogue: Vec<String>,
    /// Words the player learns by talking to this character.
    #[serde(default)]
    pub vocabulary: Vec<String>,
}
