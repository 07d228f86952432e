//! Save documents and save-slot files.
//!
//! A [`SaveDocument`] records only identities and mutable state; everything
//! else (translations, flags, dialogue, exits) is rebuilt from the lexicon and
//! the world seed on restore, so a save survives content edits as long as its
//! words still exist.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use log::{info, warn};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::MUD_VERSION;
use crate::item::{Item, ItemState};
use crate::lexicon::LexiconProvider;
use crate::npc::{Npc, NpcState};
use crate::player::Player;
use crate::room::RoomState;
use crate::slug::sanitize_slug;
use crate::world::{GameState, WorldSeed};

pub const SAVE_DIR: &str = "saved_games";

/// Failures reading or writing saves. All are recoverable: the running game is unaffected.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize save document: {0}")]
    Serialize(#[from] ron::Error),
    #[error("could not parse save document from {origin}: {source}")]
    Deserialize {
        origin: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub word: String,
    #[serde(default)]
    pub state: ItemState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedNpc {
    pub word: String,
    #[serde(default)]
    pub state: NpcState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedRoom {
    #[serde(default)]
    pub state: RoomState,
    #[serde(default)]
    pub items: Vec<SavedItem>,
    #[serde(default)]
    pub npcs: Vec<SavedNpc>,
}

/// Serializable snapshot of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub version: String,
    pub saved_at: String,
    pub player_name: String,
    pub current_room: String,
    pub inventory: Vec<SavedItem>,
    pub learned_words: BTreeSet<String>,
    pub rooms: BTreeMap<String, SavedRoom>,
}

fn saved_item(item: &Item) -> SavedItem {
    SavedItem {
        word: item.word.clone(),
        state: item.state,
    }
}

impl SaveDocument {
    /// Snapshot the mutable parts of `state`.
    pub fn capture(state: &GameState) -> SaveDocument {
        let rooms = state
            .rooms
            .iter()
            .map(|(id, room)| {
                let saved = SavedRoom {
                    state: room.state,
                    items: room.items.iter().map(saved_item).collect(),
                    npcs: room
                        .npcs
                        .iter()
                        .map(|npc| SavedNpc {
                            word: npc.word.clone(),
                            state: npc.state,
                        })
                        .collect(),
                };
                (id.clone(), saved)
            })
            .collect();
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        SaveDocument {
            version: state.version.clone(),
            saved_at: now.format(&Rfc3339).unwrap_or_default(),
            player_name: state.player.name.clone(),
            current_room: state.player.location.clone(),
            inventory: state.player.inventory.iter().map(saved_item).collect(),
            learned_words: state.player.learned_words.clone(),
            rooms,
        }
    }

    /// Serialize to pretty-printed RON.
    ///
    /// # Errors
    /// Returns [`PersistenceError::Serialize`] if RON serialization fails.
    pub fn to_ron(&self) -> Result<String, PersistenceError> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    /// Parse a document from RON text. `origin` names the source in error messages.
    ///
    /// # Errors
    /// Returns [`PersistenceError::Deserialize`] if the text is not a save document.
    pub fn from_ron(text: &str, origin: &str) -> Result<SaveDocument, PersistenceError> {
        ron::from_str(text).map_err(|source| PersistenceError::Deserialize {
            origin: origin.to_string(),
            source,
        })
    }
}

/// What `restore` had to change to make a save fit the current content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Set when the save was written by another engine version.
    pub version_mismatch: Option<String>,
    pub dropped_items: Vec<String>,
    pub dropped_npcs: Vec<String>,
    pub unknown_rooms: Vec<String>,
    /// The saved current room no longer exists; the player was moved to the start room.
    pub relocated: bool,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.version_mismatch.is_none()
            && self.dropped_items.is_empty()
            && self.dropped_npcs.is_empty()
            && self.unknown_rooms.is_empty()
            && !self.relocated
    }
}

fn rebuild_item(saved: &SavedItem, lexicon: &dyn LexiconProvider, report: &mut RestoreReport) -> Option<Item> {
    if let Some(entry) = lexicon.get_word(&saved.word) {
        Some(Item::from_entry(entry).with_state(saved.state))
    } else {
        warn!("dropping saved item '{}': not in the lexicon", saved.word);
        report.dropped_items.push(saved.word.clone());
        None
    }
}

fn rebuild_npc(
    saved: &SavedNpc,
    room_id: &str,
    seed: &WorldSeed,
    lexicon: &dyn LexiconProvider,
    report: &mut RestoreReport,
) -> Option<Npc> {
    let Some(entry) = lexicon.get_word(&saved.word) else {
        warn!("dropping saved npc '{}': not in the lexicon", saved.word);
        report.dropped_npcs.push(saved.word.clone());
        return None;
    };
    let (dialogue, vocabulary) = seed
        .npc_template(room_id, &saved.word)
        .map(|template| (template.dialogue.clone(), template.vocabulary.clone()))
        .unwrap_or_default();
    Some(Npc::from_entry(entry, dialogue, vocabulary).with_state(saved.state))
}

/// Rebuild a game from a save document.
///
/// Never fails: words missing from the lexicon are dropped, rooms missing from
/// the seed are ignored, and a dangling current room falls back to the start
/// room. Everything that was adjusted is listed in the returned report.
pub fn restore(doc: &SaveDocument, seed: &WorldSeed, lexicon: &dyn LexiconProvider) -> (GameState, RestoreReport) {
    let mut report = RestoreReport::default();
    if doc.version != MUD_VERSION {
        warn!("restoring a save from version {} into {MUD_VERSION}", doc.version);
        report.version_mismatch = Some(doc.version.clone());
    }

    let mut rooms = seed.rooms.clone();
    for (room_id, saved) in &doc.rooms {
        let Some(room) = rooms.get_mut(room_id) else {
            warn!("ignoring saved room '{room_id}': not in the world");
            report.unknown_rooms.push(room_id.clone());
            continue;
        };
        room.state = saved.state;
        room.items = saved
            .items
            .iter()
            .filter_map(|item| rebuild_item(item, lexicon, &mut report))
            .collect();
        room.npcs = saved
            .npcs
            .iter()
            .filter_map(|npc| rebuild_npc(npc, room_id, seed, lexicon, &mut report))
            .collect();
    }

    let mut player = Player::new(doc.player_name.clone(), doc.current_room.clone());
    if !rooms.contains_key(&doc.current_room) {
        warn!("saved room '{}' no longer exists; starting at '{}'", doc.current_room, seed.start_room);
        player.location = seed.start_room.clone();
        report.relocated = true;
    }
    player.inventory = doc
        .inventory
        .iter()
        .filter_map(|item| rebuild_item(item, lexicon, &mut report))
        .collect();
    player.learned_words = doc.learned_words.clone();

    (GameState::new(player, rooms), report)
}

/// Path of the file for `slot` inside `dir`.
pub fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{}.ron", sanitize_slug(slot)))
}

/// Write `doc` into `dir` under `slot`, creating the directory if needed.
///
/// # Errors
/// Returns a [`PersistenceError`] if serialization or any file operation fails.
pub fn write_save(doc: &SaveDocument, dir: &Path, slot: &str) -> Result<PathBuf, PersistenceError> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;
    let path = save_path(dir, slot);
    fs::write(&path, doc.to_ron()?).map_err(io_error(&path))?;
    info!("game saved to '{}'", path.display());
    Ok(path)
}

/// Read a save document from disk.
///
/// # Errors
/// Returns a [`PersistenceError`] if the file cannot be read or parsed.
pub fn read_save(path: &Path) -> Result<SaveDocument, PersistenceError> {
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    SaveDocument::from_ron(&text, &format!("'{}'", path.display()))
}

/// A save file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub slot: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

/// Discover save slot files stored in `dir`, sorted by slot name.
///
/// # Errors
/// Returns an error if the directory contents cannot be read or enumerated.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>, PersistenceError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let entry = entry.map_err(io_error(dir))?;
        if let Some(slot) = slot_from_entry(&entry) {
            slots.push(slot);
        }
    }
    slots.sort_by(|a, b| a.slot.cmp(&b.slot));
    Ok(slots)
}

fn slot_from_entry(entry: &fs::DirEntry) -> Option<SaveSlot> {
    let path = entry.path();
    if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
        return None;
    }
    let slot = path.file_stem().and_then(|stem| stem.to_str())?.to_string();
    let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
    Some(SaveSlot { slot, path, modified })
}

/// Format a human-friendly modified time relative to now.
pub fn format_modified(modified: SystemTime) -> String {
    match SystemTime::now().duration_since(modified) {
        Ok(delta) => format_duration(delta),
        Err(_) => "in the future".to_string(),
    }
}

/// Convert a duration into a compact "time ago" string.
fn format_duration(duration: Duration) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = MINUTE * 60;
    const DAY: u64 = HOUR * 24;
    const WEEK: u64 = DAY * 7;

    let secs = duration.as_secs();
    if secs < 30 {
        "just now".to_string()
    } else if secs < MINUTE {
        format!("{secs}s ago")
    } else if secs < HOUR {
        format!("{}m ago", secs / MINUTE)
    } else if secs < DAY {
        format!("{}h ago", secs / HOUR)
    } else if secs < WEEK {
        format!("{}d ago", secs / DAY)
    } else {
        format!("{}w ago", secs / WEEK)
    }
}
