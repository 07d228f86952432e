//! WorldDef loader and conversion into a [`WorldSeed`].
//!
//! Every item and NPC word is canonicalized and looked up in the lexicon; a
//! world that names unknown words is rejected with all problems listed at once.
//! Exit destinations are deliberately left unchecked here.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::warn;
use mud_data::{NpcDef, RoomDef, WorldDef};

use crate::item::{Item, ItemHolder};
use crate::lexicon::LexiconProvider;
use crate::markup::marked_words;
use crate::normalize::{TextNormalizer, canonical};
use crate::npc::Npc;
use crate::room::Room;
use crate::world::WorldSeed;

/// Load a `WorldDef` from a RON file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid `WorldDef` RON.
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading worlddef from '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing worlddef RON from '{}'", path.display()))
}

/// Convert a validated `WorldDef` into the shared world template.
///
/// # Errors
/// Returns an error listing every item or NPC whose word is not in the lexicon
/// and every pair of exits that canonicalize to the same direction.
pub fn build_seed(def: &WorldDef, lexicon: &dyn LexiconProvider, normalizer: &dyn TextNormalizer) -> Result<WorldSeed> {
    let mut problems = Vec::new();
    let mut rooms = HashMap::new();

    for room_def in &def.rooms {
        let room = room_from_def(room_def, lexicon, normalizer, &mut problems);
        rooms.insert(room.id.clone(), room);
    }

    if !problems.is_empty() {
        let details = problems
            .into_iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("world definition has problems:\n{details}");
    }

    Ok(WorldSeed {
        title: def.game.title.clone(),
        intro: def.game.intro.clone(),
        player_name: def.game.player.name.clone(),
        start_room: def.game.player.start_room.clone(),
        rooms,
    })
}

fn room_from_def(
    def: &RoomDef,
    lexicon: &dyn LexiconProvider,
    normalizer: &dyn TextNormalizer,
    problems: &mut Vec<String>,
) -> Room {
    let mut room = Room::new(&def.id, &def.name, &def.desc);

    for exit in &def.exits {
        let direction = canonical(normalizer, &exit.direction);
        if room.exits.contains_key(&direction) {
            problems.push(format!(
                "room '{}': exit '{}' collides with another exit named '{direction}'",
                def.id, exit.direction
            ));
            continue;
        }
        room.exits.insert(direction, exit.to.clone());
    }

    for word in &def.items {
        let key = canonical(normalizer, word);
        match lexicon.get_word(&key) {
            Some(entry) => room.add_item(Item::from_entry(entry)),
            None => problems.push(format!("room '{}': item '{word}' is not in the lexicon", def.id)),
        }
    }

    for npc_def in &def.npcs {
        match npc_from_def(npc_def, lexicon, normalizer) {
            Some(npc) => room.npcs.push(npc),
            None => problems.push(format!("room '{}': npc '{}' is not in the lexicon", def.id, npc_def.word)),
        }
    }

    for marked in marked_words(&def.desc) {
        if lexicon.get_word(&canonical(normalizer, marked)).is_none() {
            warn!("room '{}': highlighted word '{marked}' is not in the lexicon", def.id);
        }
    }

    room
}

fn npc_from_def(def: &NpcDef, lexicon: &dyn LexiconProvider, normalizer: &dyn TextNormalizer) -> Option<Npc> {
    let entry = lexicon.get_word(&canonical(normalizer, &def.word))?;
    let vocabulary = def
        .vocabulary
        .iter()
        .map(|word| canonical(normalizer, word))
        .inspect(|word| {
            if lexicon.get_word(word).is_none() {
                warn!("npc '{}' teaches '{word}', which is not in the lexicon", def.word);
            }
        })
        .collect();
    Some(Npc::from_entry(entry, def.dialogue.clone(), vocabulary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{Lexicon, LexiconEntry};
    use crate::normalize::{Identity, PersianForms};
    use mud_data::PartOfSpeech;

    fn lexicon() -> Lexicon {
        let mut lexicon = Lexicon::new();
        for (word, portable) in [("کتاب", true), ("میز", false), ("پیرمرد", false)] {
            lexicon.insert(LexiconEntry {
                word: word.into(),
                translation: "x".into(),
                pos: PartOfSpeech::Noun,
                portable,
                edible: false,
                drinkable: false,
                usable: false,
            });
        }
        lexicon
    }

    const WORLD: &str = r#"(
    game: (
        title: "Test",
        player: (name: "Tester", start_room: "library"),
    ),
    rooms: [
        (
            id: "library",
            name: "Library",
            desc: "A **کتاب** on a **میز**.",
            exits: [(direction: "North", to: "garden"), (direction: "down", to: "nowhere")],
            items: ["کتاب", "میز"],
            npcs: [(word: "پیرمرد", dialogue: ["Welcome!"], vocabulary: ["کتاب"])],
        ),
        (id: "garden", name: "Garden", desc: "Green."),
    ],
)"#;

    #[test]
    fn builds_rooms_items_and_npcs() {
        let def: WorldDef = ron::from_str(WORLD).unwrap();
        let seed = build_seed(&def, &lexicon(), &Identity).unwrap();
        assert_eq!(seed.start_room, "library");
        assert_eq!(seed.player_name, "Tester");
        let library = &seed.rooms["library"];
        assert_eq!(library.exit_to("north"), Some("garden"));
        assert!(library.find_item("میز").is_some_and(|item| !item.is_portable()));
        assert_eq!(library.npcs[0].vocabulary, vec!["کتاب".to_string()]);
    }

    #[test]
    fn dangling_exits_are_not_load_errors() {
        let def: WorldDef = ron::from_str(WORLD).unwrap();
        let seed = build_seed(&def, &lexicon(), &PersianForms).unwrap();
        assert_eq!(seed.rooms["library"].exit_to("down"), Some("nowhere"));
    }

    #[test]
    fn unknown_words_are_collected() {
        let mut def: WorldDef = ron::from_str(WORLD).unwrap();
        def.rooms[1].items.push("سیب".into());
        def.rooms[1].npcs.push(NpcDef {
            word: "باغبان".into(),
            dialogue: Vec::new(),
            vocabulary: Vec::new(),
        });
        let err = build_seed(&def, &lexicon(), &Identity).unwrap_err().to_string();
        assert!(err.contains("سیب"));
        assert!(err.contains("باغبان"));
    }

    #[test]
    fn exits_differing_only_in_case_collide() {
        let mut def: WorldDef = ron::from_str(WORLD).unwrap();
        def.rooms[0].exits.push(mud_data::ExitDef {
            direction: "north".into(),
            to: "garden".into(),
        });
        let err = build_seed(&def, &lexicon(), &Identity).unwrap_err().to_string();
        assert!(err.contains("exit 'north' collides"), "{err}");
    }
}
