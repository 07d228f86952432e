use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or duplicated entries in content files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate structural rules of a `WorldDef`.
///
/// Exit destinations are deliberately left alone: a broken exit is reported when a
/// player tries to walk through it, not when the world is loaded.
///
/// ```
/// use mud_data::{ExitDef, GameDef, PlayerDef, RoomDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     game: GameDef {
///         title: "Demo".into(),
///         intro: String::new(),
///         player: PlayerDef {
///             name: "Player".into(),
///             start_room: "library".into(),
///         },
///     },
///     rooms: vec![RoomDef {
///         id: "library".into(),
///         name: "Library".into(),
///         desc: "A quiet room.".into(),
///         exits: vec![ExitDef { direction: "north".into(), to: "nowhere-yet".into() }],
///         items: Vec::new(),
///         npcs: Vec::new(),
///     }],
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut room_ids = HashSet::new();

    for room in &world.rooms {
        if room.id.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("room named '{}' has an empty id", room.name),
            });
        }
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::DuplicateId {
                kind: "room",
                id: room.id.clone(),
            });
        }

        let mut directions = HashSet::new();
        for exit in &room.exits {
            if exit.direction.trim().is_empty() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("room '{}' has an exit with no direction", room.id),
                });
            } else if !directions.insert(exit.direction.trim().to_lowercase()) {
                errors.push(ValidationError::InvalidValue {
                    context: format!("room '{}' has two exits named '{}'", room.id, exit.direction),
                });
            }
        }

        for word in &room.items {
            if word.trim().is_empty() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("room '{}' lists an item with an empty word", room.id),
                });
            }
        }
        for npc in &room.npcs {
            if npc.word.trim().is_empty() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("room '{}' lists an npc with an empty word", room.id),
                });
            }
        }
    }

    let start = &world.game.player.start_room;
    if !room_ids.contains(start.as_str()) {
        errors.push(ValidationError::MissingReference {
            kind: "room",
            id: start.clone(),
            context: "player start room".to_string(),
        });
    }

    errors
}

/// Validate a lexicon for duplicate or empty entries.
///
/// Script checks on the words themselves belong to the lexicon loader, which skips
/// offending entries instead of rejecting the whole file.
pub fn validate_lexicon(lexicon: &LexiconDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for entry in &lexicon.words {
        if entry.word.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("lexicon entry '{}' has an empty word", entry.translation),
            });
            continue;
        }
        if entry.translation.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("lexicon entry '{}' has no translation", entry.word),
            });
        }
        if !seen.insert(entry.word.as_str()) {
            errors.push(ValidationError::DuplicateId {
                kind: "word",
                id: entry.word.clone(),
            });
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str) -> RoomDef {
        RoomDef {
            id: id.into(),
            name: id.to_uppercase(),
            desc: String::new(),
            exits: Vec::new(),
            items: Vec::new(),
            npcs: Vec::new(),
        }
    }

    fn world_with(rooms: Vec<RoomDef>, start: &str) -> WorldDef {
        WorldDef {
            game: GameDef {
                title: "t".into(),
                intro: String::new(),
                player: PlayerDef {
                    name: "p".into(),
                    start_room: start.into(),
                },
            },
            rooms,
        }
    }

    fn word(word: &str, translation: &str) -> WordDef {
        WordDef {
            word: word.into(),
            translation: translation.into(),
            pos: PartOfSpeech::Noun,
            portable: None,
            edible: false,
            drinkable: false,
            usable: false,
        }
    }

    #[test]
    fn duplicate_room_ids_are_reported() {
        let errors = validate_world(&world_with(vec![room("a"), room("a")], "a"));
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateId {
                kind: "room",
                id: "a".into()
            }]
        );
    }

    #[test]
    fn missing_start_room_is_reported() {
        let errors = validate_world(&world_with(vec![room("a")], "b"));
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::MissingReference { kind: "room", id, .. }] if id == "b"
        ));
    }

    #[test]
    fn dangling_exit_destinations_are_not_checked() {
        let mut library = room("library");
        library.exits.push(ExitDef {
            direction: "north".into(),
            to: "garden".into(),
        });
        assert!(validate_world(&world_with(vec![library], "library")).is_empty());
    }

    #[test]
    fn repeated_exit_direction_is_invalid() {
        let mut library = room("library");
        for (direction, to) in [("north", "a"), ("North ", "b")] {
            library.exits.push(ExitDef {
                direction: direction.into(),
                to: to.into(),
            });
        }
        let errors = validate_world(&world_with(vec![library], "library"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("two exits named 'North '"));
    }

    #[test]
    fn lexicon_duplicates_and_blank_translations_are_reported() {
        let lexicon = LexiconDef {
            words: vec![word("کتاب", "book"), word("کتاب", "book"), word("میز", " ")],
        };
        let errors = validate_lexicon(&lexicon);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::DuplicateId {
            kind: "word",
            id: "کتاب".into()
        }));
    }

    #[test]
    fn part_of_speech_keys_round_trip_through_display() {
        for pos in [
            PartOfSpeech::Noun,
            PartOfSpeech::Verb,
            PartOfSpeech::Adjective,
            PartOfSpeech::Adverb,
            PartOfSpeech::Pronoun,
            PartOfSpeech::Preposition,
            PartOfSpeech::Other,
        ] {
            assert_eq!(PartOfSpeech::from_key(&pos.to_string()), Some(pos));
        }
        assert_eq!(PartOfSpeech::from_key("gerund"), None);
    }
}
