//! Executes validated commands against a [`GameState`].
//!
//! Each command is one atomic transition `GameState x Command -> GameState x Outcome`.
//! The engine itself holds no per-game state, so one instance can serve any
//! number of sessions.

use log::{error, info, warn};
use thiserror::Error;

use crate::command::{Command, Verb};
use crate::item::ItemHolder;
use crate::outcome::{Conversation, EntityRef, Examined, Outcome, Rejection, Response, RoomView};
use crate::parser::CommandParser;
use crate::response::ResponseGenerator;
use crate::world::GameState;

/// Faults that mean the game data or a validated command is inconsistent.
/// State is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("player is in room '{0}', which does not exist")]
    NoCurrentRoom(String),
    #[error("exit '{direction}' from '{from}' leads to unknown room '{to}'")]
    BrokenExit { from: String, direction: String, to: String },
    #[error("'{verb}' was validated but '{word}' could not be found")]
    LookupInconsistency { verb: Verb, word: String },
}

fn missing(verb: Verb, word: &str) -> EngineError {
    EngineError::LookupInconsistency {
        verb,
        word: word.to_string(),
    }
}

/// Parser, executor and response generator wired together.
#[derive(Debug, Default)]
pub struct GameEngine {
    parser: CommandParser,
    responder: ResponseGenerator,
}

impl GameEngine {
    pub fn new(parser: CommandParser, responder: ResponseGenerator) -> Self {
        Self { parser, responder }
    }

    pub fn responder(&self) -> &ResponseGenerator {
        &self.responder
    }

    /// Run one line of player input through parse, validate, execute and render.
    ///
    /// Parse and validation failures come back as a rejected [`Response`] and
    /// leave `state` unchanged.
    ///
    /// # Errors
    /// Returns an [`EngineError`] if the game state is inconsistent.
    pub fn process(&self, state: &mut GameState, raw: &str) -> Result<Response, EngineError> {
        let parsed = match self.parser.parse(raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                info!("rejected input '{}': {err}", raw.trim());
                return Ok(self.reject(Rejection::Parse(err)));
            },
        };
        let validated = CommandParser::validate(&parsed, state.current_room()?, &state.player);
        let command = match validated {
            Ok(command) => command,
            Err(err) => {
                info!("rejected '{}': {err}", parsed.verb);
                return Ok(self.reject(Rejection::Invalid(err)));
            },
        };
        let outcome = Self::execute(state, &command).inspect_err(|err| error!("executing {command:?}: {err}"))?;
        Ok(Response {
            text: self.responder.render(&outcome),
            result: Ok(outcome),
        })
    }

    /// Describe the current room without reading any input. Used for the
    /// opening text of a new session.
    ///
    /// # Errors
    /// Returns [`EngineError::NoCurrentRoom`] if the player's location is dangling.
    pub fn describe(&self, state: &GameState) -> Result<Response, EngineError> {
        let outcome = Outcome::Looked(RoomView::of(state.current_room()?));
        Ok(Response {
            text: self.responder.render(&outcome),
            result: Ok(outcome),
        })
    }

    fn reject(&self, rejection: Rejection) -> Response {
        Response {
            text: self.responder.render_rejection(&rejection),
            result: Err(rejection),
        }
    }

    /// Apply a validated command.
    ///
    /// # Errors
    /// Returns an [`EngineError`] if something the command names has gone
    /// missing or an exit leads nowhere. No mutation happens in that case.
    pub fn execute(state: &mut GameState, command: &Command) -> Result<Outcome, EngineError> {
        match command {
            Command::Look => Ok(Outcome::Looked(RoomView::of(state.current_room()?))),
            Command::LookAt(word) => look_at(state, word),
            Command::Move(direction) => move_to(state, direction),
            Command::Take(word) => take(state, word),
            Command::Drop(word) => drop_item(state, word),
            Command::Eat(word) => consume(state, word, Verb::Eat),
            Command::Drink(word) => consume(state, word, Verb::Drink),
            Command::Use { item, on } => use_item(state, item, on.as_deref()),
            Command::Give { item, npc } => give(state, item, npc),
            Command::Talk(word) => talk(state, word),
            Command::Open(word) => set_open(state, word, true),
            Command::Close(word) => set_open(state, word, false),
            Command::Inventory => Ok(Outcome::Inventory(
                state.player.inventory.iter().map(EntityRef::of).collect(),
            )),
            Command::Help => Ok(Outcome::Help(Verb::ALL.to_vec())),
        }
    }
}

fn look_at(state: &GameState, word: &str) -> Result<Outcome, EngineError> {
    let room = state.current_room()?;
    if let Some(item) = room.find_item(word) {
        Ok(Outcome::Examined(Examined::item(item)))
    } else if let Some(npc) = room.find_npc(word) {
        Ok(Outcome::Examined(Examined::npc(npc)))
    } else {
        Err(missing(Verb::Look, word))
    }
}

fn move_to(state: &mut GameState, direction: &str) -> Result<Outcome, EngineError> {
    let from = state.current_room()?;
    let destination = from
        .exit_to(direction)
        .ok_or_else(|| missing(Verb::Move, direction))?
        .to_string();
    let from_id = from.id.clone();
    let Some(next) = state.rooms.get_mut(&destination) else {
        return Err(EngineError::BrokenExit {
            from: from_id,
            direction: direction.to_string(),
            to: destination,
        });
    };
    let first_visit = !next.state.visited;
    next.state.visited = true;
    let view = RoomView::of(next);
    info!("player moved {direction} from '{}' to '{}'", state.player.location, view.room_id);
    state.player.location = view.room_id.clone();
    Ok(Outcome::Moved {
        direction: direction.to_string(),
        first_visit,
        room: view,
    })
}

fn take(state: &mut GameState, word: &str) -> Result<Outcome, EngineError> {
    let room = state.current_room_mut()?;
    let item = room.find_item(word).ok_or_else(|| missing(Verb::Take, word))?;
    if !item.is_portable() {
        return Ok(Outcome::Refused {
            verb: Verb::Take,
            entity: EntityRef::of(item),
        });
    }
    let item = room.remove_item(word).ok_or_else(|| missing(Verb::Take, word))?;
    info!("player took '{word}' from '{}'", room.id);
    let taken = EntityRef::of(&item);
    state.player.add_item(item);
    let new_word = !state.player.learn_words([&taken.word]).is_empty();
    Ok(Outcome::Took { item: taken, new_word })
}

fn drop_item(state: &mut GameState, word: &str) -> Result<Outcome, EngineError> {
    // resolve the room first so a dangling location cannot lose the item
    state.current_room()?;
    let item = state.player.remove_item(word).ok_or_else(|| missing(Verb::Drop, word))?;
    let dropped = EntityRef::of(&item);
    let room = state.current_room_mut()?;
    info!("player dropped '{word}' in '{}'", room.id);
    room.add_item(item);
    Ok(Outcome::Dropped(dropped))
}

fn consume(state: &mut GameState, word: &str, verb: Verb) -> Result<Outcome, EngineError> {
    let item = state.player.find_item(word).ok_or_else(|| missing(verb, word))?;
    let allowed = match verb {
        Verb::Drink => item.is_drinkable(),
        _ => item.is_edible(),
    };
    if !allowed {
        return Ok(Outcome::Refused {
            verb,
            entity: EntityRef::of(item),
        });
    }
    let item = state.player.remove_item(word).ok_or_else(|| missing(verb, word))?;
    info!("player consumed '{word}' ({verb})");
    let consumed = EntityRef::of(&item);
    Ok(match verb {
        Verb::Drink => Outcome::Drank(consumed),
        _ => Outcome::Ate(consumed),
    })
}

fn use_item(state: &GameState, word: &str, on: Option<&str>) -> Result<Outcome, EngineError> {
    let item = state.player.find_item(word).ok_or_else(|| missing(Verb::Use, word))?;
    let target = match on {
        Some(target_word) => {
            let room = state.current_room()?;
            let target = room.find_item(target_word).ok_or_else(|| missing(Verb::Use, target_word))?;
            Some(EntityRef::of(target))
        },
        None => None,
    };
    Ok(Outcome::Used {
        item: EntityRef::of(item),
        on: target,
    })
}

fn give(state: &mut GameState, word: &str, npc_word: &str) -> Result<Outcome, EngineError> {
    let npc = state
        .current_room()?
        .find_npc(npc_word)
        .map(EntityRef::of)
        .ok_or_else(|| missing(Verb::Give, npc_word))?;
    let item = state.player.remove_item(word).ok_or_else(|| missing(Verb::Give, word))?;
    // TODO: decide whether gifts should end up with the NPC; for now they are discarded
    warn!("'{word}' given to '{npc_word}' is discarded");
    Ok(Outcome::Gave {
        item: EntityRef::of(&item),
        npc,
    })
}

fn talk(state: &mut GameState, word: &str) -> Result<Outcome, EngineError> {
    let location = &state.player.location;
    let room = state
        .rooms
        .get_mut(location)
        .ok_or_else(|| EngineError::NoCurrentRoom(location.clone()))?;
    let npc = room.find_npc_mut(word).ok_or_else(|| missing(Verb::Talk, word))?;
    let first_meeting = !npc.state.greeted;
    npc.state.greeted = true;
    let npc_ref = EntityRef::of(&*npc);
    let dialogue = npc.dialogue.clone();
    let vocabulary = npc.vocabulary.clone();
    let new_words = state.player.learn_words(&vocabulary);
    Ok(Outcome::Talked(Conversation {
        npc: npc_ref,
        dialogue,
        new_words,
        first_meeting,
    }))
}

fn set_open(state: &mut GameState, word: &str, open: bool) -> Result<Outcome, EngineError> {
    let verb = if open { Verb::Open } else { Verb::Close };
    let item = state
        .current_room_mut()?
        .find_item_mut(word)
        .ok_or_else(|| missing(verb, word))?;
    let entity = EntityRef::of(&*item);
    if item.is_open() == open {
        return Ok(if open {
            Outcome::AlreadyOpen(entity)
        } else {
            Outcome::AlreadyClosed(entity)
        });
    }
    item.state.is_open = Some(open);
    info!("'{word}' is now {}", if open { "open" } else { "closed" });
    Ok(if open {
        Outcome::Opened(entity)
    } else {
        Outcome::Closed(entity)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::lexicon::LexiconEntry;
    use crate::npc::Npc;
    use crate::player::Player;
    use crate::room::Room;
    use mud_data::PartOfSpeech;
    use std::collections::HashMap;

    fn entry(word: &str, portable: bool, edible: bool, drinkable: bool) -> LexiconEntry {
        LexiconEntry {
            word: word.into(),
            translation: format!("{word}-en"),
            pos: PartOfSpeech::Noun,
            portable,
            edible,
            drinkable,
            usable: false,
        }
    }

    fn state() -> GameState {
        let mut library = Room::new("library", "Library", "A **کتاب** on a **میز**.")
            .with_exit("north", "garden")
            .with_exit("down", "cellar");
        library.add_item(Item::from_entry(&entry("کتاب", true, false, false)));
        library.add_item(Item::from_entry(&entry("میز", false, false, false)));
        library.npcs.push(Npc::from_entry(
            &entry("پیرمرد", false, false, false),
            vec!["Welcome!".into()],
            vec!["کتاب".into(), "میز".into()],
        ));
        let garden = Room::new("garden", "Garden", "Green.").with_exit("south", "library");
        let mut rooms = HashMap::new();
        rooms.insert(library.id.clone(), library);
        rooms.insert(garden.id.clone(), garden);
        let mut player = Player::new("Tester", "library");
        player.add_item(Item::from_entry(&entry("سیب", true, true, false)));
        player.add_item(Item::from_entry(&entry("چای", true, false, true)));
        GameState::new(player, rooms)
    }

    #[test]
    fn move_changes_room_and_marks_visited() {
        let mut state = state();
        let outcome = GameEngine::execute(&mut state, &Command::Move("north".into())).unwrap();
        assert_eq!(state.current_room_id(), "garden");
        assert!(matches!(outcome, Outcome::Moved { first_visit: true, ref room, .. } if room.room_id == "garden"));
        assert!(state.rooms["garden"].state.visited);
    }

    #[test]
    fn broken_exit_leaves_state_untouched() {
        let mut state = state();
        let before = state.clone();
        let err = GameEngine::execute(&mut state, &Command::Move("down".into())).unwrap_err();
        assert!(matches!(err, EngineError::BrokenExit { ref to, .. } if to == "cellar"));
        assert_eq!(state, before);
    }

    #[test]
    fn fixed_items_are_refused() {
        let mut state = state();
        let before = state.clone();
        let outcome = GameEngine::execute(&mut state, &Command::Take("میز".into())).unwrap();
        assert!(matches!(outcome, Outcome::Refused { verb: Verb::Take, .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn take_and_drop_move_the_item() {
        let mut state = state();
        GameEngine::execute(&mut state, &Command::Take("کتاب".into())).unwrap();
        assert!(state.player.contains_item("کتاب"));
        assert!(!state.rooms["library"].contains_item("کتاب"));
        GameEngine::execute(&mut state, &Command::Drop("کتاب".into())).unwrap();
        assert!(!state.player.contains_item("کتاب"));
        assert!(state.rooms["library"].contains_item("کتاب"));
    }

    #[test]
    fn taking_teaches_the_word_once() {
        let mut state = state();
        let first = GameEngine::execute(&mut state, &Command::Take("کتاب".into())).unwrap();
        assert!(matches!(first, Outcome::Took { new_word: true, .. }));
        assert!(state.player.knows("کتاب"));
        GameEngine::execute(&mut state, &Command::Drop("کتاب".into())).unwrap();
        let again = GameEngine::execute(&mut state, &Command::Take("کتاب".into())).unwrap();
        assert!(matches!(again, Outcome::Took { new_word: false, .. }));
        assert_eq!(state.player.learned_words.len(), 1);
    }

    #[test]
    fn eating_and_drinking_destroy_items() {
        let mut state = state();
        let total_before = state.all_items().count();
        assert!(GameEngine::execute(&mut state, &Command::Eat("سیب".into())).unwrap().is_ate());
        assert!(GameEngine::execute(&mut state, &Command::Drink("چای".into())).unwrap().is_drank());
        assert_eq!(state.all_items().count(), total_before - 2);
        let refused = GameEngine::execute(&mut state, &Command::Eat("کتاب".into()));
        assert!(matches!(refused, Err(EngineError::LookupInconsistency { .. })));
    }

    #[test]
    fn give_discards_the_item() {
        let mut state = state();
        let outcome = GameEngine::execute(
            &mut state,
            &Command::Give {
                item: "سیب".into(),
                npc: "پیرمرد".into(),
            },
        )
        .unwrap();
        assert!(outcome.is_gave());
        assert!(!state.player.contains_item("سیب"));
        assert!(state.all_items().all(|(_, item)| item.word != "سیب"));
    }

    #[test]
    fn give_to_missing_npc_keeps_the_item() {
        let mut state = state();
        let result = GameEngine::execute(
            &mut state,
            &Command::Give {
                item: "سیب".into(),
                npc: "باغبان".into(),
            },
        );
        assert!(result.is_err());
        assert!(state.player.contains_item("سیب"));
    }

    #[test]
    fn talk_teaches_vocabulary_once() {
        let mut state = state();
        let Outcome::Talked(first) = GameEngine::execute(&mut state, &Command::Talk("پیرمرد".into())).unwrap() else {
            panic!("expected a conversation");
        };
        assert!(first.first_meeting);
        assert_eq!(first.new_words.len(), 2);
        let Outcome::Talked(second) = GameEngine::execute(&mut state, &Command::Talk("پیرمرد".into())).unwrap() else {
            panic!("expected a conversation");
        };
        assert!(!second.first_meeting);
        assert!(second.new_words.is_empty());
        assert!(state.player.knows("کتاب") && state.player.knows("میز"));
    }

    #[test]
    fn open_and_close_track_state() {
        let mut state = state();
        let open = Command::Open("میز".into());
        assert!(GameEngine::execute(&mut state, &open).unwrap().is_opened());
        assert!(GameEngine::execute(&mut state, &open).unwrap().is_already_open());
        let close = Command::Close("میز".into());
        assert!(GameEngine::execute(&mut state, &close).unwrap().is_closed());
        assert!(GameEngine::execute(&mut state, &close).unwrap().is_already_closed());
        assert_eq!(state.rooms["library"].find_item("میز").unwrap().state.is_open, Some(false));
    }

    #[test]
    fn closing_a_never_opened_item_is_already_closed() {
        let mut state = state();
        let outcome = GameEngine::execute(&mut state, &Command::Close("میز".into())).unwrap();
        assert!(outcome.is_already_closed());
        assert_eq!(state.rooms["library"].find_item("میز").unwrap().state.is_open, None);
    }

    #[test]
    fn process_rejections_preserve_state() {
        let engine = GameEngine::default();
        let mut state = state();
        let before = state.clone();
        for input in ["xyzzy foo", "", "take", "move west", "eat کتاب", "talk باغبان"] {
            let response = engine.process(&mut state, input).unwrap();
            assert!(response.is_rejected(), "{input} should be rejected");
            assert!(!response.text.is_empty());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn look_is_idempotent() {
        let engine = GameEngine::default();
        let mut state = state();
        let first = engine.process(&mut state, "look").unwrap();
        let second = engine.process(&mut state, "look").unwrap();
        assert_eq!(first.result, second.result);
    }
}
