//! Turns outcomes and rejections into player-facing text.
//!
//! Vocabulary words are wrapped in `**word**` markers so a front end can
//! highlight them (see [`crate::markup`]). Picking a phrasing is random, but
//! rendering never touches game state.

use std::collections::HashMap;
use std::fmt::Write;

use gametools::Spinner;
use rand::seq::IndexedRandom;

use crate::command::Verb;
use crate::markup::strip_markers;
use crate::outcome::{Conversation, EntityRef, Examined, Outcome, Rejection, RoomView};
use crate::parser::{ParseError, ValidationError};
use crate::spinners::{PhraseKind, default_phrase_map};

/// Renders responses from a set of phrase wheels.
#[derive(Debug, Clone)]
pub struct ResponseGenerator {
    phrases: HashMap<PhraseKind, Spinner<String>>,
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new(default_phrase_map())
    }
}

/// Wrap a vocabulary word in highlight markers.
pub fn marked(word: &str) -> String {
    format!("**{word}**")
}

/// Replace `{name}` placeholders in `template`.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in values {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

fn marked_list(entities: &[EntityRef]) -> String {
    entities.iter().map(|e| marked(&e.word)).collect::<Vec<_>>().join(", ")
}

impl ResponseGenerator {
    pub fn new(phrases: HashMap<PhraseKind, Spinner<String>>) -> Self {
        Self { phrases }
    }

    /// A random phrasing for `kind`, falling back to its first built-in default.
    pub fn phrase(&self, kind: PhraseKind) -> String {
        self.phrases
            .get(&kind)
            .and_then(Spinner::spin)
            .unwrap_or_else(|| kind.default_values().first().copied().unwrap_or_default().to_string())
    }

    fn say(&self, kind: PhraseKind, values: &[(&str, &str)]) -> String {
        fill(&self.phrase(kind), values)
    }

    fn say_entity(&self, kind: PhraseKind, entity: &EntityRef) -> String {
        self.say(kind, &[("word", &entity.word), ("translation", &entity.translation)])
    }

    /// Describe a room: name, description, visible items and people, exits.
    pub fn render_room(view: &RoomView) -> String {
        let mut out = format!("{}\n{}", view.name, view.description);
        if !view.items.is_empty() {
            let _ = write!(out, "\nYou see: {}.", marked_list(&view.items));
        }
        if !view.npcs.is_empty() {
            let _ = write!(out, "\nPeople here: {}.", marked_list(&view.npcs));
        }
        if view.exits.is_empty() {
            out.push_str("\nThere are no exits.");
        } else {
            let _ = write!(out, "\nExits: {}.", view.exits.join(", "));
        }
        out
    }

    /// Render a successful outcome.
    pub fn render(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Looked(view) => Self::render_room(view),
            Outcome::Moved {
                direction,
                first_visit,
                room,
            } => {
                let mut out = self.say(PhraseKind::Movement, &[("dir", direction), ("room", &room.name)]);
                if *first_visit {
                    out.push(' ');
                    out.push_str(&self.phrase(PhraseKind::NewPlace));
                }
                out.push('\n');
                out.push_str(&Self::render_room(room));
                out
            },
            Outcome::Examined(examined) => self.render_examined(examined),
            Outcome::Took { item, new_word } => {
                let mut out = self.say_entity(PhraseKind::Took, item);
                if *new_word {
                    out.push(' ');
                    out.push_str(&self.say_entity(PhraseKind::NewWord, item));
                }
                out
            },
            Outcome::Dropped(entity) => self.say_entity(PhraseKind::Dropped, entity),
            Outcome::Ate(entity) => self.say_entity(PhraseKind::Ate, entity),
            Outcome::Drank(entity) => self.say_entity(PhraseKind::Drank, entity),
            Outcome::Refused { verb, entity } => {
                let kind = match verb {
                    Verb::Take => PhraseKind::TakeRefused,
                    Verb::Eat => PhraseKind::EatRefused,
                    Verb::Drink => PhraseKind::DrinkRefused,
                    _ => PhraseKind::CannotManipulate,
                };
                self.say_entity(kind, entity)
            },
            Outcome::Used { item, on: Some(target) } => {
                self.say(PhraseKind::UsedOn, &[("word", &item.word), ("target_en", &target.translation)])
            },
            Outcome::Used { item, on: None } => self.say_entity(PhraseKind::UsedAlone, item),
            Outcome::Gave { item, npc } => {
                self.say(PhraseKind::Gave, &[("word", &item.word), ("npc_en", &npc.translation)])
            },
            Outcome::Talked(conversation) => self.render_conversation(conversation),
            Outcome::Opened(entity) => self.say_entity(PhraseKind::Opened, entity),
            Outcome::Closed(entity) => self.say_entity(PhraseKind::Closed, entity),
            Outcome::AlreadyOpen(entity) => self.say_entity(PhraseKind::AlreadyOpen, entity),
            Outcome::AlreadyClosed(entity) => self.say_entity(PhraseKind::AlreadyClosed, entity),
            Outcome::Inventory(items) if items.is_empty() => self.phrase(PhraseKind::InventoryEmpty),
            Outcome::Inventory(items) => {
                let listed = items
                    .iter()
                    .map(|e| format!("{} ({})", marked(&e.word), e.translation))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.say(PhraseKind::InventoryList, &[("items", &listed)])
            },
            Outcome::Help(verbs) => {
                let mut out = self.phrase(PhraseKind::HelpHeader);
                for verb in verbs {
                    let _ = write!(out, "\n  {}", verb.usage());
                }
                out
            },
        }
    }

    fn render_examined(&self, examined: &Examined) -> String {
        match examined {
            Examined::Item {
                entity,
                is_open,
                portable,
            } => {
                let mut out = self.say_entity(PhraseKind::ExamineItem, entity);
                match is_open {
                    Some(true) => out.push_str(" It is open."),
                    Some(false) => out.push_str(" It is closed."),
                    None => {},
                }
                if !portable {
                    out.push_str(" It is fixed in place.");
                }
                out
            },
            Examined::Npc { entity } => self.say_entity(PhraseKind::ExamineNpc, entity),
        }
    }

    fn render_conversation(&self, conversation: &Conversation) -> String {
        let npc = conversation.npc.word.as_str();
        let mut out = match pick_line(&conversation.dialogue) {
            Some(line) => self.say(PhraseKind::Talk, &[("npc", npc), ("line", &strip_markers(line))]),
            None => self.say(PhraseKind::NpcSilent, &[("npc", npc)]),
        };
        if !conversation.new_words.is_empty() {
            let words = conversation
                .new_words
                .iter()
                .map(|w| marked(w))
                .collect::<Vec<_>>()
                .join(", ");
            out.push('\n');
            out.push_str(&self.say(PhraseKind::LearnedWords, &[("words", &words)]));
        }
        out
    }

    /// Render the reason a command was turned away.
    pub fn render_rejection(&self, rejection: &Rejection) -> String {
        match rejection {
            Rejection::Parse(err) => match err {
                ParseError::Empty => self.phrase(PhraseKind::EmptyCommand),
                ParseError::UnknownVerb(word) => self.say(PhraseKind::UnrecognizedCommand, &[("word", word)]),
                ParseError::MissingTarget(verb) => self.say(PhraseKind::MissingTarget, &[("verb", verb.as_str())]),
                ParseError::MissingRecipient(prep) => {
                    self.say(PhraseKind::DanglingPreposition, &[("prep", prep.as_str())])
                },
                ParseError::UnexpectedToken(word) => self.say(PhraseKind::UnexpectedToken, &[("word", word)]),
            },
            Rejection::Invalid(err) => self.render_invalid(err),
        }
    }

    fn render_invalid(&self, err: &ValidationError) -> String {
        // `subject` is a word for entity errors and a verb for grammar errors
        let (kind, subject) = match err {
            ValidationError::NotVisible(word) => (PhraseKind::NotVisible, word.as_str()),
            ValidationError::NoExit(dir) => {
                return self.say(PhraseKind::NoExit, &[("dir", dir)]);
            },
            ValidationError::NoSuchItem(word) => (PhraseKind::NoSuchItem, word.as_str()),
            ValidationError::NotCarrying(word) => (PhraseKind::NotCarrying, word.as_str()),
            ValidationError::CannotUseOn(word) => (PhraseKind::CannotUseOn, word.as_str()),
            ValidationError::NoSuchPerson(word) => (PhraseKind::NoSuchPerson, word.as_str()),
            ValidationError::CannotManipulate(word) => (PhraseKind::CannotManipulate, word.as_str()),
            ValidationError::NotEdible(word) => (PhraseKind::NotEdible, word.as_str()),
            ValidationError::NotDrinkable(word) => (PhraseKind::NotDrinkable, word.as_str()),
            ValidationError::NoOneByThatName(word) => (PhraseKind::NoOneByThatName, word.as_str()),
            ValidationError::MissingTarget(verb) => (PhraseKind::MissingTarget, verb.as_str()),
            ValidationError::MissingRecipient(verb) => (PhraseKind::MissingRecipient, verb.as_str()),
            ValidationError::UnexpectedRecipient(verb) => (PhraseKind::UnexpectedRecipient, verb.as_str()),
        };
        self.say(kind, &[("word", subject), ("verb", subject)])
    }
}

fn pick_line(dialogue: &[String]) -> Option<&str> {
    dialogue.choose(&mut rand::rng()).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::marked_words;
    use crate::spinners::SpinnerExt;

    fn entity(word: &str) -> EntityRef {
        EntityRef {
            word: word.into(),
            translation: "thing".into(),
        }
    }

    fn fixed(kind: PhraseKind, template: &str) -> ResponseGenerator {
        let mut phrases = default_phrase_map();
        phrases.insert(kind, Spinner::from_strs(&[template]));
        ResponseGenerator::new(phrases)
    }

    #[test]
    fn single_entity_outcomes_mark_the_word_once() {
        let responder = ResponseGenerator::default();
        for outcome in [
            Outcome::Took {
                item: entity("کتاب"),
                new_word: true,
            },
            Outcome::Dropped(entity("کتاب")),
            Outcome::Ate(entity("کتاب")),
            Outcome::Opened(entity("کتاب")),
            Outcome::Refused {
                verb: Verb::Take,
                entity: entity("کتاب"),
            },
            Outcome::Gave {
                item: entity("کتاب"),
                npc: entity("پیرمرد"),
            },
            Outcome::Used {
                item: entity("کتاب"),
                on: Some(entity("جعبه")),
            },
        ] {
            let text = responder.render(&outcome);
            assert_eq!(marked_words(&text), vec!["کتاب"], "{text}");
        }
    }

    #[test]
    fn dialogue_markers_do_not_add_identity_words() {
        let responder = ResponseGenerator::default();
        let conversation = Conversation {
            npc: entity("پیرمرد"),
            dialogue: vec!["This is a **کتاب** on the **میز**.".into()],
            new_words: Vec::new(),
            first_meeting: false,
        };
        let text = responder.render(&Outcome::Talked(conversation));
        assert_eq!(marked_words(&text), vec!["پیرمرد"], "{text}");
        assert!(text.contains("This is a کتاب on the میز."));
    }

    #[test]
    fn recipients_are_named_in_english() {
        let responder = fixed(PhraseKind::Gave, "You give the **{word}** to the {npc_en}.");
        let text = responder.render(&Outcome::Gave {
            item: entity("سیب"),
            npc: EntityRef {
                word: "باغبان".into(),
                translation: "gardener".into(),
            },
        });
        assert_eq!(text, "You give the **سیب** to the gardener.");
    }

    #[test]
    fn taking_a_new_word_mentions_its_translation() {
        let responder = ResponseGenerator::default();
        let fresh = responder.render(&Outcome::Took {
            item: entity("سیب"),
            new_word: true,
        });
        assert!(fresh.contains("thing"), "{fresh}");
        let known = fixed(PhraseKind::Took, "Got {word}!").render(&Outcome::Took {
            item: entity("سیب"),
            new_word: false,
        });
        assert_eq!(known, "Got سیب!");
    }

    #[test]
    fn overrides_replace_defaults() {
        let responder = fixed(PhraseKind::Took, "Got {word}!");
        let text = responder.render(&Outcome::Took {
            item: entity("سیب"),
            new_word: false,
        });
        assert_eq!(text, "Got سیب!");
    }

    #[test]
    fn room_listing_includes_everything_visible() {
        let view = RoomView {
            room_id: "library".into(),
            name: "Library".into(),
            description: "A quiet library.".into(),
            items: vec![entity("کتاب"), entity("میز")],
            npcs: vec![entity("پیرمرد")],
            exits: vec!["east".into(), "north".into()],
        };
        let text = ResponseGenerator::render_room(&view);
        assert!(text.starts_with("Library\nA quiet library."));
        assert!(text.contains("You see: **کتاب**, **میز**."));
        assert!(text.contains("People here: **پیرمرد**."));
        assert!(text.ends_with("Exits: east, north."));
    }

    #[test]
    fn conversation_lists_new_words() {
        let responder = fixed(PhraseKind::LearnedWords, "New: {words}");
        let text = responder.render(&Outcome::Talked(Conversation {
            npc: entity("باغبان"),
            dialogue: vec!["Hello.".into()],
            new_words: vec!["سیب".into()],
            first_meeting: true,
        }));
        assert!(text.contains("**باغبان**"));
        assert!(text.contains("Hello."));
        assert!(text.ends_with("New: **سیب**"));
    }

    #[test]
    fn rejections_render_their_class() {
        let responder = fixed(PhraseKind::UnrecognizedCommand, "No '{word}'.");
        let text = responder.render_rejection(&Rejection::Parse(ParseError::UnknownVerb("xyzzy".into())));
        assert_eq!(text, "No 'xyzzy'.");
        let responder = fixed(PhraseKind::MissingTarget, "{verb} what?");
        let text = responder.render_rejection(&Rejection::Invalid(ValidationError::MissingTarget(Verb::Take)));
        assert_eq!(text, "take what?");
    }

    #[test]
    fn empty_inventory_has_its_own_phrase() {
        let responder = fixed(PhraseKind::InventoryEmpty, "Nothing.");
        assert_eq!(responder.render(&Outcome::Inventory(Vec::new())), "Nothing.");
    }
}
