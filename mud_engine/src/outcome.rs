//! Structured results of running a command, before they are rendered to text.

use serde::Serialize;
use variantly::Variantly;

use crate::command::Verb;
use crate::item::Item;
use crate::npc::Npc;
use crate::parser::{ParseError, ValidationError};
use crate::room::Room;
use crate::world::WorldObject;

/// A vocabulary entity mentioned in an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub word: String,
    pub translation: String,
}

impl EntityRef {
    pub fn of(object: &impl WorldObject) -> Self {
        Self {
            word: object.word().to_string(),
            translation: object.translation().to_string(),
        }
    }
}

/// Everything visible from where the player stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub room_id: String,
    pub name: String,
    pub description: String,
    pub items: Vec<EntityRef>,
    pub npcs: Vec<EntityRef>,
    pub exits: Vec<String>,
}

impl RoomView {
    pub fn of(room: &Room) -> Self {
        Self {
            room_id: room.id.clone(),
            name: room.name.clone(),
            description: room.description.clone(),
            items: room.items.iter().map(EntityRef::of).collect(),
            npcs: room.npcs.iter().map(EntityRef::of).collect(),
            exits: room.exit_directions().into_iter().map(str::to_string).collect(),
        }
    }
}

/// What `look <target>` found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Examined {
    Item { entity: EntityRef, is_open: Option<bool>, portable: bool },
    Npc { entity: EntityRef },
}

impl Examined {
    pub fn item(item: &Item) -> Self {
        Examined::Item {
            entity: EntityRef::of(item),
            is_open: item.state.is_open,
            portable: item.is_portable(),
        }
    }

    pub fn npc(npc: &Npc) -> Self {
        Examined::Npc {
            entity: EntityRef::of(npc),
        }
    }

    pub fn entity(&self) -> &EntityRef {
        match self {
            Examined::Item { entity, .. } | Examined::Npc { entity } => entity,
        }
    }
}

/// Result of a `talk` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    pub npc: EntityRef,
    pub dialogue: Vec<String>,
    /// Words added to the learned set by this conversation.
    pub new_words: Vec<String>,
    pub first_meeting: bool,
}

/// Result of successfully executing a [`Command`](crate::command::Command).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Variantly)]
pub enum Outcome {
    AlreadyClosed(EntityRef),
    AlreadyOpen(EntityRef),
    Closed(EntityRef),
    Drank(EntityRef),
    Dropped(EntityRef),
    Ate(EntityRef),
    Examined(Examined),
    Gave { item: EntityRef, npc: EntityRef },
    Help(Vec<Verb>),
    Inventory(Vec<EntityRef>),
    Looked(RoomView),
    Moved { direction: String, first_visit: bool, room: RoomView },
    Opened(EntityRef),
    /// The verb was understood but the entity does not allow it (e.g. taking fixed furniture).
    Refused { verb: Verb, entity: EntityRef },
    Talked(Conversation),
    /// `new_word` is set when taking the item added its word to the learned set.
    Took { item: EntityRef, new_word: bool },
    Used { item: EntityRef, on: Option<EntityRef> },
}

/// Why a command was turned away before reaching the engine.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Rejection {
    Parse(ParseError),
    Invalid(ValidationError),
}

/// Rendered reply to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub result: Result<Outcome, Rejection>,
}

impl Response {
    pub fn is_rejected(&self) -> bool {
        self.result.is_err()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.result.as_ref().ok()
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.result.as_ref().err()
    }
}
