//! Command module
//!
//! Describes the closed verb set and the two shapes a command takes on its way
//! to the engine: the syntactic [`ParsedCommand`] and the validated [`Command`].
use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of verbs the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Look,
    Move,
    Take,
    Drop,
    Talk,
    Use,
    Give,
    Open,
    Close,
    Eat,
    Drink,
    Inventory,
    Help,
}

impl Verb {
    pub const ALL: [Verb; 13] = [
        Verb::Look,
        Verb::Move,
        Verb::Take,
        Verb::Drop,
        Verb::Talk,
        Verb::Use,
        Verb::Give,
        Verb::Open,
        Verb::Close,
        Verb::Eat,
        Verb::Drink,
        Verb::Inventory,
        Verb::Help,
    ];

    /// Match an already-lowercased word against the verb set.
    pub fn from_word(word: &str) -> Option<Verb> {
        Self::ALL.into_iter().find(|verb| verb.as_str() == word)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Look => "look",
            Verb::Move => "move",
            Verb::Take => "take",
            Verb::Drop => "drop",
            Verb::Talk => "talk",
            Verb::Use => "use",
            Verb::Give => "give",
            Verb::Open => "open",
            Verb::Close => "close",
            Verb::Eat => "eat",
            Verb::Drink => "drink",
            Verb::Inventory => "inventory",
            Verb::Help => "help",
        }
    }

    /// Verbs that take no target and ignore anything typed after them.
    pub fn is_zero_arg(self) -> bool {
        matches!(self, Verb::Inventory | Verb::Help)
    }

    /// Verbs whose target may be omitted.
    pub fn target_optional(self) -> bool {
        matches!(self, Verb::Look)
    }

    /// The preposition that introduces this verb's recipient, if it takes one.
    pub fn preposition(self) -> Option<Preposition> {
        match self {
            Verb::Use => Some(Preposition::On),
            Verb::Give => Some(Preposition::To),
            _ => None,
        }
    }

    /// One-line usage shown by `help`.
    pub fn usage(self) -> &'static str {
        match self {
            Verb::Look => "look [thing]",
            Verb::Move => "move <direction>",
            Verb::Take => "take <item>",
            Verb::Drop => "drop <item>",
            Verb::Talk => "talk <person>",
            Verb::Use => "use <item> [on <item>]",
            Verb::Give => "give <item> to <person>",
            Verb::Open => "open <thing>",
            Verb::Close => "close <thing>",
            Verb::Eat => "eat <item>",
            Verb::Drink => "drink <item>",
            Verb::Inventory => "inventory",
            Verb::Help => "help",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prepositions that introduce a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preposition {
    On,
    To,
}

impl Preposition {
    pub fn from_word(word: &str) -> Option<Preposition> {
        match word {
            "on" => Some(Preposition::On),
            "to" => Some(Preposition::To),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Preposition::On => "on",
            Preposition::To => "to",
        }
    }
}

impl fmt::Display for Preposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The second object of `use ... on` / `give ... to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub preposition: Preposition,
    pub word: String,
}

/// Syntactically well-formed input, not yet checked against the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub verb: Verb,
    pub target: Option<String>,
    pub recipient: Option<Recipient>,
}

impl ParsedCommand {
    pub fn bare(verb: Verb) -> Self {
        Self {
            verb,
            target: None,
            recipient: None,
        }
    }

    pub fn with_target(verb: Verb, target: impl Into<String>) -> Self {
        Self {
            verb,
            target: Some(target.into()),
            recipient: None,
        }
    }
}

/// Commands that have passed validation against the current room and player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Close(String),
    Drink(String),
    Drop(String),
    Eat(String),
    Give { item: String, npc: String },
    Help,
    Inventory,
    Look,
    LookAt(String),
    Move(String),
    Open(String),
    Take(String),
    Talk(String),
    Use { item: String, on: Option<String> },
}

impl Command {
    pub fn verb(&self) -> Verb {
        match self {
            Command::Close(_) => Verb::Close,
            Command::Drink(_) => Verb::Drink,
            Command::Drop(_) => Verb::Drop,
            Command::Eat(_) => Verb::Eat,
            Command::Give { .. } => Verb::Give,
            Command::Help => Verb::Help,
            Command::Inventory => Verb::Inventory,
            Command::Look | Command::LookAt(_) => Verb::Look,
            Command::Move(_) => Verb::Move,
            Command::Open(_) => Verb::Open,
            Command::Take(_) => Verb::Take,
            Command::Talk(_) => Verb::Talk,
            Command::Use { .. } => Verb::Use,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_verb_round_trips_through_its_word() {
        for verb in Verb::ALL {
            assert_eq!(Verb::from_word(verb.as_str()), Some(verb));
            assert!(verb.usage().starts_with(verb.as_str()));
        }
        assert_eq!(Verb::from_word("xyzzy"), None);
        assert_eq!(Verb::from_word("LOOK"), None);
    }

    #[test]
    fn only_inventory_and_help_are_zero_arg() {
        let zero: Vec<Verb> = Verb::ALL.into_iter().filter(|v| v.is_zero_arg()).collect();
        assert_eq!(zero, vec![Verb::Inventory, Verb::Help]);
    }

    #[test]
    fn command_reports_its_verb() {
        assert_eq!(Command::Look.verb(), Verb::Look);
        assert_eq!(Command::LookAt("میز".into()).verb(), Verb::Look);
        assert_eq!(
            Command::Give {
                item: "نان".into(),
                npc: "خدمتکار".into()
            }
            .verb(),
            Verb::Give
        );
        assert!(matches!(Command::Move("north".into()), Command::Move(dir) if dir == "north"));
    }
}
