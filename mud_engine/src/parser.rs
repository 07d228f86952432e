//! Turns raw player input into commands.
//!
//! Parsing is purely syntactic: the input is normalized, split into tokens and
//! matched against a two-state grammar (zero-argument verbs, or
//! `<verb> [<target>] [(on|to) <recipient>]`). Validation then checks the parsed
//! command against the current room and player without mutating either.

use std::fmt;
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::command::{Command, ParsedCommand, Preposition, Recipient, Verb};
use crate::item::ItemHolder;
use crate::normalize::{Identity, TextNormalizer, canonical};
use crate::player::Player;
use crate::room::Room;

/// A single unit of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Prep(Preposition),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => f.write_str(word),
            Token::Prep(prep) => write!(f, "{prep}"),
        }
    }
}

/// Split input on whitespace, recognising `on` and `to` as prepositions.
pub fn tokenize(input: &str) -> Vec<Token> {
    input
        .split_whitespace()
        .map(|word| Preposition::from_word(word).map_or_else(|| Token::Word(word.to_string()), Token::Prep))
        .collect()
}

/// Input that does not have the shape of a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unrecognized command '{0}'")]
    UnknownVerb(String),
    #[error("'{0}' needs something to act on")]
    MissingTarget(Verb),
    #[error("nothing follows '{0}'")]
    MissingRecipient(Preposition),
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),
}

/// A well-formed command that does not make sense where the player is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not visible here")]
    NotVisible(String),
    #[error("no exit '{0}' from this room")]
    NoExit(String),
    #[error("no item '{0}' in this room")]
    NoSuchItem(String),
    #[error("'{0}' is not in the inventory")]
    NotCarrying(String),
    #[error("'{0}' cannot be used on")]
    CannotUseOn(String),
    #[error("no person '{0}' in this room")]
    NoSuchPerson(String),
    #[error("'{0}' cannot be opened or closed")]
    CannotManipulate(String),
    #[error("'{0}' is not edible")]
    NotEdible(String),
    #[error("'{0}' is not drinkable")]
    NotDrinkable(String),
    #[error("no one named '{0}' here")]
    NoOneByThatName(String),
    #[error("'{0}' needs something to act on")]
    MissingTarget(Verb),
    #[error("'{0}' needs a recipient")]
    MissingRecipient(Verb),
    #[error("'{0}' does not take a recipient")]
    UnexpectedRecipient(Verb),
}

/// Parser with an injected text normalizer.
#[derive(Debug, Clone)]
pub struct CommandParser {
    normalizer: Arc<dyn TextNormalizer>,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(Arc::new(Identity))
    }
}

impl CommandParser {
    pub fn new(normalizer: Arc<dyn TextNormalizer>) -> Self {
        Self { normalizer }
    }

    /// Parse raw input into a [`ParsedCommand`].
    ///
    /// # Errors
    /// Returns a [`ParseError`] for empty input, an unknown verb, a missing
    /// target, a preposition with nothing after it, the wrong preposition for
    /// the verb, or extra tokens.
    pub fn parse(&self, raw: &str) -> Result<ParsedCommand, ParseError> {
        let normalized = canonical(self.normalizer.as_ref(), raw);
        let tokens = tokenize(&normalized);
        let Some((first, rest)) = tokens.split_first() else {
            return Err(ParseError::Empty);
        };
        let verb = match first {
            Token::Word(word) => Verb::from_word(word).ok_or_else(|| ParseError::UnknownVerb(word.clone()))?,
            Token::Prep(prep) => return Err(ParseError::UnknownVerb(prep.to_string())),
        };

        if verb.is_zero_arg() {
            if !rest.is_empty() {
                debug!("ignoring {} token(s) after '{verb}'", rest.len());
            }
            return Ok(ParsedCommand::bare(verb));
        }

        match rest {
            [] if verb.target_optional() => Ok(ParsedCommand::bare(verb)),
            [] | [Token::Prep(_), ..] => Err(ParseError::MissingTarget(verb)),
            [Token::Word(target)] => Ok(ParsedCommand::with_target(verb, target.as_str())),
            [Token::Word(_), Token::Prep(prep), ..] if verb.preposition().is_some_and(|p| p != *prep) => {
                Err(ParseError::UnexpectedToken(prep.to_string()))
            },
            [Token::Word(_), Token::Prep(prep)] => Err(ParseError::MissingRecipient(*prep)),
            [Token::Word(target), Token::Prep(prep), Token::Word(recipient)] => Ok(ParsedCommand {
                verb,
                target: Some(target.clone()),
                recipient: Some(Recipient {
                    preposition: *prep,
                    word: recipient.clone(),
                }),
            }),
            [Token::Word(_), extra @ Token::Word(_), ..]
            | [Token::Word(_), Token::Prep(_), extra @ Token::Prep(_), ..]
            | [_, _, _, extra, ..] => Err(ParseError::UnexpectedToken(extra.to_string())),
        }
    }

    /// Check a parsed command against the player's room and inventory.
    ///
    /// Never mutates anything; on success returns the typed [`Command`] the
    /// engine will run.
    ///
    /// # Errors
    /// Returns the [`ValidationError`] describing the first failed precondition.
    pub fn validate(parsed: &ParsedCommand, room: &Room, player: &Player) -> Result<Command, ValidationError> {
        let verb = parsed.verb;
        if parsed.recipient.is_some() && verb.preposition().is_none() {
            return Err(ValidationError::UnexpectedRecipient(verb));
        }
        if verb.is_zero_arg() {
            return Ok(match verb {
                Verb::Inventory => Command::Inventory,
                _ => Command::Help,
            });
        }

        let Some(target) = parsed.target.clone() else {
            return if verb.target_optional() {
                Ok(Command::Look)
            } else {
                Err(ValidationError::MissingTarget(verb))
            };
        };

        match verb {
            Verb::Look => {
                if room.is_visible(&target) {
                    Ok(Command::LookAt(target))
                } else {
                    Err(ValidationError::NotVisible(target))
                }
            },
            Verb::Move => {
                if room.exits.contains_key(&target) {
                    Ok(Command::Move(target))
                } else {
                    Err(ValidationError::NoExit(target))
                }
            },
            Verb::Take => {
                if room.contains_item(&target) {
                    Ok(Command::Take(target))
                } else {
                    Err(ValidationError::NoSuchItem(target))
                }
            },
            Verb::Drop => {
                if player.contains_item(&target) {
                    Ok(Command::Drop(target))
                } else {
                    Err(ValidationError::NotCarrying(target))
                }
            },
            Verb::Use => {
                if !player.contains_item(&target) {
                    return Err(ValidationError::NotCarrying(target));
                }
                let on = match &parsed.recipient {
                    Some(recipient) => {
                        if !room.find_item(&recipient.word).is_some_and(|item| item.is_usable()) {
                            return Err(ValidationError::CannotUseOn(recipient.word.clone()));
                        }
                        Some(recipient.word.clone())
                    },
                    None => None,
                };
                Ok(Command::Use { item: target, on })
            },
            Verb::Give => {
                if !player.contains_item(&target) {
                    return Err(ValidationError::NotCarrying(target));
                }
                let Some(recipient) = &parsed.recipient else {
                    return Err(ValidationError::MissingRecipient(verb));
                };
                if room.find_npc(&recipient.word).is_none() {
                    return Err(ValidationError::NoSuchPerson(recipient.word.clone()));
                }
                Ok(Command::Give {
                    item: target,
                    npc: recipient.word.clone(),
                })
            },
            Verb::Open | Verb::Close => {
                if !room.find_item(&target).is_some_and(|item| !item.is_portable()) {
                    return Err(ValidationError::CannotManipulate(target));
                }
                Ok(if verb == Verb::Open {
                    Command::Open(target)
                } else {
                    Command::Close(target)
                })
            },
            Verb::Eat => match player.find_item(&target) {
                None => Err(ValidationError::NotCarrying(target)),
                Some(item) if !item.is_edible() => Err(ValidationError::NotEdible(target)),
                Some(_) => Ok(Command::Eat(target)),
            },
            Verb::Drink => match player.find_item(&target) {
                None => Err(ValidationError::NotCarrying(target)),
                Some(item) if !item.is_drinkable() => Err(ValidationError::NotDrinkable(target)),
                Some(_) => Ok(Command::Drink(target)),
            },
            Verb::Talk => {
                if room.find_npc(&target).is_some() {
                    Ok(Command::Talk(target))
                } else {
                    Err(ValidationError::NoOneByThatName(target))
                }
            },
            Verb::Inventory => Ok(Command::Inventory),
            Verb::Help => Ok(Command::Help),
        }
    }
}
