//! Phrase wheels: interchangeable phrasings for each kind of response.
//!
//! Every [`PhraseKind`] ships with built-in defaults; `responses.toml` can
//! replace any of them (see [`crate::loader::phrases`]). Templates may use the
//! placeholders `{word}`, `{translation}`, `{npc}`, `{npc_en}`, `{target_en}`,
//! `{dir}`, `{room}`, `{line}`, `{verb}`, `{prep}`, `{words}` and `{items}`.

use std::collections::HashMap;

use gametools::spinners::{Spinner, Wedge};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhraseKind {
    AlreadyClosed,
    AlreadyOpen,
    Ate,
    CannotManipulate,
    CannotUseOn,
    Closed,
    DanglingPreposition,
    Drank,
    DrinkRefused,
    Dropped,
    EatRefused,
    EmptyCommand,
    ExamineItem,
    ExamineNpc,
    Gave,
    HelpHeader,
    InventoryEmpty,
    InventoryList,
    LearnedWords,
    MissingRecipient,
    MissingTarget,
    Movement,
    NewPlace,
    NewWord,
    NoExit,
    NoOneByThatName,
    NoSuchItem,
    NoSuchPerson,
    NotCarrying,
    NotDrinkable,
    NotEdible,
    NotVisible,
    NpcSilent,
    Opened,
    QuitMsg,
    TakeRefused,
    Talk,
    Took,
    UnexpectedRecipient,
    UnexpectedToken,
    UnrecognizedCommand,
    UsedAlone,
    UsedOn,
}

impl PhraseKind {
    pub const ALL: [PhraseKind; 43] = [
        PhraseKind::AlreadyClosed,
        PhraseKind::AlreadyOpen,
        PhraseKind::Ate,
        PhraseKind::CannotManipulate,
        PhraseKind::CannotUseOn,
        PhraseKind::Closed,
        PhraseKind::DanglingPreposition,
        PhraseKind::Drank,
        PhraseKind::DrinkRefused,
        PhraseKind::Dropped,
        PhraseKind::EatRefused,
        PhraseKind::EmptyCommand,
        PhraseKind::ExamineItem,
        PhraseKind::ExamineNpc,
        PhraseKind::Gave,
        PhraseKind::HelpHeader,
        PhraseKind::InventoryEmpty,
        PhraseKind::InventoryList,
        PhraseKind::LearnedWords,
        PhraseKind::MissingRecipient,
        PhraseKind::MissingTarget,
        PhraseKind::Movement,
        PhraseKind::NewPlace,
        PhraseKind::NewWord,
        PhraseKind::NoExit,
        PhraseKind::NoOneByThatName,
        PhraseKind::NoSuchItem,
        PhraseKind::NoSuchPerson,
        PhraseKind::NotCarrying,
        PhraseKind::NotDrinkable,
        PhraseKind::NotEdible,
        PhraseKind::NotVisible,
        PhraseKind::NpcSilent,
        PhraseKind::Opened,
        PhraseKind::QuitMsg,
        PhraseKind::TakeRefused,
        PhraseKind::Talk,
        PhraseKind::Took,
        PhraseKind::UnexpectedRecipient,
        PhraseKind::UnexpectedToken,
        PhraseKind::UnrecognizedCommand,
        PhraseKind::UsedAlone,
        PhraseKind::UsedOn,
    ];

    /// Resolve a camelCase key as written in `responses.toml`.
    pub fn from_toml_key(key: &str) -> Option<PhraseKind> {
        Self::ALL.into_iter().find(|kind| kind.toml_key() == key)
    }

    pub fn toml_key(self) -> String {
        let debug = format!("{self:?}");
        let mut chars = debug.chars();
        chars
            .next()
            .map(|first| first.to_ascii_lowercase().to_string() + chars.as_str())
            .unwrap_or_default()
    }

    /// Built-in phrasings used when `responses.toml` does not override this kind.
    pub fn default_values(self) -> &'static [&'static str] {
        match self {
            PhraseKind::AlreadyClosed => &["The **{word}** is already closed."],
            PhraseKind::AlreadyOpen => &["The **{word}** is already open."],
            PhraseKind::Ate => &[
                "You eat the **{word}**.",
                "You finish the **{word}**. Delicious!",
                "The **{word}** is gone in a few bites.",
            ],
            PhraseKind::CannotManipulate => &["You can't do that.", "That isn't something you can open or close."],
            PhraseKind::CannotUseOn => &["You can't use anything on that."],
            PhraseKind::Closed => &["You close the **{word}**."],
            PhraseKind::DanglingPreposition => &["'{prep}' what?", "You stopped after '{prep}'."],
            PhraseKind::Drank => &["You drink the **{word}**.", "You sip the **{word}** until it is gone."],
            PhraseKind::DrinkRefused => &["You can't drink the **{word}**."],
            PhraseKind::Dropped => &["You drop the **{word}**.", "You set down the **{word}**."],
            PhraseKind::EatRefused => &["You can't eat the **{word}**."],
            PhraseKind::EmptyCommand => &["Type a command, or 'help'.", "Say something."],
            PhraseKind::ExamineItem => &["It is a **{word}** ({translation}).", "You look closely at the **{word}** ({translation})."],
            PhraseKind::ExamineNpc => &["That is the **{word}** ({translation}).", "The **{word}** ({translation}) nods at you."],
            PhraseKind::Gave => &["You give the **{word}** to the {npc_en}.", "The {npc_en} accepts the **{word}**."],
            PhraseKind::HelpHeader => &["Available commands:"],
            PhraseKind::InventoryEmpty => &["You are not carrying anything.", "Your hands are empty."],
            PhraseKind::InventoryList => &["You are carrying: {items}"],
            PhraseKind::LearnedWords => &["New words: {words}", "You learned: {words}"],
            PhraseKind::MissingRecipient => &["{verb} it to whom?"],
            PhraseKind::MissingTarget => &["What do you want to {verb}?", "{verb} what?"],
            PhraseKind::Movement => &["You head {dir}.", "You walk {dir}.", "You make your way {dir}."],
            PhraseKind::NewPlace => &["You have not been here before.", "This place is new to you."],
            PhraseKind::NewWord => &["New word: {translation}.", "You have learned the word for {translation}."],
            PhraseKind::NoExit => &["You can't go that way.", "There is no way {dir} from here."],
            PhraseKind::NoOneByThatName => &["There's no one here by that name."],
            PhraseKind::NoSuchItem => &["There is no such item here.", "You don't see that here."],
            PhraseKind::NoSuchPerson => &["There's no such person here."],
            PhraseKind::NotCarrying => &["You don't have that item.", "You aren't carrying that."],
            PhraseKind::NotDrinkable => &["You can't drink that."],
            PhraseKind::NotEdible => &["You can't eat that."],
            PhraseKind::NotVisible => &["You don't see that here."],
            PhraseKind::NpcSilent => &["The **{npc}** has nothing to say.", "The **{npc}** just smiles."],
            PhraseKind::Opened => &["You open the **{word}**."],
            PhraseKind::QuitMsg => &["Goodbye!", "خداحافظ! See you next time."],
            PhraseKind::TakeRefused => &["You can't take the **{word}**.", "The **{word}** won't budge."],
            PhraseKind::Talk => &["The **{npc}** says: \"{line}\""],
            PhraseKind::Took => &["You take the **{word}**.", "You pick up the **{word}**."],
            PhraseKind::UnexpectedRecipient => &["You can't {verb} something on or to something else."],
            PhraseKind::UnexpectedToken => &["I don't understand '{word}' there."],
            PhraseKind::UnrecognizedCommand => &[
                "I don't understand '{word}'.",
                "'{word}' isn't a command. Try 'help'.",
            ],
            PhraseKind::UsedAlone => &["You use the **{word}**, but nothing happens."],
            PhraseKind::UsedOn => &["You use the **{word}** on the {target_en}."],
        }
    }
}

pub trait SpinnerExt {
    fn from_strs(words: &[&str]) -> Self;
}

impl SpinnerExt for Spinner<String> {
    fn from_strs(words: &[&str]) -> Self {
        let wedges = words.iter().map(|w| Wedge::new((*w).to_string())).collect::<Vec<_>>();
        Spinner::new(wedges)
    }
}

/// One wheel per kind, filled with the built-in defaults.
pub fn default_phrase_map() -> HashMap<PhraseKind, Spinner<String>> {
    PhraseKind::ALL
        .into_iter()
        .map(|kind| (kind, Spinner::from_strs(kind.default_values())))
        .collect()
}
