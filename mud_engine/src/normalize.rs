//! Text normalization applied to player input and to entity keys at load time.
//!
//! The parser matches words exactly, so the same normalizer must be used when
//! loading the lexicon and world and when reading commands.

use std::fmt::Debug;

/// Maps text to the canonical spelling used for lookups.
pub trait TextNormalizer: Debug + Send + Sync {
    fn normalize(&self, text: &str) -> String;
}

/// Canonical lookup key for `text`: trimmed, normalized, lowercased.
///
/// Used for player input and for every word and direction read from data files.
pub fn canonical(normalizer: &dyn TextNormalizer, text: &str) -> String {
    normalizer.normalize(text.trim()).to_lowercase()
}

/// Leaves text unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl TextNormalizer for Identity {
    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Unifies the Arabic and Persian forms of common letters.
///
/// Arabic kaf and yeh become their Persian counterparts; short-vowel marks,
/// superscript alef, tatweel and zero-width non-joiners are removed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PersianForms;

impl TextNormalizer for PersianForms {
    fn normalize(&self, text: &str) -> String {
        text.chars()
            .filter_map(|ch| match ch {
                '\u{0643}' => Some('\u{06A9}'),
                '\u{064A}' | '\u{0649}' => Some('\u{06CC}'),
                '\u{064B}'..='\u{0652}' | '\u{0670}' | '\u{0640}' | '\u{200C}' => None,
                other => Some(other),
            })
            .collect()
    }
}
