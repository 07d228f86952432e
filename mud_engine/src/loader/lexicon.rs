//! Lexicon loader.
//!
//! Reads `lexicon.toml`, canonicalizes every word with the configured
//! normalizer, reports structural problems, and keeps only usable entries.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use mud_data::LexiconDef;

use crate::lexicon::Lexicon;
use crate::normalize::{TextNormalizer, canonical};

/// Parse lexicon TOML text into a [`Lexicon`].
///
/// # Errors
/// Returns an error if the text is not valid lexicon TOML or no usable word remains.
pub fn parse_lexicon(text: &str, normalizer: &dyn TextNormalizer) -> Result<Lexicon> {
    let mut def: LexiconDef = toml::from_str(text).context("parsing lexicon TOML")?;
    for word in &mut def.words {
        word.word = canonical(normalizer, &word.word);
    }
    for problem in mud_data::validate_lexicon(&def) {
        warn!("lexicon: {problem}");
    }
    let lexicon = Lexicon::from_def(&def);
    if lexicon.is_empty() {
        bail!("lexicon contains no usable words");
    }
    Ok(lexicon)
}

/// Load the lexicon from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or has no usable words.
pub fn load_lexicon(path: &Path, normalizer: &dyn TextNormalizer) -> Result<Lexicon> {
    let text = fs::read_to_string(path).with_context(|| format!("reading lexicon from '{}'", path.display()))?;
    let lexicon = parse_lexicon(&text, normalizer).with_context(|| format!("loading '{}'", path.display()))?;
    info!("lexicon loaded from '{}'", path.display());
    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconProvider;
    use crate::normalize::{Identity, PersianForms};
    use mud_data::PartOfSpeech;

    const SAMPLE: &str = r#"
[[words]]
word = "کتاب"
translation = "book"
pos = "noun"

[[words]]
word = "میز"
translation = "table"
pos = "noun"
portable = false
usable = true

[[words]]
word = "چا\u064A"
translation = "tea"
pos = "noun"
drinkable = true

[[words]]
word = "hello"
translation = "hello"
pos = "noun"
"#;

    #[test]
    fn parses_flags_and_skips_latin_words() {
        let lexicon = parse_lexicon(SAMPLE, &Identity).unwrap();
        assert_eq!(lexicon.len(), 3);
        let table = lexicon.get_word("میز").unwrap();
        assert!(!table.portable);
        assert!(table.usable);
        assert_eq!(table.pos, PartOfSpeech::Noun);
        assert!(lexicon.get_word("hello").is_none());
    }

    #[test]
    fn words_are_normalized_on_load() {
        let lexicon = parse_lexicon(SAMPLE, &PersianForms).unwrap();
        assert!(lexicon.get_word("چای").is_some_and(|tea| tea.drinkable));
    }

    #[test]
    fn empty_lexicon_is_an_error() {
        assert!(parse_lexicon("words = []", &Identity).is_err());
        assert!(parse_lexicon("this is not toml", &Identity).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_lexicon(Path::new("/nonexistent/lexicon.toml"), &Identity).is_err());
    }
}
