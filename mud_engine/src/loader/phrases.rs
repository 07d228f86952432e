//! `loader::phrases` module
//!
//! Loads response phrasings from TOML. Every [`PhraseKind`] starts with its
//! built-in defaults; entries in `responses.toml` replace the wheel for their kind.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use gametools::{Spinner, Wedge};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::response::ResponseGenerator;
use crate::spinners::{PhraseKind, default_phrase_map};

/// Raw phrase data loaded from TOML files
#[derive(Debug, Deserialize, Serialize)]
pub struct RawPhraseData {
    #[serde(rename = "kind")]
    pub kind_key: String,
    pub values: Vec<String>,
    #[serde(default)]
    pub widths: Vec<usize>,
}

/// Container for multiple phrase definitions in a TOML file
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PhraseFile {
    #[serde(rename = "phrases", default)]
    pub entries: Vec<RawPhraseData>,
}

impl PhraseFile {
    /// Built-in defaults with this file's overrides applied.
    pub fn to_phrase_map(&self) -> HashMap<PhraseKind, Spinner<String>> {
        let mut phrases = default_phrase_map();

        for data in &self.entries {
            let Some(kind) = PhraseKind::from_toml_key(&data.kind_key) else {
                warn!("Unknown phrase kind '{}', skipping", data.kind_key);
                continue;
            };
            let wedges = Self::create_wedges_from_data(data);
            if wedges.is_empty() {
                warn!("Phrase kind '{}' has no values, keeping defaults", data.kind_key);
                continue;
            }
            info!("Overriding phrase kind '{}' with {} values", data.kind_key, wedges.len());
            phrases.insert(kind, Spinner::new(wedges));
        }

        phrases
    }

    /// Create wedges from raw TOML data; missing widths default to 1.
    fn create_wedges_from_data(data: &RawPhraseData) -> Vec<Wedge<String>> {
        data.values
            .iter()
            .enumerate()
            .map(|(i, val)| {
                let width = data.widths.get(i).copied().unwrap_or(1);
                Wedge::new_weighted(val.clone(), width)
            })
            .collect()
    }
}

fn try_load_phrases(toml_path: &Path) -> Result<PhraseFile> {
    let text = std::fs::read_to_string(toml_path)
        .with_context(|| format!("reading phrase data from '{}'", toml_path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing phrase data from '{}'", toml_path.display()))
}

/// Load phrasings from a TOML file, falling back to the built-in defaults if
/// the file is missing or invalid.
pub fn load_phrases(toml_path: &Path) -> ResponseGenerator {
    match try_load_phrases(toml_path) {
        Ok(file) => {
            info!("Phrase data loaded from '{}'", toml_path.display());
            ResponseGenerator::new(file.to_phrase_map())
        },
        Err(e) => {
            warn!("Could not load phrase data: {e:#}. Using built-in defaults.");
            ResponseGenerator::default()
        },
    }
}
