//! Loader utilities for building a [`WorldSeed`] and its collaborators from data files.
//!
//! The lexicon is TOML, the world is RON (`WorldDef`), and response phrasings
//! are TOML overrides on top of built-in defaults.

pub mod lexicon;
pub mod phrases;
pub mod world;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::info;
use mud_data::WorldDef;

use crate::config::MudConfig;
use crate::engine::GameEngine;
use crate::lexicon::Lexicon;
use crate::loader::lexicon::load_lexicon;
use crate::loader::phrases::load_phrases;
use crate::loader::world::{build_seed, load_worlddef};
use crate::normalize::TextNormalizer;
use crate::parser::CommandParser;
use crate::response::ResponseGenerator;
use crate::world::WorldSeed;

/// Everything loaded once at startup and shared read-only by all sessions.
#[derive(Debug, Clone)]
pub struct GameData {
    pub lexicon: Arc<Lexicon>,
    pub seed: Arc<WorldSeed>,
    pub responder: ResponseGenerator,
    pub normalizer: Arc<dyn TextNormalizer>,
}

impl GameData {
    /// Build an engine whose parser uses the same normalizer as the loaders.
    pub fn engine(&self) -> GameEngine {
        GameEngine::new(CommandParser::new(Arc::clone(&self.normalizer)), self.responder.clone())
    }
}

/// Load lexicon, world and phrasings as described by `config`.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, world validation, or
/// world entities that name words missing from the lexicon.
pub fn load_game_data(config: &MudConfig) -> Result<GameData> {
    let normalizer = config.normalizer();

    let lexicon = load_lexicon(&config.lexicon_path(), normalizer.as_ref()).context("while loading lexicon")?;
    info!("{} words added to lexicon", lexicon.len());

    let worlddef = load_worlddef(&config.world_path()).context("while loading worlddef from file")?;
    validate_worlddef(&worlddef)?;
    let seed = build_seed(&worlddef, &lexicon, normalizer.as_ref()).context("while building world from worlddef")?;
    info!("{} rooms added to world '{}'", seed.rooms.len(), seed.title);

    let responder = load_phrases(&config.responses_path());

    Ok(GameData {
        lexicon: Arc::new(lexicon),
        seed: Arc::new(seed),
        responder,
        normalizer,
    })
}

/// Validate the WorldDef and return a single aggregated error.
fn validate_worlddef(def: &WorldDef) -> Result<()> {
    let errors = mud_data::validate_world(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("worlddef validation failed:\n{details}");
}
