//! Shared data model for fa-mud content files.
//!
//! The lexicon (`lexicon.toml`) and the world (`world.ron`) are authored as plain
//! data and deserialized into the definitions in [`defs`]. The engine turns these
//! into its runtime entity model; [`validate`] checks the structural rules that can
//! be verified without the engine.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_lexicon, validate_world};
