#![allow(dead_code)]

use std::path::PathBuf;

use mud_engine::{GameData, GameEngine, GameState, MudConfig, load_game_data};

/// The bundled data directory shipped with the crate.
pub fn config() -> MudConfig {
    MudConfig {
        data_dir: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")),
        ..MudConfig::default()
    }
}

pub fn game_data() -> GameData {
    load_game_data(&config()).expect("bundled game data loads")
}

/// A fresh game in the library plus an engine wired like the binary's.
pub fn new_game() -> (GameEngine, GameState) {
    let data = game_data();
    (data.engine(), data.seed.new_game())
}
