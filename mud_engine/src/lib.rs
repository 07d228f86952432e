#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const MUD_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod config;
pub mod data_paths;
pub mod engine;
pub mod item;
pub mod lexicon;
pub mod loader;
pub mod markup;
pub mod normalize;
pub mod npc;
pub mod outcome;
pub mod parser;
pub mod player;
pub mod repl;
pub mod response;
pub mod room;
pub mod save_files;
pub mod session;
pub mod slug;
pub mod spinners;
pub mod style;
pub mod world;

// Re-exports for convenience
pub use command::{Command, ParsedCommand, Verb};
pub use config::MudConfig;
pub use engine::{EngineError, GameEngine};
pub use item::{Item, ItemHolder};
pub use lexicon::{Lexicon, LexiconEntry, LexiconProvider};
pub use loader::{GameData, load_game_data};
pub use npc::Npc;
pub use outcome::{Outcome, Rejection, Response};
pub use parser::CommandParser;
pub use player::Player;
pub use repl::run_repl;
pub use room::Room;
pub use session::{SessionRegistry, SessionReply};
pub use world::{GameState, WorldObject, WorldSeed};
