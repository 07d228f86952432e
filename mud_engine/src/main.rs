#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** fa-mud **
//! Persian vocabulary text adventure

use mud_engine::style::GameStyle;
use mud_engine::{MudConfig, SessionRegistry, load_game_data, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;

use log::info;

use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    let config = MudConfig::load_default();
    info!("Start: loading game data from '{}'...", config.data_dir().display());
    let data = load_game_data(&config).context("while loading game data")?;
    info!("Game data loaded successfully.");

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("flushing stdout")?;
    info!("Starting the game!");

    println!("{:^84}", data.seed.title.to_uppercase().bright_yellow().underline());
    println!("\nYou are {}.\n", data.seed.player_name.bold().bright_blue());
    if !data.seed.intro.is_empty() {
        println!("{}\n", data.seed.intro.system_style());
    }
    println!("{}", "Type help for commands, :help for system commands.".system_style());

    let registry = SessionRegistry::from_data(&data);
    run_repl(&registry, &config)
}
