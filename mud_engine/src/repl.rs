//! REPL for playing one session in a terminal.
//!
//! Game input goes through the [`SessionRegistry`] exactly as any other
//! transport would; lines starting with `:` are handled by [`system`].

mod input;
pub mod system;

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::MudConfig;
use crate::markup::{render_wrapped, strip_markers};
use crate::session::{SessionError, SessionId, SessionReply, SessionRegistry};
use crate::style::GameStyle;

use input::{InputEvent, InputManager, completion_words};
use system::{
    SystemCommand, learned_handler, list_saves_handler, load_handler, parse_system_command, quit_handler,
    save_handler, system_help_handler, words_handler,
};

/// Control flow signal used by handlers to exit the REPL.
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read–eval–print loop until the user quits.
///
/// # Errors
/// Propagates engine faults and poisoned session locks. Save and load
/// failures are reported to the player and the loop continues.
pub fn run_repl(registry: &SessionRegistry, config: &MudConfig) -> Result<()> {
    let width = config.wrap_width.unwrap_or_else(textwrap::termwidth);
    let save_dir = config.save_dir.as_path();

    let opening = registry.create_session().context("while starting a game session")?;
    let id = opening.session_id;
    print_reply(&opening, width);

    let mut input_manager = InputManager::new(save_dir.to_path_buf(), completion_words(registry.seed()));
    loop {
        let learned = registry.with_state(id, |state| state.player.learned_words.len())?;
        let prompt = format!("\n[Words: {learned}]>> ").prompt_style().to_string();

        let Ok(event) = input_manager.read_line(&prompt) else {
            println!("{}", "Failed to read input. Try again.".error_style());
            continue;
        };
        let line = match event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => ":quit".to_string(),
            InputEvent::Interrupted => {
                println!("{}", "Command canceled.".system_style());
                continue;
            },
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let control = match parse_system_command(line) {
            Some(command) => run_system_command(registry, id, save_dir, &command, width)?,
            None => {
                let reply = registry.submit(id, line).context("while running a command")?;
                print_reply(&reply, width);
                ReplControl::Continue
            },
        };
        if let ReplControl::Quit = control {
            break;
        }
    }

    registry.remove(id)?;
    info!("session {id} ended");
    Ok(())
}

fn run_system_command(
    registry: &SessionRegistry,
    id: SessionId,
    save_dir: &Path,
    command: &SystemCommand,
    width: usize,
) -> Result<ReplControl> {
    match command {
        SystemCommand::Save(slot) => save_handler(registry, id, save_dir, slot).or_else(recoverable)?,
        SystemCommand::Load(slot) => match load_handler(registry, id, save_dir, slot) {
            Ok(text) => println!("{}", render_wrapped(&text, width)),
            Err(err) => recoverable(err)?,
        },
        SystemCommand::ListSaves => list_saves_handler(save_dir),
        SystemCommand::Words(pos) => words_handler(registry.lexicon(), *pos),
        SystemCommand::Learned => learned_handler(registry, id)?,
        SystemCommand::Help => system_help_handler(),
        SystemCommand::Quit => return Ok(quit_handler(registry, id)?),
        SystemCommand::Usage(usage) => println!("{} {}", "Usage:".error_style(), usage.system_style()),
        SystemCommand::Unknown(name) => {
            println!("{}", format!("Unknown command ':{name}'. Try :help.").error_style());
        },
    }
    Ok(ReplControl::Continue)
}

/// Report save/load problems to the player; anything else ends the session.
fn recoverable(err: SessionError) -> Result<(), SessionError> {
    match err {
        SessionError::Persistence(err) => {
            warn!("{err}");
            println!("{}", format!("{err}").error_style());
            Ok(())
        },
        other => Err(other),
    }
}

fn print_reply(reply: &SessionReply, width: usize) {
    if reply.rejected {
        println!("{}", strip_markers(&reply.text).denied_style());
    } else {
        println!("{}", render_wrapped(&reply.text, width));
    }
}
