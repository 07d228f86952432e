//! `repl::system` module
//!
//! Commands that act on the session rather than the game world. They all
//! start with `:` so they never collide with the verb set.

use std::path::Path;

use log::{info, warn};
use mud_data::PartOfSpeech;

use crate::lexicon::LexiconProvider;
use crate::markup::render_inline;
use crate::repl::ReplControl;
use crate::save_files::{self, RestoreReport, collect_save_slots, format_modified};
use crate::session::{SessionError, SessionId, SessionRegistry};
use crate::spinners::PhraseKind;
use crate::style::GameStyle;

/// System commands offered by completion.
pub const SYSTEM_COMMANDS: &[&str] = &[":save", ":load", ":saves", ":words", ":learned", ":help", ":quit"];

/// A parsed `:` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemCommand {
    Save(String),
    Load(String),
    ListSaves,
    Words(PartOfSpeech),
    Learned,
    Help,
    Quit,
    /// Recognized command with bad arguments; carries the usage line.
    Usage(&'static str),
    Unknown(String),
}

/// Parse a line as a system command. Returns `None` for ordinary game input.
pub fn parse_system_command(line: &str) -> Option<SystemCommand> {
    let rest = line.trim().strip_prefix(':')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.collect::<Vec<_>>().join(" ");

    let command = match (name.as_str(), arg.is_empty()) {
        ("save", false) => SystemCommand::Save(arg),
        ("save", true) => SystemCommand::Usage(":save <slot>"),
        ("load", false) => SystemCommand::Load(arg),
        ("load", true) => SystemCommand::Usage(":load <slot>"),
        ("saves", _) => SystemCommand::ListSaves,
        ("words", _) => PartOfSpeech::from_key(&arg).map_or(
            SystemCommand::Usage(":words <noun|verb|adjective|adverb|pronoun|preposition>"),
            SystemCommand::Words,
        ),
        ("learned", _) => SystemCommand::Learned,
        ("help" | "?", _) => SystemCommand::Help,
        ("quit" | "q" | "exit", _) => SystemCommand::Quit,
        _ => SystemCommand::Unknown(name),
    };
    Some(command)
}

/// Save the session to a slot.
///
/// # Errors
/// Fails for unknown sessions, poisoned locks, or file errors.
pub fn save_handler(registry: &SessionRegistry, id: SessionId, save_dir: &Path, slot: &str) -> Result<(), SessionError> {
    let path = registry.save(id, save_dir, slot)?;
    println!("Game saved to {}", path.display().to_string().system_style());
    Ok(())
}

/// Replace the session with a saved game and describe where the player is.
///
/// # Errors
/// Fails if the slot cannot be read or the restored game cannot be described.
pub fn load_handler(
    registry: &SessionRegistry,
    id: SessionId,
    save_dir: &Path,
    slot: &str,
) -> Result<String, SessionError> {
    let doc = save_files::read_save(&save_files::save_path(save_dir, slot))?;
    let report = registry.restore(id, &doc)?;
    print_restore_report(&report);
    println!("Saved game {} loaded.", slot.system_style());
    Ok(registry.submit(id, "look")?.text)
}

fn print_restore_report(report: &RestoreReport) {
    if report.is_clean() {
        return;
    }
    if let Some(version) = &report.version_mismatch {
        println!(
            "{}",
            format!("Save was written by version {version}; some content may have changed.").system_style()
        );
    }
    for word in report.dropped_items.iter().chain(&report.dropped_npcs) {
        println!("{}", format!("'{word}' is no longer part of this world and was left out.").system_style());
    }
    if report.relocated {
        println!("{}", "Your saved location no longer exists; you wake up at the start.".system_style());
    }
}

/// List save files with how long ago they were written.
pub fn list_saves_handler(save_dir: &Path) {
    let slots = match collect_save_slots(save_dir) {
        Ok(slots) => slots,
        Err(err) => {
            warn!("listing saves in '{}': {err}", save_dir.display());
            println!("{}", format!("Could not read saves: {err}").error_style());
            return;
        },
    };
    if slots.is_empty() {
        println!("{}", "No saved games yet.".system_style());
        return;
    }
    println!("{}", "Saved games".subheading_style());
    for slot in slots {
        let age = slot.modified.map(format_modified).unwrap_or_default();
        println!("  {:<20} {}", slot.slot, age.system_style());
    }
}

/// List lexicon words of one part of speech.
pub fn words_handler(lexicon: &dyn LexiconProvider, pos: PartOfSpeech) {
    let entries = lexicon.get_words_by_pos(pos);
    if entries.is_empty() {
        println!("{}", format!("No {pos} words in the lexicon.").system_style());
        return;
    }
    println!("{}", format!("Words ({pos})").subheading_style());
    for entry in entries {
        println!("  {}  {}", entry.word.vocab_style(), entry.translation.translation_style());
    }
}

/// List the words the player has learned so far.
///
/// # Errors
/// Fails for unknown sessions or poisoned locks.
pub fn learned_handler(registry: &SessionRegistry, id: SessionId) -> Result<(), SessionError> {
    let learned = registry.with_state(id, |state| state.player.learned_words.clone())?;
    if learned.is_empty() {
        println!("{}", "You have not learned any words yet. Try talking to people.".system_style());
        return Ok(());
    }
    println!("{}", format!("Learned words ({})", learned.len()).subheading_style());
    for word in &learned {
        let translation = registry
            .lexicon()
            .get_word(word)
            .map(|entry| entry.translation.as_str())
            .unwrap_or_default();
        println!("  {}  {}", word.vocab_style(), translation.translation_style());
    }
    Ok(())
}

/// Show system commands.
pub fn system_help_handler() {
    println!("{}", "System commands".subheading_style());
    for line in [
        ":save <slot>     save the game",
        ":load <slot>     load a saved game",
        ":saves           list saved games",
        ":words <pos>     list lexicon words by part of speech",
        ":learned         list the words you have learned",
        ":quit            leave the game",
    ] {
        println!("  {}", line.system_style());
    }
}

/// Say goodbye with a short summary of progress.
///
/// # Errors
/// Fails for unknown sessions or poisoned locks.
pub fn quit_handler(registry: &SessionRegistry, id: SessionId) -> Result<ReplControl, SessionError> {
    let (name, learned, visited, total) = registry.with_state(id, |state| {
        (
            state.player.name.clone(),
            state.player.learned_words.len(),
            state.rooms.values().filter(|room| room.state.visited).count(),
            state.rooms.len(),
        )
    })?;
    info!("{name} quit after learning {learned} words and visiting {visited}/{total} rooms");
    println!(
        "\n{}",
        format!("{name}, you learned {learned} words and explored {visited} of {total} places.").system_style()
    );
    println!("{}", render_inline(&registry.engine().responder().phrase(PhraseKind::QuitMsg)));
    Ok(ReplControl::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_input_is_not_a_system_command() {
        assert_eq!(parse_system_command("look"), None);
        assert_eq!(parse_system_command("take کتاب"), None);
    }

    #[test]
    fn parses_slots_and_parts_of_speech() {
        assert_eq!(parse_system_command(":save  first try"), Some(SystemCommand::Save("first try".into())));
        assert_eq!(parse_system_command(":LOAD a"), Some(SystemCommand::Load("a".into())));
        assert_eq!(parse_system_command(":words noun"), Some(SystemCommand::Words(PartOfSpeech::Noun)));
        assert_eq!(parse_system_command(":q"), Some(SystemCommand::Quit));
    }

    #[test]
    fn missing_arguments_yield_usage() {
        assert!(matches!(parse_system_command(":save"), Some(SystemCommand::Usage(_))));
        assert!(matches!(parse_system_command(":words"), Some(SystemCommand::Usage(_))));
        assert!(matches!(parse_system_command(":words things"), Some(SystemCommand::Usage(_))));
    }

    #[test]
    fn unknown_commands_are_reported_by_name() {
        assert_eq!(parse_system_command(":dance"), Some(SystemCommand::Unknown("dance".into())));
    }
}
