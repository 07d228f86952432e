//! Terminal input handling for the REPL.
//!
//! Wraps rustyline configuration and completion tailored to the verb set,
//! the world's vocabulary and the save-slot workflow.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::command::Verb;
use crate::repl::system::SYSTEM_COMMANDS;
use crate::save_files::collect_save_slots;
use crate::world::WorldSeed;

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

lazy_static! {
    static ref COMMAND_TERMS: Vec<String> = build_command_terms();
}

type ReplEditor = rustyline::Editor<MudHelper, DefaultHistory>;

/// Completes verbs and system commands in first position, save slots after
/// `:load`, and world vocabulary everywhere else.
struct MudHelper {
    save_dir: PathBuf,
    words: Vec<String>,
}

impl Helper for MudHelper {}

impl Completer for MudHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_token(line, pos);
        let is_first = line[..start].trim().is_empty();
        let lower = prefix.to_lowercase();

        let candidates: Vec<String> = if is_first {
            COMMAND_TERMS.iter().filter(|term| term.starts_with(&lower)).cloned().collect()
        } else if line.trim_start().starts_with(":load") {
            available_save_slots(&self.save_dir)
                .into_iter()
                .filter(|slot| slot.starts_with(&lower))
                .collect()
        } else if prefix.is_empty() {
            Vec::new()
        } else {
            self.words.iter().filter(|word| word.starts_with(prefix)).cloned().collect()
        };

        let pairs = candidates
            .into_iter()
            .map(|term| Pair {
                display: term.clone(),
                replacement: term,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for MudHelper {
    type Hint = String;
}

impl Highlighter for MudHelper {}

impl Validator for MudHelper {}

/// Byte offset and text of the token under the cursor.
fn current_token(line: &str, pos: usize) -> (usize, &str) {
    let slice = &line[..pos];
    let start = slice.rfind(char::is_whitespace).map_or(0, |idx| {
        idx + slice[idx..].chars().next().map_or(1, char::len_utf8)
    });
    (start, &slice[start..])
}

fn build_command_terms() -> Vec<String> {
    let mut terms: Vec<String> = Verb::ALL.iter().map(|verb| verb.as_str().to_string()).collect();
    terms.extend(SYSTEM_COMMANDS.iter().map(|cmd| (*cmd).to_string()));
    terms.sort_unstable();
    terms.dedup();
    terms
}

/// Words worth completing: every item, NPC and exit direction in the world.
pub fn completion_words(seed: &WorldSeed) -> Vec<String> {
    let mut words: Vec<String> = seed
        .rooms
        .values()
        .flat_map(|room| {
            room.items
                .iter()
                .map(|item| item.word.clone())
                .chain(room.npcs.iter().map(|npc| npc.word.clone()))
                .chain(room.exits.keys().cloned())
        })
        .collect();
    words.sort_unstable();
    words.dedup();
    words
}

fn available_save_slots(dir: &Path) -> Vec<String> {
    match collect_save_slots(dir) {
        Ok(slots) => slots.into_iter().map(|slot| slot.slot).collect(),
        Err(err) => {
            warn!("Failed to enumerate save slots for completion: {err}");
            Vec::new()
        },
    }
}

/// Helper responsible for managing the interactive input backend.
///
/// Prefers `rustyline` when an interactive terminal is available, falling back to
/// a basic stdin reader otherwise.
pub struct InputManager {
    backend: Backend,
}

impl InputManager {
    pub fn new(save_dir: PathBuf, words: Vec<String>) -> Self {
        let backend = if io::stdin().is_terminal() {
            match RustylineInput::new(MudHelper { save_dir, words }) {
                Ok(editor) => {
                    info!("using rustyline-backed REPL input");
                    Backend::Rustyline(Box::new(editor))
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::plain()
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::plain()
        };

        Self { backend }
    }

    /// Read a line from the current backend. If the interactive backend reports an
    /// unrecoverable error, switch to the plain stdin backend and retry once.
    ///
    /// # Errors
    /// Returns the underlying I/O error if even plain stdin fails.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.backend.read_line(prompt) {
            Ok(event) => Ok(event),
            Err(err) => {
                if self.backend.is_rustyline() {
                    warn!("rustyline input failed: {err} -- switching to basic stdin");
                    self.backend = Backend::plain();
                    self.backend.read_line(prompt)
                } else {
                    Err(err)
                }
            },
        }
    }
}

enum Backend {
    Rustyline(Box<RustylineInput>),
    Plain(StdinInput),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(StdinInput::default())
    }

    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.read_line(prompt),
            Backend::Plain(stdin) => stdin.read_line(prompt),
        }
    }
}

struct RustylineInput {
    editor: ReplEditor,
    history_path: Option<PathBuf>,
}

impl RustylineInput {
    fn new(helper: MudHelper) -> io::Result<Self> {
        let mut editor = ReplEditor::new().map_err(map_io_err)?;
        editor.set_helper(Some(helper));
        let history_path = history_file_path();

        if let Some(path) = history_path.as_ref() {
            if let Some(dir) = path.parent()
                && let Err(err) = fs::create_dir_all(dir)
            {
                warn!("failed to create history directory {}: {err}", dir.display());
            }

            if let Err(err) = editor.load_history(path) {
                match err {
                    ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                        info!("no prior history found at {}, starting fresh", path.display());
                    },
                    other => {
                        warn!("failed to load history from {}: {other}", path.display());
                    },
                }
            }
        }

        Ok(Self { editor, history_path })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to append to history: {err}");
                    }
                    if let Some(path) = self.history_path.as_ref()
                        && let Err(err) = self.editor.save_history(path)
                    {
                        warn!("failed to persist history to {}: {err}", path.display());
                    }
                }
                Ok(InputEvent::Line(line))
            },
            Err(err) => convert_readline_error(err),
        }
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        let bytes = io::stdin().read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(InputEvent::Eof);
        }

        let line = self.buffer.trim_end_matches(['\n', '\r']);
        Ok(InputEvent::Line(line.to_string()))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base))
}

fn build_history_path(base: &Path) -> PathBuf {
    base.join("fa-mud").join("history.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Room;
    use std::collections::HashMap;

    #[test]
    fn converts_readline_ctrl_c_to_interrupt() {
        let result = convert_readline_error(ReadlineError::Interrupted).unwrap();
        assert!(matches!(result, InputEvent::Interrupted));
    }

    #[test]
    fn history_path_appends_components() {
        let path = build_history_path(Path::new("/tmp/mud-test"));
        assert!(path.ends_with(Path::new("fa-mud/history.txt")));
    }

    #[test]
    fn command_terms_cover_verbs_and_system_commands() {
        assert!(COMMAND_TERMS.iter().any(|term| term == "inventory"));
        assert!(COMMAND_TERMS.iter().any(|term| term == "give"));
        assert!(COMMAND_TERMS.iter().any(|term| term == ":save"));
        assert!(!COMMAND_TERMS.iter().any(|term| term == "to"));
    }

    #[test]
    fn current_token_handles_multibyte_words() {
        let line = "take کت";
        let (start, token) = current_token(line, line.len());
        assert_eq!(token, "کت");
        assert_eq!(&line[..start], "take ");
        assert_eq!(current_token("lo", 2), (0, "lo"));
    }

    #[test]
    fn completion_words_collects_world_vocabulary() {
        let mut rooms = HashMap::new();
        rooms.insert(
            "hall".to_string(),
            Room::new("hall", "Hall", "").with_exit("شمال", "yard").with_exit("جنوب", "yard"),
        );
        let seed = WorldSeed {
            title: String::new(),
            intro: String::new(),
            player_name: String::new(),
            start_room: "hall".into(),
            rooms,
        };
        let words = completion_words(&seed);
        assert_eq!(words.len(), 2);
        assert!(words.contains(&"شمال".to_string()));
    }
}
