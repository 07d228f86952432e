//! Inline vocabulary markers for terminal output.
//!
//! Room descriptions, dialogue and generated responses mark practice words as
//! `**word**`. This module finds those markers, strips them for plain output,
//! or replaces them with highlighted text for the terminal.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use textwrap::{Options, fill, wrap_algorithms::Penalties};

use crate::style::GameStyle;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*").expect("vocabulary marker pattern is valid"));

/// Every marked word in `text`, in order of appearance.
pub fn marked_words(text: &str) -> Vec<&str> {
    MARKER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Remove the markers, keeping the words.
pub fn strip_markers(text: &str) -> String {
    MARKER.replace_all(text, "$1").into_owned()
}

/// Replace markers with highlighted words.
pub fn render_inline(text: &str) -> String {
    MARKER
        .replace_all(text, |caps: &Captures| {
            let word: &str = &caps[1];
            word.vocab_style().to_string()
        })
        .into_owned()
}

/// Highlight markers and wrap each line of `text` to `width` columns.
pub fn render_wrapped(text: &str, width: usize) -> String {
    text.lines()
        .map(|line| {
            let ansi = render_inline(line);
            fill(&ansi, wrap_options(width))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_options(width: usize) -> Options<'static> {
    Options::new(width).wrap_algorithm(textwrap::WrapAlgorithm::OptimalFit(Penalties::new()))
}
