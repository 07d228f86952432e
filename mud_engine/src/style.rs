//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait applies ANSI styling via the `colored` crate.
//! Implementations for `&str` and `String` let literals be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    /// Highlight for a practice-language vocabulary word.
    fn vocab_style(&self) -> ColoredString;
    fn translation_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn denied_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn system_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn vocab_style(&self) -> ColoredString {
        self.bold().truecolor(220, 180, 40)
    }
    fn translation_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn denied_style(&self) -> ColoredString {
        self.italic().truecolor(230, 30, 30)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn system_style(&self) -> ColoredString {
        self.dimmed().truecolor(75, 180, 255)
    }
    fn prompt_style(&self) -> ColoredString {
        self.bold().truecolor(13, 130, 60)
    }
}

impl GameStyle for String {
    fn vocab_style(&self) -> ColoredString {
        self.as_str().vocab_style()
    }
    fn translation_style(&self) -> ColoredString {
        self.as_str().translation_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn denied_style(&self) -> ColoredString {
        self.as_str().denied_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn system_style(&self) -> ColoredString {
        self.as_str().system_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
}
