//! Builder-style helper for constructing **markdown prompts**.
//!
//! `PromptBuilder` offers a fluent API so prompt code reads like the text it
//! produces. Every method returns `self`:
//!
//! ```rust
//! use stepfree_prompt::builder::PromptBuilder;
//!
//! let md = PromptBuilder::new()
//!     .add_section_h2("Journey")
//!     .add_key_value("From", "King's Cross")
//!     .add_optional_key_value("Needs", None::<&str>)
//!     .add_bullet("Prefer lifts over escalators")
//!     .finalize();
//!
//! assert_eq!(md, "## Journey\n**From**: King's Cross\n- Prefer lifts over escalators\n");
//! ```
//!
//! Output is a pure function of the calls made: no timestamps, no
//! randomness, whitespace emitted exactly as requested.

use std::fmt::Display;

/// Fluent helper to produce markdown text.
#[derive(Debug, Default, Clone)]
pub struct PromptBuilder {
    buffer: String,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a level-2 (`##`) heading.
    pub fn add_section_h2(self, line: impl Display) -> Self {
        self.add_line(format_args!("## {line}"))
    }

    /// Add a plain line of text and a trailing newline.
    pub fn add_line(mut self, line: impl Display) -> Self {
        self.buffer.push_str(&line.to_string());
        self.buffer.push('\n');
        self
    }

    /// `**Key**: Value`
    pub fn add_key_value(self, key: impl Display, value: impl Display) -> Self {
        self.add_line(format_args!("**{key}**: {value}"))
    }

    /// Like [`Self::add_key_value`], but emits nothing for `None`.
    pub fn add_optional_key_value(self, key: impl Display, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.add_key_value(key, value),
            None => self,
        }
    }

    /// `- item`
    pub fn add_bullet(self, item: impl Display) -> Self {
        self.add_line(format_args!("- {item}"))
    }

    /// One `- item` line per entry.
    pub fn add_bullets<I>(self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        items
            .into_iter()
            .fold(self, |builder, item| builder.add_bullet(item))
    }

    /// Add a line indented by `depth` levels of two spaces.
    pub fn add_indented_line(self, depth: usize, line: impl Display) -> Self {
        self.add_line(format_args!("{:indent$}{line}", "", indent = depth * 2))
    }

    /// Append pre-rendered text verbatim. A trailing newline is added when
    /// the text does not already end with one.
    pub fn add_text(mut self, text: &str) -> Self {
        self.buffer.push_str(text);
        if !text.is_empty() && !text.ends_with('\n') {
            self.buffer.push('\n');
        }
        self
    }

    /// Insert a single blank line.
    pub fn add_blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Retrieve the accumulated markdown and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indented_lines() {
        let md = PromptBuilder::new()
            .add_indented_line(0, "a")
            .add_indented_line(2, "b")
            .finalize();
        assert_eq!(md, "a\n    b\n");
    }

    #[test]
    fn test_add_text_terminates_line_once() {
        let md = PromptBuilder::new()
            .add_text("one")
            .add_text("two\n")
            .add_text("")
            .finalize();
        assert_eq!(md, "one\ntwo\n");
    }

    #[test]
    fn test_bullets_and_blank_line() {
        let md = PromptBuilder::new()
            .add_bullets(["x", "y"])
            .add_blank_line()
            .add_line("end")
            .finalize();
        assert_eq!(md, "- x\n- y\n\nend\n");
    }
}
