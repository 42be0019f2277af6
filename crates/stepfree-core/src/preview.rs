//! Length-capped previews of untrusted text.
//!
//! Upstream payloads can be arbitrarily large. Anything that ends up in an
//! error message, a failure envelope or a log line goes through [`preview`]
//! first.
use std::borrow::Cow;

/// Cap applied to raw payload previews and upstream error bodies.
pub const PREVIEW_CHARS: usize = 500;

/// Return at most `max_chars` characters of `text`.
///
/// Cuts on a `char` boundary and appends `…` when something was dropped, so
/// the result is always valid UTF-8 and never longer than `max_chars + 1`
/// characters.
///
/// ```rust
/// use stepfree_core::preview::preview;
///
/// assert_eq!(preview("short", 10), "short");
/// assert_eq!(preview("abcdef", 3), "abc…");
/// ```
pub fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}…", &text[..cut])),
    }
}
