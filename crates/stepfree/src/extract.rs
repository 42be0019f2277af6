//! Response extractor: tolerate a model that wraps its JSON in a markdown
//! code fence despite being told not to.
use serde_json::Value;
use stepfree_core::preview::{PREVIEW_CHARS, preview};

use crate::error::PipelineError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Trim `raw` and remove one surrounding code fence, if any.
///
/// A `` ```json `` opener (any case) is recognised before a bare
/// `` ``` `` opener. The closing fence is only removed when it ends the text.
pub fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();

    let body = if starts_with_ignore_case(text, JSON_FENCE) {
        &text[JSON_FENCE.len()..]
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        rest
    } else {
        return text;
    };

    let body = body.strip_prefix('\n').unwrap_or(body);
    let body = body.strip_suffix(FENCE).unwrap_or(body);
    let body = body.strip_suffix('\n').unwrap_or(body);
    body.trim()
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Strip fences and parse what is left.
///
/// # Errors
///
/// [`PipelineError::Parse`] carrying the parser message and a preview of
/// the text that failed to parse.
pub fn extract_json(raw: &str) -> Result<Value, PipelineError> {
    let cleaned = strip_fences(raw);
    serde_json::from_str(cleaned).map_err(|err| PipelineError::Parse {
        message: err.to_string(),
        raw: preview(cleaned, PREVIEW_CHARS).into_owned(),
    })
}
