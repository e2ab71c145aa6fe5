//! Tolerant recovery of a JSON object from free-form model output.
//!
//! Models are told to answer in raw JSON but often wrap it in markdown
//! fences or surround it with prose. Strategies are tried in order and the
//! first that yields a JSON object wins:
//!
//! 1. the whole text
//! 2. the first fenced code block (optionally tagged `json`)
//! 3. the span from the first `{` to the last `}`

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ParseError;

const PREVIEW_CHARS: usize = 200;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("static regex"));

/// Extract the first recoverable JSON object from `content`.
pub fn extract_json_object(content: &str) -> Result<Map<String, Value>, ParseError> {
    if let Some(obj) = parse_object(content) {
        return Ok(obj);
    }

    if let Some(obj) = FENCED_BLOCK
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_object(m.as_str()))
    {
        return Ok(obj);
    }

    if let Some(obj) = outer_braces(content).and_then(parse_object) {
        return Ok(obj);
    }

    Err(ParseError {
        preview: content.chars().take(PREVIEW_CHARS).collect(),
    })
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
