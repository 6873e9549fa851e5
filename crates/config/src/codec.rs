//! Text format for persisted config files.
//!
//! A config file is a pretty-printed JSON mapping followed by a block comment
//! recording when and by what it was generated:
//!
//! ```text
//! {
//!   "name": {
//!     "first": "Andrew"
//!   }
//! }
//! /* Config file generated by dotconf at 2026-10-19T08:30:00Z */
//! ```
//!
//! Invariants:
//! - Rendered text always starts with `{` and ends with `*/\n`.
//! - Rendering a given tree at a given timestamp is byte-for-byte stable.
//! - Parsing accepts exactly one JSON value followed only by whitespace and
//!   block comments; anything but a mapping is rejected.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::GENERATED_BY;

/// Reasons a config file's text could not be turned into a config mapping.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file is empty")]
    Empty,

    #[error("invalid syntax: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("unexpected content after the config mapping")]
    TrailingContent,

    #[error("not a valid mapping (found {found})")]
    NotAMapping { found: &'static str },
}

/// Renders `tree` stamped with the current time.
pub fn render(tree: &Map<String, Value>) -> serde_json::Result<String> {
    render_at(tree, Utc::now())
}

/// Renders `tree` stamped with `generated_at`.
pub fn render_at(
    tree: &Map<String, Value>,
    generated_at: DateTime<Utc>,
) -> serde_json::Result<String> {
    let body = serde_json::to_string_pretty(tree)?;
    Ok(format!(
        "{body}\n/* {GENERATED_BY} at {} */\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ))
}

/// Parses config file text back into a mapping.
pub fn parse(text: &str) -> Result<Map<String, Value>, ParseError> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    let value = stream.next().ok_or(ParseError::Empty)??;

    if !only_comments(&text[stream.byte_offset()..]) {
        return Err(ParseError::TrailingContent);
    }

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::NotAMapping {
            found: kind_of(&other),
        }),
    }
}

fn only_comments(mut rest: &str) -> bool {
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return true;
        }
        let Some(comment) = rest.strip_prefix("/*") else {
            return false;
        };
        match comment.find("*/") {
            Some(end) => rest = &comment[end + 2..],
            None => return false,
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
