//! Error-message extraction for Evolution API error payloads.
//!
//! The gateway reports failures in many shapes depending on which internal
//! layer produced them: a bare string, `{error}`, `{message: [...]}`,
//! `{description}`, `{detail}`, a `validation` array, or any of those nested
//! one or two levels deep under `response`. [`extract_message`] reduces all of
//! them to a single readable string.
//!
//! The lookup order is data, not control flow: [`MESSAGE_PATHS`] lists the
//! candidate locations most-specific first, and [`KNOWN_PATTERNS`] lists the
//! fixed rewrites for well-known gateway quirks. Both can be swapped for custom
//! tables via [`extract_message_with`] and [`match_known_pattern_with`].
//!
//! # Example
//!
//! ```
//! use evolution_rs::extract::extract_message;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "status": 400,
//!     "error": "Bad Request",
//!     "response": { "message": ["Instance does not exist"] }
//! });
//! assert_eq!(
//!     extract_message(&payload).as_deref(),
//!     Some("Instance does not exist")
//! );
//! ```

use serde_json::Value;

/// Returned when a payload cannot be serialized for the last-resort fallback.
pub const COMPLEX_ERROR_PLACEHOLDER: &str = "[Complex error object]";

/// Prefix for messages assembled from a `validation` array.
pub const VALIDATION_PREFIX: &str = "Validation error: ";

// ---------------------------------------------------------------------------
// Candidate paths
// ---------------------------------------------------------------------------

/// How a value found at a [`MessagePath`] is turned into a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Use the value as found.
    Value,
    /// The value must be an array; use its first element.
    First,
    /// Use the first element of an array, or the value itself otherwise.
    FirstOrValue,
}

impl Pick {
    fn apply(self, value: &Value) -> Option<&Value> {
        match self {
            Self::Value => Some(value),
            Self::First => value.as_array()?.first(),
            Self::FirstOrValue => match value {
                Value::Array(items) => items.first(),
                other => Some(other),
            },
        }
    }
}

/// One candidate location of an error message inside a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePath {
    /// Object keys walked from the payload root.
    pub path: &'static [&'static str],
    /// Transform applied to the value at `path`.
    pub pick: Pick,
}

impl MessagePath {
    /// Create a new candidate path.
    pub const fn new(path: &'static [&'static str], pick: Pick) -> Self {
        Self { path, pick }
    }

    /// Return the candidate value this path selects from `payload`, if any.
    pub fn probe<'a>(&self, payload: &'a Value) -> Option<&'a Value> {
        let found = self
            .path
            .iter()
            .try_fold(payload, |value, key| value.get(*key))?;
        self.pick.apply(found)
    }
}

/// Candidate message locations, highest precedence first.
///
/// The doubly-nested `response.response` shape is what the gateway produces
/// for errors raised deep inside its request pipeline, and is the most
/// reliable source of the real cause.
pub const MESSAGE_PATHS: &[MessagePath] = &[
    MessagePath::new(&["response", "response", "message"], Pick::First),
    MessagePath::new(&["response", "response", "error"], Pick::Value),
    MessagePath::new(&["response", "response", "description"], Pick::Value),
    MessagePath::new(&["response", "message"], Pick::First),
    MessagePath::new(&["response", "error"], Pick::Value),
    MessagePath::new(&["response", "description"], Pick::Value),
    MessagePath::new(&["message"], Pick::FirstOrValue),
    MessagePath::new(&["error"], Pick::Value),
    MessagePath::new(&["description"], Pick::Value),
    MessagePath::new(&["detail"], Pick::Value),
    MessagePath::new(&["data", "error"], Pick::Value),
    MessagePath::new(&["data", "message"], Pick::Value),
    MessagePath::new(&["error"], Pick::First),
    MessagePath::new(&["errors"], Pick::First),
];

// ---------------------------------------------------------------------------
// General extraction
// ---------------------------------------------------------------------------

/// Extract a human-readable message from an arbitrary error payload.
///
/// Returns `None` for falsy payloads (`null`, `false`, `0`, `""`), for
/// non-string scalars, and for empty objects/arrays. Strings are returned
/// unchanged. Any other record yields a message: a matched candidate, a
/// validation summary, a `"{statusCode}: {statusText}"` pair, or its compact
/// JSON form.
pub fn extract_message(payload: &Value) -> Option<String> {
    extract_message_with(payload, MESSAGE_PATHS)
}

/// [`extract_message`] over a custom candidate table.
pub fn extract_message_with(payload: &Value, paths: &[MessagePath]) -> Option<String> {
    if is_falsy(payload) {
        return None;
    }

    let record = match payload {
        Value::String(s) => return Some(s.clone()),
        Value::Object(_) | Value::Array(_) => payload,
        _ => return None,
    };

    if let Some(message) = paths
        .iter()
        .filter_map(|path| path.probe(record))
        .find_map(|candidate| candidate_message(candidate, paths))
    {
        return Some(message);
    }

    if let Some(message) = validation_message(record) {
        return Some(message);
    }

    if let Some(message) = status_message(record) {
        return Some(message);
    }

    if is_empty_record(record) {
        return None;
    }

    Some(serde_json::to_string(record).unwrap_or_else(|_| COMPLEX_ERROR_PLACEHOLDER.to_owned()))
}

/// A string candidate wins if it has content; an object is searched with the
/// same table. Arrays and other scalars never match directly.
fn candidate_message(candidate: &Value, paths: &[MessagePath]) -> Option<String> {
    match candidate {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Object(_) => extract_message_with(candidate, paths),
        _ => None,
    }
}

fn validation_message(record: &Value) -> Option<String> {
    let entries = record.get("validation")?.as_array()?;
    let parts: Vec<String> = entries.iter().filter_map(validation_entry).collect();
    if parts.is_empty() {
        return None;
    }
    Some(format!("{VALIDATION_PREFIX}{}", parts.join(", ")))
}

fn validation_entry(entry: &Value) -> Option<String> {
    let field = ["message", "error"]
        .iter()
        .filter_map(|key| entry.get(*key))
        .find(|value| !is_falsy(value));

    match field {
        Some(value) => Some(display_value(value)),
        None if entry.is_null() => None,
        None => Some(display_value(entry)).filter(|s| !s.is_empty()),
    }
}

fn status_message(record: &Value) -> Option<String> {
    let code = record.get("statusCode").filter(|v| !is_falsy(v))?;
    let text = record.get("statusText").filter(|v| !is_falsy(v))?;
    Some(format!("{}: {}", display_value(code), display_value(text)))
}

fn is_empty_record(record: &Value) -> bool {
    match record {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// Known gateway quirks
// ---------------------------------------------------------------------------

/// Message produced by a [`KnownPattern`].
#[derive(Debug, Clone, Copy)]
pub enum PatternMessage {
    /// A fixed replacement message.
    Fixed(&'static str),
    /// Builds the message from the payload. Returning `None` counts as a
    /// failed rule and evaluation moves on to the next pattern.
    Build(fn(&Value) -> Option<String>),
}

/// A predicate over an error payload paired with the message to report.
#[derive(Debug, Clone, Copy)]
pub struct KnownPattern {
    /// Short identifier, used in trace output.
    pub name: &'static str,
    /// Whether this pattern applies to the payload.
    pub matches: fn(&Value) -> bool,
    /// What to report when it does.
    pub message: PatternMessage,
}

/// Fixed rewrites for specific gateway failures, tried in order.
pub const KNOWN_PATTERNS: &[KnownPattern] = &[
    KnownPattern {
        name: "invalid-number",
        matches: has_nonexistent_number,
        message: PatternMessage::Fixed("Provided number is not a valid WhatsApp number"),
    },
    KnownPattern {
        name: "media-upload",
        matches: mentions_media_upload_failure,
        message: PatternMessage::Fixed("Media upload failed on all hosts"),
    },
    KnownPattern {
        name: "no-session",
        matches: mentions_missing_session,
        message: PatternMessage::Fixed("No session found, try restarting your instance"),
    },
    KnownPattern {
        name: "aggregate-error",
        matches: mentions_aggregate_error,
        message: PatternMessage::Fixed("Connection error occurred"),
    },
    KnownPattern {
        name: "axios-error",
        matches: mentions_axios_error,
        message: PatternMessage::Build(first_message_or_network_error),
    },
];

/// Match `payload` against [`KNOWN_PATTERNS`].
pub fn match_known_pattern(payload: &Value) -> Option<String> {
    match_known_pattern_with(payload, KNOWN_PATTERNS)
}

/// Match `payload` against a custom pattern table. Only objects are
/// considered. The first pattern that matches and yields a message wins.
pub fn match_known_pattern_with(payload: &Value, patterns: &[KnownPattern]) -> Option<String> {
    if !payload.is_object() {
        return None;
    }

    for pattern in patterns {
        if !(pattern.matches)(payload) {
            continue;
        }
        match pattern.message {
            PatternMessage::Fixed(message) => return Some(message.to_owned()),
            PatternMessage::Build(build) => match build(payload) {
                Some(message) => return Some(message),
                None => {
                    tracing::trace!(pattern = pattern.name, "pattern matched but produced no message");
                }
            },
        }
    }
    None
}

/// General extraction first, then the known-pattern table.
pub fn resolve_message(payload: &Value) -> Option<String> {
    extract_message(payload).or_else(|| match_known_pattern(payload))
}

fn message_entries(payload: &Value) -> impl Iterator<Item = &Value> {
    payload
        .get("message")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn any_message_contains(payload: &Value, needle: &str) -> bool {
    message_entries(payload).any(|m| m.as_str().is_some_and(|s| s.contains(needle)))
}

/// The gateway answers `sendText` & co. for unknown recipients with
/// `{message: [{exists: false, jid, number}]}`.
fn has_nonexistent_number(payload: &Value) -> bool {
    message_entries(payload).any(|entry| {
        entry.get("exists") == Some(&Value::Bool(false))
            && entry.get("jid").is_some_and(|v| !is_falsy(v))
            && entry.get("number").is_some_and(|v| !is_falsy(v))
    })
}

fn mentions_media_upload_failure(payload: &Value) -> bool {
    any_message_contains(payload, "Media upload failed")
}

fn mentions_missing_session(payload: &Value) -> bool {
    any_message_contains(payload, "No session")
}

fn mentions_aggregate_error(payload: &Value) -> bool {
    any_message_contains(payload, "AggregateError")
}

fn mentions_axios_error(payload: &Value) -> bool {
    any_message_contains(payload, "AxiosError")
}

fn first_message_or_network_error(payload: &Value) -> Option<String> {
    let first = message_entries(payload)
        .next()
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    Some(first.unwrap_or("Network error occurred").to_owned())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// JSON values that carry no information: `null`, `false`, zero and `""`.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Strings as-is, everything else as compact JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
