//! Error types for the `evolution-rs` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, EvolutionError>`.
//!
//! [`EvolutionError`] covers:
//! - **API errors** — Normalized gateway and transport failures ([`ApiError`])
//! - **Configuration errors** — Missing instance scope, unusable server URL,
//!   incomplete environment configuration
//! - **JSON errors** — Request bodies that cannot be serialized
//! - **URL errors** — Malformed server URL
//! - **Invalid arguments** — Client-side validation errors

use std::fmt;
use std::panic::Location;

use serde::Serialize;
use serde_json::{Value, json};

use crate::extract::{display_value, is_falsy, resolve_message};

/// Stable name carried by every [`ApiError`].
pub const API_ERROR_NAME: &str = "EvolutionApiError";

/// Message used when neither the payload nor the caller supplies one.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Where an [`ApiError`] originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The request never produced a usable response: connection failure,
    /// body read failure, or an unparseable success body.
    Transport,
    /// The gateway answered with a failure status or an error-shaped body.
    Upstream,
}

/// The normalized error raised for every failed gateway call.
///
/// The displayed [`message`](Self::message) is extracted from the raw
/// [`details`](Self::details) when possible, so callers always get something
/// readable regardless of which of the gateway's many error shapes came back.
///
/// `Display` prints only the message; the alternate form (`{:#}`) prints the
/// full diagnostic produced by [`render`](Self::render).
#[derive(Debug)]
pub struct ApiError {
    message: String,
    status_code: Option<u16>,
    details: Option<Value>,
    kind: ErrorKind,
    origin: &'static Location<'static>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ApiError {
    /// Build an upstream error from a fallback message, the raw cause payload,
    /// and an optional HTTP status code.
    ///
    /// The final message is the one extracted from `cause`, else `message`,
    /// else [`UNKNOWN_ERROR_MESSAGE`].
    #[track_caller]
    pub fn new(message: impl Into<String>, cause: Option<Value>, status_code: Option<u16>) -> Self {
        let resolved = cause.as_ref().and_then(resolve_trimmed);
        Self::build(
            ErrorKind::Upstream,
            resolved,
            message.into(),
            cause,
            status_code,
        )
    }

    /// A failed gateway response.
    ///
    /// The message is extracted from the response `body` itself; `details`
    /// holds the request diagnostics (with the body under `response`) and is
    /// only searched when the body yields nothing, which is where the
    /// `"{statusCode}: {statusText}"` fallback comes from.
    #[track_caller]
    pub(crate) fn upstream(
        message: impl Into<String>,
        body: &Value,
        details: Value,
        status_code: u16,
    ) -> Self {
        let resolved = resolve_trimmed(body).or_else(|| resolve_trimmed(&details));
        Self::build(
            ErrorKind::Upstream,
            resolved,
            message.into(),
            Some(details),
            Some(status_code),
        )
    }

    /// Wrap a transport-level failure.
    ///
    /// The cause recorded in [`details`](Self::details) carries the transport
    /// error text together with the request URL and method; the error itself
    /// is kept as [`source`](std::error::Error::source).
    #[track_caller]
    pub(crate) fn transport<E>(error: E, url: &url::Url, method: &reqwest::Method) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let cause = json!({
            "message": error.to_string(),
            "url": url.as_str(),
            "method": method.as_str(),
        });
        let mut err = Self::build(
            ErrorKind::Transport,
            resolve_trimmed(&cause),
            "network or parsing error".to_owned(),
            Some(cause),
            None,
        );
        err.source = Some(Box::new(error));
        err
    }

    #[track_caller]
    fn build(
        kind: ErrorKind,
        resolved: Option<String>,
        fallback: String,
        details: Option<Value>,
        status_code: Option<u16>,
    ) -> Self {
        let message = resolved
            .or_else(|| Some(fallback).filter(|m| !m.trim().is_empty()))
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_owned());

        Self {
            message,
            status_code,
            details,
            kind,
            origin: Location::caller(),
            source: None,
        }
    }

    /// Always [`API_ERROR_NAME`].
    pub fn name(&self) -> &'static str {
        API_ERROR_NAME
    }

    /// The resolved, never-empty message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The raw cause payload, untouched.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Whether the gateway answered or the request never got a usable reply.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Source location at which the error was raised.
    pub fn origin(&self) -> &'static Location<'static> {
        self.origin
    }

    /// Render the error with its status code and request diagnostics.
    ///
    /// ```text
    /// EvolutionApiError: Instance does not exist (404)
    ///   URL: http://localhost:8080/instance/connect/demo/
    ///   Method: GET
    ///   Server Error: Not Found
    /// ```
    pub fn render(&self) -> String {
        format!("{self:#}")
    }

    /// Structured form for machine consumption (e.g. JSON logs).
    pub fn log_record(&self) -> LogRecord<'_> {
        LogRecord {
            name: API_ERROR_NAME,
            message: &self.message,
            status_code: self.status_code,
            kind: self.kind,
            details: self.details.as_ref(),
            origin: self.origin.to_string(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    /// Diagnostic lines pulled from `details`, minus any that repeat the message.
    fn detail_lines(&self) -> Vec<String> {
        let Some(Value::Object(details)) = &self.details else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        let mut push = |label: &str, value: Option<&Value>| {
            if let Some(value) = value.filter(|v| !is_falsy(v)) {
                let text = display_value(value);
                if text != self.message {
                    lines.push(format!("{label}: {text}"));
                }
            }
        };

        push("URL", details.get("url"));
        push("Method", details.get("method"));
        if let Some(Value::Object(response)) = details.get("response") {
            push("Server Error", response.get("error"));
            push("Server Message", response.get("message"));
        }
        lines
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            return f.write_str(&self.message);
        }

        write!(f, "{API_ERROR_NAME}: {}", self.message)?;
        if let Some(status) = self.status_code {
            write!(f, " ({status})")?;
        }
        for line in self.detail_lines() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Extracted message, trimmed, if it has any content.
fn resolve_trimmed(payload: &Value) -> Option<String> {
    resolve_message(payload)
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
}

/// Serializable snapshot of an [`ApiError`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord<'a> {
    pub name: &'static str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a Value>,
    /// `file:line:column` of the raise site.
    pub origin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// All possible errors produced by the `evolution-rs` client.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    /// A normalized gateway or transport failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The client is not configured for the requested call. Raised before any
    /// network activity.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failed to serialize a request body or query object.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error parsing the server URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl EvolutionError {
    /// The normalized API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.as_api().and_then(ApiError::status_code)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvolutionError>;
