//! Per-call request options for the dispatcher.
//!
//! [`RequestOptions`] carries everything about a call except its method and
//! path: body, query, extra headers, and instance scoping. It is built fresh
//! for every call and consumed by
//! [`EvolutionClient::send`](crate::client::EvolutionClient::send).

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::{EvolutionError, Result};
use crate::extract::is_falsy;

/// A request body.
#[derive(Debug, Clone)]
pub enum Body {
    /// Sent as `application/json`.
    Json(Value),
    /// Sent as `multipart/form-data`.
    Form(FormData),
}

impl Body {
    /// Text form of the body recorded in error details.
    pub(crate) fn diagnostic(&self) -> Value {
        match self {
            Self::Json(value) => Value::String(value.to_string()),
            Self::Form(form) => Value::String(format!("[form-data: {}]", form.describe())),
        }
    }
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

/// Multipart form contents, for media upload endpoints.
///
/// Kept as plain data until dispatch so options stay `Clone` and the body can
/// be described in error diagnostics.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    parts: Vec<(String, FormValue)>,
}

#[derive(Debug, Clone)]
enum FormValue {
    Text(String),
    File {
        file_name: String,
        mime_type: String,
        data: Bytes,
    },
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), FormValue::Text(value.into())));
        self
    }

    /// Add a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push((
            name.into(),
            FormValue::File {
                file_name: file_name.into(),
                mime_type: mime_type.into(),
                data: data.into(),
            },
        ));
        self
    }

    /// Field names, with file names for file parts.
    fn describe(&self) -> String {
        self.parts
            .iter()
            .map(|(name, value)| match value {
                FormValue::Text(_) => name.clone(),
                FormValue::File { file_name, .. } => format!("{name}={file_name}"),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in self.parts {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::File {
                    file_name,
                    mime_type,
                    data,
                } => {
                    let length = data.len() as u64;
                    let part = Part::stream_with_length(data, length)
                        .file_name(file_name)
                        .mime_str(&mime_type)
                        .map_err(|_| {
                            EvolutionError::InvalidArgument(format!(
                                "invalid MIME type for form field {name}: {mime_type}"
                            ))
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// Options for a single call.
///
/// Calls are instance-scoped by default: the resolved instance is appended to
/// the path. Use [`global`](Self::global) for endpoints that live outside any
/// instance, and [`instance`](Self::instance) to target a specific instance
/// without touching the client's default scope.
///
/// # Example
///
/// ```
/// use evolution_rs::request::RequestOptions;
/// use serde_json::json;
///
/// # fn main() -> evolution_rs::Result<()> {
/// let options = RequestOptions::new()
///     .instance("sales")
///     .query("page", 2)
///     .query("remoteJid", "")
///     .json(&json!({ "number": "5511999999999" }))?;
/// assert!(options.is_instance_scoped());
/// assert_eq!(options.instance_override(), Some("sales"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub(crate) body: Option<Body>,
    pub(crate) query: Vec<(String, Value)>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) instance_scoped: bool,
    pub(crate) instance: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            body: None,
            query: Vec::new(),
            headers: Vec::new(),
            instance_scoped: true,
            instance: None,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `body` as the JSON request body. A body that serializes to
    /// `null` sends no body at all.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = match serde_json::to_value(body)? {
            Value::Null => None,
            value => Some(Body::Json(value)),
        };
        Ok(self)
    }

    /// Use a multipart form as the request body.
    pub fn form(mut self, form: FormData) -> Self {
        self.body = Some(Body::Form(form));
        self
    }

    /// Add a query parameter. Falsy values (`null`, `false`, `0`, `""`) are
    /// dropped when the URL is built.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add every field of a serializable struct or map as a query parameter.
    pub fn query_from<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self> {
        match serde_json::to_value(params)? {
            Value::Object(map) => self.query.extend(map),
            Value::Null => {}
            other => {
                return Err(EvolutionError::InvalidArgument(format!(
                    "query parameters must serialize to an object, got {other}"
                )));
            }
        }
        Ok(self)
    }

    /// Add a header for this call only. Overrides a client default header of
    /// the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mark the call as not instance-scoped.
    pub fn global(mut self) -> Self {
        self.instance_scoped = false;
        self
    }

    /// Target `instance` for this call only. A blank name leaves the client's
    /// scope in effect.
    pub fn instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Target `instance` if given, else leave the client's scope in effect.
    pub fn maybe_instance(mut self, instance: Option<&str>) -> Self {
        if let Some(instance) = instance {
            self.instance = Some(instance.to_owned());
        }
        self
    }

    pub fn is_instance_scoped(&self) -> bool {
        self.instance_scoped
    }

    pub fn instance_override(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Query pairs that will be sent, in insertion order.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.query
            .iter()
            .filter(|(_, value)| !is_falsy(value))
            .map(|(key, value)| (key.as_str(), query_value(value)))
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(query_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
