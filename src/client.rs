//! Core HTTP client for the Evolution API.
//!
//! The [`EvolutionClient`] struct is the main entry point for interacting with
//! the gateway. It wraps [`reqwest::Client`] with the `apikey` header and
//! instance scoping, and provides typed `send`, `get`, `post`, `put`, `patch`
//! and `delete` methods.
//!
//! Endpoint methods are added to `EvolutionClient` via `impl` blocks in the
//! [`crate::api`] module.
//!
//! Every call resolves to exactly one of: the decoded success body, or an
//! [`EvolutionError`]. Failures reported by the gateway, and failures to reach
//! or understand it, are both normalized into [`ApiError`].

use reqwest::Method;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use crate::config::ClientConfig;
use crate::constants::API_KEY_HEADER;
use crate::error::{ApiError, EvolutionError, Result};
use crate::extract::is_falsy;
use crate::request::{Body, RequestOptions};

/// Core HTTP client for the Evolution API.
///
/// Holds the server URL, the API key (cached as a [`HeaderValue`]), the
/// current default instance and default headers. Each call builds and sends
/// one request; nothing is retried or cached.
///
/// The default instance can be changed with [`set_instance`](Self::set_instance),
/// which needs `&mut self`. To address several instances concurrently from one
/// client, clone it or pass an explicit instance per call.
///
/// # Example
///
/// ```no_run
/// use evolution_rs::client::EvolutionClient;
/// use evolution_rs::request::RequestOptions;
/// use serde_json::Value;
///
/// # #[tokio::main]
/// # async fn main() -> evolution_rs::Result<()> {
/// let mut client = EvolutionClient::new("http://localhost:8080", "global-api-key")?;
/// client.set_instance("support-line");
/// let state: Value = client
///     .get("instance/connectionState", RequestOptions::new())
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionClient {
    http: reqwest::Client,
    config: ClientConfig,
    /// Pre-built `apikey` header value.
    api_key: HeaderValue,
}

impl EvolutionClient {
    /// Create a client for `server_url` authenticating with `token`.
    pub fn new(server_url: &str, token: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(server_url, token)?)
    }

    /// Create a client from the `EVOLUTION_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from a prepared configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .build()
            .map_err(|e| {
                EvolutionError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;
        Self::with_http_client(config, http)
    }

    /// Create a client that sends through an existing `reqwest::Client`.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        let api_key = HeaderValue::from_str(&config.token).map_err(|_| {
            EvolutionError::InvalidArgument("API key contains invalid header characters".into())
        })?;
        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    /// Returns a reference to the underlying `reqwest::Client`.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn server_url(&self) -> &Url {
        &self.config.server_url
    }

    /// The current default instance, if any.
    pub fn instance(&self) -> Option<&str> {
        self.config.instance.as_deref()
    }

    /// Change the default instance for subsequent calls. A blank name counts as
    /// no instance at all.
    pub fn set_instance(&mut self, instance: impl Into<String>) {
        self.config.instance = Some(instance.into());
    }

    /// Builder-style variant of [`set_instance`](Self::set_instance).
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.set_instance(instance);
        self
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers
    // -----------------------------------------------------------------------

    /// Perform a GET request and deserialize the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R> {
        self.send(Method::GET, path, options).await
    }

    /// Perform a POST request and deserialize the JSON response.
    pub async fn post<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R> {
        self.send(Method::POST, path, options).await
    }

    /// Perform a PUT request and deserialize the JSON response.
    pub async fn put<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R> {
        self.send(Method::PUT, path, options).await
    }

    /// Perform a PATCH request and deserialize the JSON response.
    pub async fn patch<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R> {
        self.send(Method::PATCH, path, options).await
    }

    /// Perform a DELETE request and deserialize the JSON response.
    pub async fn delete<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R> {
        self.send(Method::DELETE, path, options).await
    }

    /// Build, send and decode one request.
    ///
    /// Instance-scoped calls use the per-call override if present, else the
    /// client's default instance; with neither, this fails with
    /// [`EvolutionError::Configuration`] before any network activity.
    pub async fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<R> {
        let instance = if options.instance_scoped {
            let resolved = non_blank(options.instance.as_deref())
                .or_else(|| non_blank(self.config.instance.as_deref()))
                .ok_or_else(|| {
                    EvolutionError::Configuration(
                        "instance not set: call set_instance or pass an instance for this request"
                            .into(),
                    )
                })?;
            Some(resolved)
        } else {
            None
        };

        let url = self.endpoint_url(path, instance, &options)?;
        let mut headers = self.request_headers(&options)?;
        match &options.body {
            Some(Body::Json(_)) => {
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            // The transport sets the multipart type with its boundary.
            Some(Body::Form(_)) => {
                headers.remove(header::CONTENT_TYPE);
            }
            None => {}
        }
        let body_diagnostic = options.body.as_ref().map(Body::diagnostic);

        tracing::debug!(%url, %method, "dispatching request");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .headers(headers);
        match options.body {
            Some(Body::Json(value)) => {
                request = request.body(value.to_string());
            }
            Some(Body::Form(form)) => {
                request = request.multipart(form.into_multipart()?);
            }
            None => {}
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e, &url, &method))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::transport(e, &url, &method))?;

        let (data, parsed) = match parse_body(&bytes) {
            Ok(data) => (data, true),
            Err(e) if status.is_success() => return Err(ApiError::transport(e, &url, &method).into()),
            // Error pages are often HTML or plain text; keep them as a string.
            Err(_) => (Value::String(String::from_utf8_lossy(&bytes).into_owned()), false),
        };

        if !status.is_success() || carries_error(&data) {
            let reason = status.canonical_reason().unwrap_or("Unknown Status");
            let details = json!({
                "url": url.as_str(),
                "method": method.as_str(),
                "params": url.query().unwrap_or_default(),
                "body": body_diagnostic,
                "statusCode": status.as_u16(),
                "statusText": reason,
                "response": data,
            });
            // Raw error pages are diagnostics only, never the message.
            let unparsed = Value::Null;
            let message_source = if parsed { &data } else { &unparsed };
            let err = ApiError::upstream(
                format!("{method} {path} failed: {reason}"),
                message_source,
                details,
                status.as_u16(),
            );
            tracing::debug!(%url, status = status.as_u16(), message = err.message(), "request failed");
            return Err(err.into());
        }

        serde_json::from_value(data).map_err(|e| ApiError::transport(e, &url, &method).into())
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// `{server_url}/{path}/{instance}/` or `{server_url}/{path}/`, plus the
    /// non-falsy query pairs.
    fn endpoint_url(
        &self,
        path: &str,
        instance: Option<&str>,
        options: &RequestOptions,
    ) -> Result<Url> {
        let mut url = self.config.server_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                EvolutionError::Configuration(format!(
                    "server URL {} cannot carry path segments",
                    self.config.server_url
                ))
            })?;
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(instance) = instance {
                segments.push(instance);
            }
            segments.push("");
        }

        let mut pairs = options.query_pairs().peekable();
        if pairs.peek().is_some() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Default headers applied to every request by the underlying client.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Client defaults, then call headers, then the API key.
    fn request_headers(&self, options: &RequestOptions) -> Result<HeaderMap> {
        let call_headers = options.headers.iter().map(|(name, value)| (name, value));
        let mut headers = HeaderMap::new();
        for (name, value) in self.config.default_headers.iter().chain(call_headers) {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                EvolutionError::InvalidArgument(format!("invalid header name: {name}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                EvolutionError::InvalidArgument(format!("invalid value for header {name}"))
            })?;
            headers.insert(header_name, header_value);
        }
        headers.insert(API_KEY_HEADER, self.api_key.clone());
        Ok(headers)
    }
}

/// Blank instance names count as unset.
fn non_blank(instance: Option<&str>) -> Option<&str> {
    instance.filter(|s| !s.trim().is_empty())
}

/// Empty bodies decode as `null`.
fn parse_body(bytes: &[u8]) -> std::result::Result<Value, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes)
}

/// A success status with a truthy top-level `error` is still a failure.
fn carries_error(data: &Value) -> bool {
    data.get("error").is_some_and(|e| !is_falsy(e))
}
