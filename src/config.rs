//! Connection configuration for [`EvolutionClient`](crate::client::EvolutionClient).

use std::collections::HashMap;

use url::Url;

use crate::constants::env;
use crate::error::{EvolutionError, Result};

/// Server URL, API key, default instance scope and default headers.
///
/// # Example
///
/// ```
/// use evolution_rs::config::ClientConfig;
///
/// # fn main() -> evolution_rs::Result<()> {
/// let config = ClientConfig::new("http://localhost:8080", "global-api-key")?
///     .with_instance("support-line")
///     .with_header("x-request-source", "crm");
/// assert_eq!(config.instance.as_deref(), Some("support-line"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the gateway. Any path it carries is kept as a prefix.
    pub server_url: Url,
    /// API key sent in the `apikey` header.
    pub token: String,
    /// Default instance for instance-scoped calls.
    pub instance: Option<String>,
    /// Headers added to every request. Per-call headers override these.
    pub default_headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Parse `server_url` and build a configuration with no default instance.
    pub fn new(server_url: &str, token: impl Into<String>) -> Result<Self> {
        let server_url = Url::parse(server_url)?;
        if server_url.cannot_be_a_base() {
            return Err(EvolutionError::Configuration(format!(
                "server URL {server_url} cannot carry path segments"
            )));
        }

        Ok(Self {
            server_url,
            token: token.into(),
            instance: None,
            default_headers: HashMap::new(),
        })
    }

    /// Read `EVOLUTION_SERVER_URL`, `EVOLUTION_API_KEY` and the optional
    /// `EVOLUTION_INSTANCE` from the environment.
    pub fn from_env() -> Result<Self> {
        let server_url = required_var(env::SERVER_URL)?;
        let token = required_var(env::API_KEY)?;
        let mut config = Self::new(&server_url, token)?;
        config.instance = std::env::var(env::INSTANCE).ok().filter(|v| !v.is_empty());
        Ok(config)
    }

    /// Set the default instance scope.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EvolutionError::Configuration(format!("{name} is not set")))
}
