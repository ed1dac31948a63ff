//! Webhook configuration endpoints.

use crate::client::EvolutionClient;
use crate::constants::routes;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::webhook::{WebhookConfig, WebhookInfo};

impl EvolutionClient {
    /// Configure where and which events the gateway delivers.
    ///
    /// **Endpoint:** `POST /webhook/set/{instance}`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use evolution_rs::EvolutionClient;
    /// # use evolution_rs::types::WebhookEvent;
    /// # use evolution_rs::types::webhook::WebhookConfig;
    /// # #[tokio::main]
    /// # async fn main() -> evolution_rs::Result<()> {
    /// let client = EvolutionClient::new("http://localhost:8080", "global-api-key")?;
    /// let config = WebhookConfig {
    ///     enabled: true,
    ///     url: "https://example.com/hooks/whatsapp".into(),
    ///     webhook_by_events: false,
    ///     webhook_base64: false,
    ///     events: vec![WebhookEvent::MESSAGES_UPSERT, WebhookEvent::CONNECTION_UPDATE],
    /// };
    /// client.set_webhook(&config, Some("support-line")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn set_webhook(
        &self,
        config: &WebhookConfig,
        instance: Option<&str>,
    ) -> Result<WebhookInfo> {
        self.post(
            routes::webhook::SET,
            RequestOptions::new().maybe_instance(instance).json(config)?,
        )
        .await
    }

    /// Read the webhook configuration.
    ///
    /// **Endpoint:** `GET /webhook/find/{instance}`
    pub async fn find_webhook(&self, instance: Option<&str>) -> Result<Option<WebhookInfo>> {
        self.get(
            routes::webhook::FIND,
            RequestOptions::new().maybe_instance(instance),
        )
        .await
    }
}
