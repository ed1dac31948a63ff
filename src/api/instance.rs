//! Instance lifecycle endpoints.

use crate::client::EvolutionClient;
use crate::constants::routes;
use crate::error::{EvolutionError, Result};
use crate::request::RequestOptions;
use crate::types::instance::*;

/// Instance endpoints name their target explicitly; an empty name is refused
/// before the default scope could silently take over.
fn require_instance(instance: &str) -> Result<&str> {
    if instance.trim().is_empty() {
        return Err(EvolutionError::InvalidArgument(
            "instance name is required".into(),
        ));
    }
    Ok(instance)
}

impl EvolutionClient {
    /// Create a new instance.
    ///
    /// **Endpoint:** `POST /instance/create`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use evolution_rs::EvolutionClient;
    /// # use evolution_rs::types::instance::CreateInstanceRequest;
    /// # #[tokio::main]
    /// # async fn main() -> evolution_rs::Result<()> {
    /// let client = EvolutionClient::new("http://localhost:8080", "global-api-key")?;
    /// let mut req = CreateInstanceRequest::new("support-line");
    /// req.qrcode = Some(true);
    /// let created = client.create_instance(&req).await?;
    /// println!("created {}", created.instance.instance_name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_instance(
        &self,
        req: &CreateInstanceRequest,
    ) -> Result<CreateInstanceResponse> {
        self.post(
            routes::instance::CREATE,
            RequestOptions::new().global().json(req)?,
        )
        .await
    }

    /// Start the connection and fetch a QR code / pairing code.
    ///
    /// **Endpoint:** `GET /instance/connect/{instance}`
    pub async fn connect_instance(&self, instance: &str) -> Result<ConnectResponse> {
        let instance = require_instance(instance)?;
        self.get(
            routes::instance::CONNECT,
            RequestOptions::new().instance(instance),
        )
        .await
    }

    /// Current WhatsApp connection state.
    ///
    /// **Endpoint:** `GET /instance/connectionState/{instance}`
    pub async fn connection_state(&self, instance: &str) -> Result<ConnectionStateResponse> {
        let instance = require_instance(instance)?;
        self.get(
            routes::instance::CONNECTION_STATE,
            RequestOptions::new().instance(instance),
        )
        .await
    }

    /// Log the WhatsApp session out, keeping the instance.
    ///
    /// **Endpoint:** `DELETE /instance/logout/{instance}`
    pub async fn logout_instance(&self, instance: &str) -> Result<StatusResponse> {
        let instance = require_instance(instance)?;
        self.delete(
            routes::instance::LOGOUT,
            RequestOptions::new().instance(instance),
        )
        .await
    }

    /// Delete the instance.
    ///
    /// **Endpoint:** `DELETE /instance/delete/{instance}`
    pub async fn delete_instance(&self, instance: &str) -> Result<StatusResponse> {
        let instance = require_instance(instance)?;
        self.delete(
            routes::instance::DELETE,
            RequestOptions::new().instance(instance),
        )
        .await
    }

    /// Restart the instance's WhatsApp session.
    ///
    /// **Endpoint:** `POST /instance/restart/{instance}`
    pub async fn restart_instance(&self, instance: &str) -> Result<StatusResponse> {
        let instance = require_instance(instance)?;
        self.post(
            routes::instance::RESTART,
            RequestOptions::new().instance(instance),
        )
        .await
    }

    /// List instances, optionally filtered by name or id.
    ///
    /// **Endpoint:** `GET /instance/fetchInstances`
    pub async fn fetch_instances(&self, query: &FetchInstancesQuery) -> Result<Vec<InstanceInfo>> {
        self.get(
            routes::instance::FETCH_ALL,
            RequestOptions::new().global().query_from(query)?,
        )
        .await
    }

    /// Set the account's global presence.
    ///
    /// **Endpoint:** `POST /instance/setPresence/{instance}`
    pub async fn set_presence(
        &self,
        instance: &str,
        req: &SetPresenceRequest,
    ) -> Result<StatusResponse> {
        let instance = require_instance(instance)?;
        self.post(
            routes::instance::SET_PRESENCE,
            RequestOptions::new().instance(instance).json(req)?,
        )
        .await
    }
}
