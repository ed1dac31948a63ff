//! Instance settings endpoints.

use crate::client::EvolutionClient;
use crate::constants::routes;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::settings::{SetSettingsResponse, Settings, SettingsRequest};

impl EvolutionClient {
    /// Replace the instance's behaviour settings.
    ///
    /// **Endpoint:** `POST /settings/set/{instance}`
    pub async fn set_settings(
        &self,
        req: &SettingsRequest,
        instance: Option<&str>,
    ) -> Result<SetSettingsResponse> {
        self.post(
            routes::settings::SET,
            RequestOptions::new().maybe_instance(instance).json(req)?,
        )
        .await
    }

    /// Read the instance's behaviour settings.
    ///
    /// **Endpoint:** `GET /settings/find/{instance}`
    pub async fn find_settings(&self, instance: Option<&str>) -> Result<Settings> {
        self.get(
            routes::settings::FIND,
            RequestOptions::new().maybe_instance(instance),
        )
        .await
    }
}
