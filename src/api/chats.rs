//! Chat endpoints.

use crate::client::EvolutionClient;
use crate::constants::routes;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::chats::*;
use crate::types::instance::StatusResponse;

impl EvolutionClient {
    /// Search stored messages.
    ///
    /// **Endpoint:** `POST /chat/findMessages/{instance}`
    pub async fn find_messages(
        &self,
        req: &FindMessagesRequest,
        instance: Option<&str>,
    ) -> Result<FindMessagesResponse> {
        self.post(
            routes::chats::FIND_MESSAGES,
            RequestOptions::new().maybe_instance(instance).json(req)?,
        )
        .await
    }

    /// Download a received media message as base64.
    ///
    /// **Endpoint:** `POST /chat/getBase64FromMediaMessage/{instance}`
    pub async fn get_base64_from_media_message(
        &self,
        req: &GetBase64FromMediaMessageRequest,
        instance: Option<&str>,
    ) -> Result<Base64Media> {
        self.post(
            routes::chats::GET_BASE64_FROM_MEDIA_MESSAGE,
            RequestOptions::new().maybe_instance(instance).json(req)?,
        )
        .await
    }

    /// Show a typing or recording indicator in a chat.
    ///
    /// **Endpoint:** `POST /chat/sendPresence/{instance}`
    pub async fn send_presence(
        &self,
        req: &SendPresenceRequest,
        instance: Option<&str>,
    ) -> Result<StatusResponse> {
        self.post(
            routes::chats::SEND_PRESENCE,
            RequestOptions::new().maybe_instance(instance).json(req)?,
        )
        .await
    }
}
