//! Chat types: message search, media download, presence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::enums::*;
use crate::types::messages::{ContextInfo, MessageContent, MessageUpdate};

// ---------------------------------------------------------------------------
// Find Messages
// ---------------------------------------------------------------------------

/// Inclusive timestamp range, in Unix seconds as strings.
#[derive(Debug, Clone, Serialize)]
pub struct TimestampRange {
    pub gte: String,
    pub lte: String,
}

/// Key fields to match in `POST /chat/findMessages/{instance}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKeyFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_me: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_jid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_timestamp: Option<TimestampRange>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageWhere {
    pub key: MessageKeyFilter,
}

/// Request body for `POST /chat/findMessages/{instance}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindMessagesRequest {
    #[serde(rename = "where")]
    pub filter: MessageWhere,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl FindMessagesRequest {
    /// All messages of one chat.
    pub fn for_chat(remote_jid: impl Into<String>) -> Self {
        Self {
            filter: MessageWhere {
                key: MessageKeyFilter {
                    remote_jid: Some(remote_jid.into()),
                    ..Default::default()
                },
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessageKey {
    pub id: String,
    #[serde(default)]
    pub from_me: bool,
    pub remote_jid: String,
    #[serde(default)]
    pub sender_lid: Option<String>,
}

/// A message record as stored by the gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: String,
    pub key: StoredMessageKey,
    #[serde(default)]
    pub push_name: Option<String>,
    pub message_type: MessageType,
    #[serde(default)]
    pub message: MessageContent,
    #[serde(default)]
    pub message_timestamp: Option<i64>,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub context_info: Option<ContextInfo>,
    #[serde(rename = "MessageUpdate", default)]
    pub message_update: Vec<MessageUpdate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePage {
    pub total: u64,
    pub pages: u64,
    pub current_page: u64,
    pub records: Vec<StoredMessage>,
}

/// Response from `POST /chat/findMessages/{instance}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FindMessagesResponse {
    pub messages: MessagePage,
}

// ---------------------------------------------------------------------------
// Base64 media
// ---------------------------------------------------------------------------

/// Request body for `POST /chat/getBase64FromMediaMessage/{instance}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBase64FromMediaMessageRequest {
    pub message: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convert_to_mp4: Option<bool>,
}

impl GetBase64FromMediaMessageRequest {
    /// Request the media of the message with key id `message_id`.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message: serde_json::json!({ "key": { "id": message_id.into() } }),
            convert_to_mp4: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSize {
    #[serde(default)]
    pub file_length: Option<Value>,
}

/// Response from `POST /chat/getBase64FromMediaMessage/{instance}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64Media {
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub size: Option<MediaSize>,
    #[serde(default)]
    pub mimetype: Option<String>,
    pub base64: String,
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// Request body for `POST /chat/sendPresence/{instance}`.
#[derive(Debug, Clone, Serialize)]
pub struct SendPresenceRequest {
    /// Chat number or JID.
    pub number: String,
    pub presence: ChatPresence,
    /// How long to show the indicator, in milliseconds.
    pub delay: u64,
}
