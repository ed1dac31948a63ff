//! Webhook configuration and deserialization of delivered events.
//!
//! The gateway POSTs a [`WebhookData`] envelope to the configured URL for every
//! subscribed event. Its `data` field changes shape with the event, so it is
//! kept raw and decoded on demand with [`WebhookData::payload`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::types::enums::*;
use crate::types::messages::{ContextInfo, MessageContent, MessageKey, Timestamp};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Request body for `POST /webhook/set/{instance}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    pub enabled: bool,
    pub url: String,
    /// Append the event name to the URL (`/messages-upsert` etc.).
    pub webhook_by_events: bool,
    /// Inline media as base64 in deliveries.
    pub webhook_base64: bool,
    pub events: Vec<WebhookEvent>,
}

/// Current webhook configuration, returned by `GET /webhook/find/{instance}`
/// (and echoed by `set`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub webhook_by_events: bool,
    #[serde(default)]
    pub webhook_base64: bool,
}

// ---------------------------------------------------------------------------
// Deliveries
// ---------------------------------------------------------------------------

/// The envelope of every webhook delivery.
///
/// # Example
///
/// ```
/// use evolution_rs::types::webhook::{WebhookData, WebhookPayload};
///
/// # fn main() -> evolution_rs::Result<()> {
/// let body = br#"{
///     "event": "connection.update",
///     "instance": "support-line",
///     "data": { "instance": "support-line", "state": "open", "statusReason": 200 },
///     "sender": "5511999999999@s.whatsapp.net"
/// }"#;
/// let delivery = WebhookData::from_slice(body)?;
/// match delivery.payload()? {
///     WebhookPayload::ConnectionUpdate(update) => println!("{:?}", update.state),
///     other => println!("{other:?}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookData {
    /// Event name in `lower.dot.case`, e.g. `messages.upsert`.
    pub event: String,
    pub instance: String,
    pub data: Value,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, rename = "date_time")]
    pub date_time: Option<String>,
    #[serde(default, rename = "server_url")]
    pub server_url: Option<String>,
    #[serde(default)]
    pub apikey: Option<String>,
}

/// `data` of a delivery, decoded by event name.
#[derive(Debug, Clone)]
pub enum WebhookPayload {
    /// `messages.upsert`, `send.message`.
    Message(Box<MessagePayload>),
    /// `contacts.upsert`, `contacts.update`, `contacts.set`.
    Contacts(Vec<ContactPayload>),
    /// `connection.update`.
    ConnectionUpdate(ConnectionUpdatePayload),
    /// Any other event, left undecoded.
    Other(Value),
}

impl WebhookData {
    /// Parse a delivery body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Decode `data` according to `event`.
    pub fn payload(&self) -> Result<WebhookPayload> {
        let payload = match self.event.as_str() {
            "messages.upsert" | "send.message" => {
                WebhookPayload::Message(Box::new(serde_json::from_value(self.data.clone())?))
            }
            "contacts.upsert" | "contacts.update" | "contacts.set" => match &self.data {
                // A single contact is sometimes delivered unwrapped.
                Value::Object(_) => {
                    WebhookPayload::Contacts(vec![serde_json::from_value(self.data.clone())?])
                }
                _ => WebhookPayload::Contacts(serde_json::from_value(self.data.clone())?),
            },
            "connection.update" => {
                WebhookPayload::ConnectionUpdate(serde_json::from_value(self.data.clone())?)
            }
            _ => WebhookPayload::Other(self.data.clone()),
        };
        Ok(payload)
    }
}

/// An inbound or outbound message delivery.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub key: MessageKey,
    #[serde(default)]
    pub push_name: Option<String>,
    #[serde(default)]
    pub message: Option<MessageContent>,
    #[serde(default)]
    pub message_type: Option<MessageType>,
    #[serde(default)]
    pub message_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub participant: Option<String>,
    #[serde(default)]
    pub context_info: Option<ContextInfo>,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl MessagePayload {
    /// Plain text of the message, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref()?.text()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub remote_jid: String,
    #[serde(default)]
    pub push_name: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub instance_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionUpdatePayload {
    pub instance: String,
    #[serde(default)]
    pub wuid: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    pub state: ConnectionState,
    #[serde(default)]
    pub status_reason: Option<u32>,
}
