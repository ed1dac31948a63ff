//! Shared enum types that map directly to Evolution API string values.
//!
//! [`WebhookEvent`] variants use `SCREAMING_SNAKE_CASE` to match the wire
//! format of the webhook configuration endpoint, so we suppress the Rust naming
//! convention lint. The remaining enums use serde renames.
#![allow(non_camel_case_types)]

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Connection State
// ---------------------------------------------------------------------------

/// WhatsApp connection state of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// Connected and ready to send.
    Open,
    /// Waiting for QR scan or pairing code.
    Connecting,
    /// Disconnected.
    #[serde(rename = "close")]
    Closed,
    /// The WhatsApp servers refused the session.
    Refused,
}

// ---------------------------------------------------------------------------
// Message Type
// ---------------------------------------------------------------------------

/// The `messageType` discriminator on stored and delivered messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "conversation")]
    Conversation,
    #[serde(rename = "textMessage")]
    Text,
    #[serde(rename = "extendedTextMessage")]
    ExtendedText,
    #[serde(rename = "ephemeralMessage")]
    Ephemeral,
    #[serde(rename = "audioMessage")]
    Audio,
    #[serde(rename = "imageMessage")]
    Image,
    #[serde(rename = "videoMessage")]
    Video,
    #[serde(rename = "documentMessage")]
    Document,
    #[serde(rename = "stickerMessage")]
    Sticker,
    #[serde(rename = "contactMessage")]
    Contact,
    #[serde(rename = "locationMessage")]
    Location,
    #[serde(rename = "reactionMessage")]
    Reaction,
    #[serde(rename = "buttonsMessage")]
    Buttons,
    /// Any type this crate does not model.
    #[serde(other)]
    Other,
}

// ---------------------------------------------------------------------------
// Message Update Status
// ---------------------------------------------------------------------------

/// Delivery status reported in message updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageUpdateStatus {
    ERROR,
    PENDING,
    SERVER_ACK,
    DELIVERY_ACK,
    READ,
    /// Voice note or video played by the recipient.
    PLAYED,
    DELETED,
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// Typing indicator shown in a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatPresence {
    /// Typing a message.
    Composing,
    /// Recording audio.
    Recording,
    Paused,
}

/// Global presence of the instance's own account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstancePresence {
    Available,
    Unavailable,
}

// ---------------------------------------------------------------------------
// Integration
// ---------------------------------------------------------------------------

/// Messaging engine backing an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Integration {
    #[serde(rename = "WHATSAPP-BAILEYS")]
    WhatsappBaileys,
    #[serde(rename = "WHATSAPP-BUSINESS")]
    WhatsappBusiness,
    #[serde(rename = "EVOLUTION")]
    Evolution,
}

// ---------------------------------------------------------------------------
// Webhook Event
// ---------------------------------------------------------------------------

/// Event names accepted by the webhook configuration endpoint.
///
/// Deliveries name the same events in `lower.dot.case` (e.g.
/// `MESSAGES_UPSERT` is delivered as `messages.upsert`); see
/// [`delivery_name`](Self::delivery_name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEvent {
    APPLICATION_STARTUP,
    QRCODE_UPDATED,
    MESSAGES_SET,
    MESSAGES_UPSERT,
    MESSAGES_EDITED,
    MESSAGES_UPDATE,
    MESSAGES_DELETE,
    SEND_MESSAGE,
    CONTACTS_SET,
    CONTACTS_UPSERT,
    CONTACTS_UPDATE,
    PRESENCE_UPDATE,
    CHATS_SET,
    CHATS_UPSERT,
    CHATS_UPDATE,
    CHATS_DELETE,
    GROUPS_UPSERT,
    GROUP_UPDATE,
    GROUP_PARTICIPANTS_UPDATE,
    CONNECTION_UPDATE,
    LABELS_EDIT,
    LABELS_ASSOCIATION,
    CALL,
    TYPEBOT_START,
    TYPEBOT_CHANGE_STATUS,
}

impl WebhookEvent {
    /// The event name as it appears in the `event` field of a delivery.
    pub fn delivery_name(self) -> String {
        // Variant names are the configuration wire names.
        format!("{self:?}").to_ascii_lowercase().replace('_', ".")
    }
}
