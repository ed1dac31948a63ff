//! Message keys, content variants, timestamps, and outgoing
//! contact/media requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::enums::*;

// ---------------------------------------------------------------------------
// Keys and timestamps
// ---------------------------------------------------------------------------

/// Identifies a message within a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKey {
    pub remote_jid: String,
    #[serde(default)]
    pub from_me: bool,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_lid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
}

/// A Unix timestamp in seconds, sent as a number or a numeric string
/// depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Seconds(i64),
    Text(String),
}

impl Timestamp {
    /// Seconds since the Unix epoch, if representable.
    pub fn as_seconds(&self) -> Option<i64> {
        match self {
            Self::Seconds(secs) => Some(*secs),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Convert to a UTC datetime.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.as_seconds()?, 0)
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisappearingMode {
    #[serde(default)]
    pub initiator: Option<String>,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub initiated_by_me: Option<bool>,
}

/// Quote, forward and ephemeral metadata attached to a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_setting_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disappearing_mode: Option<DisappearingMode>,
    /// ID of the quoted message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stanza_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarding_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_forwarded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentioned_jid: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Content variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTextMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
}

/// Fields shared by downloadable media (image, video, audio, document,
/// sticker).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_length: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_enc_sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_key_timestamp: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage {
    #[serde(flatten)]
    pub media: MediaInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg_thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMessage {
    #[serde(flatten)]
    pub media: MediaInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg_thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    #[serde(flatten)]
    pub media: MediaInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
    /// Push-to-talk (voice note).
    #[serde(default)]
    pub ptt: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveform: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMessage {
    #[serde(flatten)]
    pub media: MediaInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_info: Option<ContextInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMessage {
    #[serde(flatten)]
    pub media: MediaInfo,
    #[serde(default)]
    pub is_animated: bool,
    #[serde(default)]
    pub is_avatar: bool,
    #[serde(default)]
    pub is_lottie: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub display_name: String,
    pub vcard: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionMessage {
    pub key: MessageKey,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_timestamp_ms: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemeralMessage {
    pub message: Box<MessageContent>,
}

/// The `message` object of a WhatsApp message. At most one content field is
/// normally set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_context_info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_text_message: Option<ExtendedTextMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_message: Option<ImageMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_message: Option<AudioMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_message: Option<VideoMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_message: Option<DocumentMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker_message: Option<StickerMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_message: Option<ContactMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_message: Option<ReactionMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_message: Option<EphemeralMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons_message: Option<Value>,
}

impl MessageContent {
    /// Plain text of the message, looking through ephemeral wrappers and
    /// media captions.
    pub fn text(&self) -> Option<&str> {
        if let Some(text) = self.conversation.as_deref() {
            return Some(text);
        }
        if let Some(ext) = &self.extended_text_message {
            return Some(&ext.text);
        }
        if let Some(eph) = &self.ephemeral_message {
            return eph.message.text();
        }
        self.image_message
            .as_ref()
            .and_then(|m| m.caption.as_deref())
            .or_else(|| self.video_message.as_ref().and_then(|m| m.caption.as_deref()))
            .or_else(|| self.document_message.as_ref().and_then(|m| m.caption.as_deref()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageUpdate {
    pub status: MessageUpdateStatus,
}

// ---------------------------------------------------------------------------
// Send responses
// ---------------------------------------------------------------------------

/// Echo of a message accepted for delivery by any `message/send*` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub key: MessageKey,
    #[serde(default)]
    pub message: Option<MessageContent>,
    #[serde(default)]
    pub message_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Send Contact
// ---------------------------------------------------------------------------

/// Options shared by every send endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOptions {
    /// Milliseconds to show "typing…" before sending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions_every_one: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentioned: Option<Vec<String>>,
    /// Message to reply to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted: Option<Value>,
}

/// One contact card to share.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCard {
    pub full_name: String,
    /// WhatsApp user id (digits only).
    pub wuid: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ContactCard {
    /// Card with the WUID derived from the digits of `phone_number`.
    pub fn new(full_name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        let phone_number = phone_number.into();
        let wuid = phone_number.chars().filter(char::is_ascii_digit).collect();
        Self {
            full_name: full_name.into(),
            wuid,
            phone_number,
            organization: None,
            email: None,
            url: None,
        }
    }

    /// The vCard 3.0 text WhatsApp renders for this card.
    pub fn to_vcard(&self) -> String {
        let mut lines = vec![
            "BEGIN:VCARD".to_owned(),
            "VERSION:3.0".to_owned(),
            format!("N:{}", self.full_name),
            format!("FN:{}", self.full_name),
        ];
        if let Some(org) = &self.organization {
            lines.push(format!("ORG:{org};"));
        }
        if let Some(email) = &self.email {
            lines.push(format!("EMAIL:{email}"));
        }
        if let Some(url) = &self.url {
            lines.push(format!("URL:{url}"));
        }
        lines.push(format!(
            "TEL;type=CELL;type=VOICE;waid={}:{}",
            self.wuid, self.phone_number
        ));
        lines.push("END:VCARD".to_owned());
        lines.join("\n")
    }
}

/// Request body for `POST /message/sendContact/{instance}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendContactRequest {
    /// Recipient number or JID.
    pub number: String,
    pub contact: Vec<ContactCard>,
    #[serde(flatten)]
    pub options: SendOptions,
}

// ---------------------------------------------------------------------------
// Send Media (multipart)
// ---------------------------------------------------------------------------

/// Kind of media for `POST /message/sendMedia/{instance}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
        }
    }
}

/// A file uploaded as multipart form data.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub number: String,
    pub media_type: MediaType,
    pub file_name: String,
    pub mime_type: String,
    pub data: bytes::Bytes,
    pub caption: Option<String>,
    pub delay: Option<u64>,
}

impl MediaUpload {
    pub fn new(
        number: impl Into<String>,
        media_type: MediaType,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<bytes::Bytes>,
    ) -> Self {
        Self {
            number: number.into(),
            media_type,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
            caption: None,
            delay: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}
