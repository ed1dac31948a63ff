//! Instance lifecycle types — create, connect, state, fetch, presence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::enums::*;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Request body for creating an instance.
///
/// Used by `POST /instance/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    pub instance_name: String,
    /// Instance-level API key. Generated by the gateway when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Return a QR code immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qrcode: Option<bool>,
    /// Phone number for pairing-code login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration: Option<Integration>,
}

impl CreateInstanceRequest {
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            token: None,
            qrcode: None,
            number: None,
            integration: None,
        }
    }
}

/// Summary of a freshly created instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInstance {
    pub instance_name: String,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub integration: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response from `POST /instance/create`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceResponse {
    pub instance: CreatedInstance,
    /// Instance API key; a bare string or `{apikey}` depending on version.
    #[serde(default)]
    pub hash: Option<Value>,
    #[serde(default)]
    pub settings: Option<Value>,
    #[serde(default)]
    pub qrcode: Option<QrCode>,
}

// ---------------------------------------------------------------------------
// Connect
// ---------------------------------------------------------------------------

/// QR code or pairing code for linking a device.
///
/// Returned by `GET /instance/connect/{instance}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    #[serde(default)]
    pub pairing_code: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    /// Data URL of the QR image.
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
}

/// Alias matching the endpoint name.
pub type ConnectResponse = QrCode;

// ---------------------------------------------------------------------------
// Connection State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceState {
    pub instance_name: String,
    pub state: ConnectionState,
}

/// Returned by `GET /instance/connectionState/{instance}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionStateResponse {
    pub instance: InstanceState,
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Query filters for `GET /instance/fetchInstances`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchInstancesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

/// One entry of the instance listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceInfo {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub connection_status: Option<ConnectionState>,
    #[serde(default)]
    pub owner_jid: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub integration: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// Request body for `POST /instance/setPresence/{instance}`.
#[derive(Debug, Clone, Serialize)]
pub struct SetPresenceRequest {
    pub presence: InstancePresence,
}

// ---------------------------------------------------------------------------
// Generic status envelope
// ---------------------------------------------------------------------------

/// `{status, error, response: {message}}` envelope returned by logout,
/// delete, restart and presence endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub response: Option<Value>,
}

impl StatusResponse {
    /// `response.message` if it is a string.
    pub fn message(&self) -> Option<&str> {
        self.response.as_ref()?.get("message")?.as_str()
    }
}
