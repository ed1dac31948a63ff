//! Instance behaviour settings.

use serde::{Deserialize, Serialize};

/// Request body for `POST /settings/set/{instance}`.
///
/// The gateway requires the five boolean switches; the call-rejection message
/// and the WAVoIP token are optional.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_call: Option<bool>,
    /// Text sent to callers when `reject_call` is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_call: Option<String>,
    pub groups_ignore: bool,
    pub always_online: bool,
    pub read_messages: bool,
    pub read_status: bool,
    pub sync_full_history: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavoip_token: Option<String>,
}

/// Current settings, returned by `GET /settings/find/{instance}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub reject_call: bool,
    #[serde(default)]
    pub msg_call: Option<String>,
    #[serde(default)]
    pub groups_ignore: bool,
    #[serde(default)]
    pub always_online: bool,
    #[serde(default)]
    pub read_messages: bool,
    #[serde(default)]
    pub read_status: bool,
    #[serde(default)]
    pub sync_full_history: bool,
    #[serde(default)]
    pub wavoip_token: Option<String>,
}

/// Response from `POST /settings/set/{instance}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetSettingsResponse {
    #[serde(default)]
    pub message: Option<String>,
}
