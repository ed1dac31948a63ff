//! Constants for the Evolution API.
//!
//! Contains the authentication header name, environment variable names used
//! by [`ClientConfig::from_env`](crate::config::ClientConfig::from_env), and the
//! route table used by the [`crate::api`] modules. Routes are relative to the
//! server URL; instance-scoped routes get the instance appended as a path
//! segment by the dispatcher.

/// Request header carrying the API key on every call.
pub const API_KEY_HEADER: &str = "apikey";

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Environment variables read by `ClientConfig::from_env`.
pub mod env {
    /// Base URL of the gateway (e.g. `http://localhost:8080`).
    pub const SERVER_URL: &str = "EVOLUTION_SERVER_URL";
    /// Global or instance API key.
    pub const API_KEY: &str = "EVOLUTION_API_KEY";
    /// Optional default instance scope.
    pub const INSTANCE: &str = "EVOLUTION_INSTANCE";
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// Endpoint paths, grouped by upstream controller.
pub mod routes {
    /// Instance lifecycle.
    pub mod instance {
        pub const CREATE: &str = "instance/create";
        pub const CONNECT: &str = "instance/connect";
        pub const CONNECTION_STATE: &str = "instance/connectionState";
        pub const LOGOUT: &str = "instance/logout";
        pub const DELETE: &str = "instance/delete";
        pub const RESTART: &str = "instance/restart";
        pub const FETCH_ALL: &str = "instance/fetchInstances";
        pub const SET_PRESENCE: &str = "instance/setPresence";
    }

    /// Per-instance behaviour settings.
    pub mod settings {
        pub const SET: &str = "settings/set";
        pub const FIND: &str = "settings/find";
    }

    /// Outbound webhook configuration.
    pub mod webhook {
        pub const SET: &str = "webhook/set";
        pub const FIND: &str = "webhook/find";
    }

    /// Chat queries and presence.
    pub mod chats {
        pub const FIND_MESSAGES: &str = "chat/findMessages";
        pub const GET_BASE64_FROM_MEDIA_MESSAGE: &str = "chat/getBase64FromMediaMessage";
        pub const SEND_PRESENCE: &str = "chat/sendPresence";
    }

    /// Outgoing messages.
    pub mod messages {
        pub const SEND_CONTACT: &str = "message/sendContact";
        pub const SEND_MEDIA: &str = "message/sendMedia";
    }
}
