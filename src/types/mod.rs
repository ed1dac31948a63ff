//! Request and response types for the Evolution API.
//!
//! This module contains the strongly-typed structs used for serializing
//! requests and deserializing responses across the supported endpoints, plus
//! the webhook delivery envelope.
//!
//! ## Organization
//!
//! - [`enums`] — Shared enumerations (connection state, message type, events, etc.)
//! - [`instance`] — Instance create/connect/state/fetch types
//! - [`settings`] — Instance behaviour settings
//! - [`webhook`] — Webhook configuration and delivery payloads
//! - [`chats`] — Message search, base64 media, presence
//! - [`messages`] — Message keys, content variants, send requests
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod chats;
pub mod enums;
pub mod instance;
pub mod messages;
pub mod settings;
pub mod webhook;

pub use enums::*;
