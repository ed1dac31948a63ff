//! REST API endpoint implementations.
//!
//! Each sub-module adds high-level `async` methods to
//! [`EvolutionClient`](crate::client::EvolutionClient) via `impl` blocks. All
//! methods handle JSON serialization, instance scoping, HTTP transport, and
//! error normalization automatically.
//!
//! Instance-scoped methods take an `instance: Option<&str>` argument: `Some`
//! targets that instance for this call only, `None` falls back to the client's
//! default instance. The instance-management methods take the instance name
//! explicitly.
//!
//! ## Usage
//!
//! ```no_run
//! use evolution_rs::EvolutionClient;
//! use evolution_rs::types::chats::FindMessagesRequest;
//!
//! # #[tokio::main]
//! # async fn main() -> evolution_rs::Result<()> {
//! let client = EvolutionClient::new("http://localhost:8080", "global-api-key")?
//!     .with_instance("support-line");
//! let settings = client.find_settings(None).await?;
//! let history = client
//!     .find_messages(&FindMessagesRequest::for_chat("5511999999999@s.whatsapp.net"), Some("sales"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Endpoints | Description |
//! |---|---|---|
//! | [`instance`] | 8 | Create, connect, state, logout, delete, restart, list, presence |
//! | [`settings`] | 2 | Behaviour switches |
//! | [`webhook`] | 2 | Webhook configuration |
//! | [`chats`] | 3 | Message search, media download, typing indicator |
//! | [`messages`] | 2 | Contact cards, media upload |

pub mod chats;
pub mod instance;
pub mod messages;
pub mod settings;
pub mod webhook;
