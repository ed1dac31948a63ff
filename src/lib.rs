//! # evolution-rs
//!
//! A Rust client library for the [Evolution API](https://doc.evolution-api.com/)
//! WhatsApp gateway.
//!
//! ## Quick Start
//!
//! ```no_run
//! use evolution_rs::EvolutionClient;
//!
//! #[tokio::main]
//! async fn main() -> evolution_rs::Result<()> {
//!     let client = EvolutionClient::new("http://localhost:8080", "global-api-key")?
//!         .with_instance("support-line");
//!     let state = client.connection_state("support-line").await?;
//!     println!("{:?}", state.instance.state);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every failed call returns an [`EvolutionError`]. Gateway and transport
//! failures are normalized into [`ApiError`], whose message is extracted from
//! whichever of the gateway's error shapes came back (see [`extract`]).

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod request;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::EvolutionClient;
pub use config::ClientConfig;
/// Re-export the error types and Result alias.
pub use error::{ApiError, ErrorKind, EvolutionError, Result};
pub use request::{Body, FormData, RequestOptions};
pub use reqwest::Method;
