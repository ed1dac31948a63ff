//! Integration tests against a running Evolution API gateway.
//!
//! # Running
//!
//! These tests need a reachable gateway and its global API key:
//!
//! ```sh
//! export EVOLUTION_SERVER_URL="http://localhost:8080"
//! export EVOLUTION_API_KEY="your-global-api-key"
//! export EVOLUTION_INSTANCE="an-existing-instance"
//! cargo test --test live -- --nocapture
//! ```
//!
//! Without `EVOLUTION_SERVER_URL` and `EVOLUTION_API_KEY`, every test is
//! silently skipped. Tests that need an instance also skip when
//! `EVOLUTION_INSTANCE` is unset. Nothing here creates, deletes or logs out
//! an instance, and no messages are sent.

use evolution_rs::types::chats::FindMessagesRequest;
use evolution_rs::types::instance::FetchInstancesQuery;
use evolution_rs::{ErrorKind, EvolutionClient};

/// Helper: create a client from the environment or skip the test.
fn live_client() -> Option<EvolutionClient> {
    EvolutionClient::from_env().ok()
}

/// Macro to skip a test when the gateway is not configured.
macro_rules! require_client {
    () => {
        match live_client() {
            Some(c) => c,
            None => {
                eprintln!("⏭  Skipped (EVOLUTION_SERVER_URL / EVOLUTION_API_KEY not set)");
                return;
            }
        }
    };
    (instance) => {{
        let client = require_client!();
        match client.instance().map(str::to_owned) {
            Some(name) => (client, name),
            None => {
                eprintln!("⏭  Skipped (EVOLUTION_INSTANCE not set)");
                return;
            }
        }
    }};
}

// ===================================================================
// Instances
// ===================================================================

#[tokio::test]
async fn test_fetch_instances() {
    let client = require_client!();
    let instances = client
        .fetch_instances(&FetchInstancesQuery::default())
        .await
        .expect("fetch_instances failed");
    println!("✔ Instances: {}", instances.len());
}

#[tokio::test]
async fn test_connection_state() {
    let (client, name) = require_client!(instance);
    let state = client
        .connection_state(&name)
        .await
        .expect("connection_state failed");
    assert_eq!(state.instance.instance_name, name);
    println!("✔ Connection state: {:?}", state.instance.state);
}

#[tokio::test]
async fn test_fetch_single_instance() {
    let (client, name) = require_client!(instance);
    let query = FetchInstancesQuery {
        instance_name: Some(name.clone()),
        ..Default::default()
    };
    let instances = client
        .fetch_instances(&query)
        .await
        .expect("fetch_instances failed");
    assert!(instances.iter().any(|i| i.name == name));
}

// ===================================================================
// Settings & Webhook
// ===================================================================

#[tokio::test]
async fn test_find_settings() {
    let (client, _) = require_client!(instance);
    let settings = client.find_settings(None).await.expect("find_settings failed");
    println!(
        "✔ Settings: reject_call={}, always_online={}",
        settings.reject_call, settings.always_online
    );
}

#[tokio::test]
async fn test_find_webhook() {
    let (client, _) = require_client!(instance);
    match client.find_webhook(None).await.expect("find_webhook failed") {
        Some(hook) => println!("✔ Webhook: enabled={:?} url={:?}", hook.enabled, hook.url),
        None => println!("✔ Webhook: none configured"),
    }
}

// ===================================================================
// Chats
// ===================================================================

#[tokio::test]
async fn test_find_messages() {
    let (client, _) = require_client!(instance);
    let req = FindMessagesRequest::default();
    let found = client
        .find_messages(&req, None)
        .await
        .expect("find_messages failed");
    println!("✔ Messages: {} stored", found.messages.total);
}

// ===================================================================
// Error handling
// ===================================================================

#[tokio::test]
async fn test_unknown_instance_is_an_upstream_error() {
    let client = require_client!();
    let err = client
        .connection_state("evolution-rs-no-such-instance")
        .await
        .expect_err("unknown instance should fail");

    let api = err.as_api().expect("expected a normalized gateway error");
    assert_eq!(api.kind(), ErrorKind::Upstream);
    assert!(api.status_code().is_some_and(|s| s >= 400));
    assert!(!api.message().is_empty());
    println!("✔ Error rendered as:\n{api:#}");
}

#[tokio::test]
async fn test_bad_api_key_is_rejected() {
    let client = require_client!();
    let bad = EvolutionClient::new(client.server_url().as_str(), "definitely-not-the-key")
        .expect("client");
    let err = bad
        .fetch_instances(&FetchInstancesQuery::default())
        .await
        .expect_err("bad API key should fail");
    assert_eq!(err.status_code(), Some(401));
    println!("✔ Bad key: {err}");
}
