//! Dispatcher tests against an in-process mock gateway.
//!
//! Each test starts an `axum` server on a random local port that records every
//! request it receives and answers with a canned status and body. The client
//! under test talks to it over real HTTP.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use evolution_rs::types::instance::{FetchInstancesQuery, StatusResponse};
use evolution_rs::types::messages::{MediaType, MediaUpload};
use evolution_rs::types::ConnectionState;
use evolution_rs::{ClientConfig, ErrorKind, EvolutionClient, EvolutionError, RequestOptions};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

#[derive(Clone)]
struct Gateway {
    status: StatusCode,
    body: String,
    log: Arc<Mutex<Vec<Captured>>>,
}

async fn record(
    State(gateway): State<Gateway>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    gateway.log.lock().unwrap().push(Captured {
        method,
        uri,
        headers,
        body,
    });
    (
        gateway.status,
        [(header::CONTENT_TYPE, "application/json")],
        gateway.body.clone(),
    )
}

/// Start a gateway answering every request with `status` and `body`.
/// Returns its base URL and the request log.
async fn spawn_gateway(status: u16, body: &str) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let gateway = Gateway {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_owned(),
        log: Arc::clone(&log),
    };
    let app = Router::new().fallback(record).with_state(gateway);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), log)
}

fn only_request(log: &Arc<Mutex<Vec<Captured>>>) -> Captured {
    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1, "expected exactly one request, got {}", log.len());
    log[0].clone()
}

// ===================================================================
// Instance scoping
// ===================================================================

#[tokio::test]
async fn scoped_call_without_instance_fails_before_network() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    let err = client
        .get::<Value>("chat/findChats", RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, EvolutionError::Configuration(_)), "got {err:?}");
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn set_instance_routes_subsequent_calls() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let mut client = EvolutionClient::new(&base, "key").unwrap();
    client.set_instance("X");

    let _: Value = client
        .get("chat/findChats", RequestOptions::new())
        .await
        .unwrap();

    let req = only_request(&log);
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.uri.path(), "/chat/findChats/X/");
}

#[tokio::test]
async fn override_instance_wins_without_changing_scope() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let client = EvolutionClient::new(&base, "key")
        .unwrap()
        .with_instance("default");

    let _: Value = client
        .post("chat/findChats", RequestOptions::new().instance("other"))
        .await
        .unwrap();

    assert_eq!(only_request(&log).uri.path(), "/chat/findChats/other/");
    assert_eq!(client.instance(), Some("default"));
}

#[tokio::test]
async fn blank_instances_count_as_unset() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let mut client = EvolutionClient::new(&base, "key").unwrap();
    client.set_instance("");

    let err = client
        .get::<Value>("chat/findChats", RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, EvolutionError::Configuration(_)), "got {err:?}");

    let err = client
        .get::<Value>("chat/findChats", RequestOptions::new().instance("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, EvolutionError::Configuration(_)), "got {err:?}");

    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn blank_override_falls_back_to_default_instance() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let client = EvolutionClient::new(&base, "key")
        .unwrap()
        .with_instance("demo");

    let _: Value = client
        .get("chat/findChats", RequestOptions::new().instance(""))
        .await
        .unwrap();

    assert_eq!(only_request(&log).uri.path(), "/chat/findChats/demo/");
}

#[tokio::test]
async fn global_call_has_no_instance_segment() {
    let (base, log) = spawn_gateway(200, "[]").await;
    let client = EvolutionClient::new(&base, "key")
        .unwrap()
        .with_instance("ignored");

    let instances = client
        .fetch_instances(&FetchInstancesQuery::default())
        .await
        .unwrap();

    assert!(instances.is_empty());
    let req = only_request(&log);
    assert_eq!(req.uri.path(), "/instance/fetchInstances/");
    assert_eq!(req.uri.query(), None);
}

#[tokio::test]
async fn instance_names_are_a_single_encoded_segment() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    let _: Value = client
        .get("settings/find", RequestOptions::new().instance("sales team/br"))
        .await
        .unwrap();

    assert_eq!(only_request(&log).uri.path(), "/settings/find/sales%20team%2Fbr/");
}

#[tokio::test]
async fn server_url_path_is_kept_as_prefix() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let client = EvolutionClient::new(&format!("{base}/evolution/"), "key")
        .unwrap()
        .with_instance("demo");

    let _: Value = client
        .get("settings/find", RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(only_request(&log).uri.path(), "/evolution/settings/find/demo/");
}

// ===================================================================
// Headers, query and body
// ===================================================================

#[tokio::test]
async fn api_key_and_header_precedence() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let config = ClientConfig::new(&base, "secret-key")
        .unwrap()
        .with_instance("demo")
        .with_header("x-source", "crm")
        .with_header("x-trace", "client");
    let client = EvolutionClient::from_config(config).unwrap();

    let _: Value = client
        .post(
            "message/sendText",
            RequestOptions::new()
                .header("x-trace", "call")
                .header("apikey", "spoofed")
                .json(&json!({ "number": "5511999999999", "text": "hi" }))
                .unwrap(),
        )
        .await
        .unwrap();

    let req = only_request(&log);
    assert_eq!(req.headers["apikey"], "secret-key");
    assert_eq!(req.headers["x-source"], "crm");
    assert_eq!(req.headers["x-trace"], "call");
    assert_eq!(req.headers[header::CONTENT_TYPE], "application/json");
    let body: Value = serde_json::from_slice(&req.body).unwrap();
    assert_eq!(body, json!({ "number": "5511999999999", "text": "hi" }));
}

#[tokio::test]
async fn json_body_sends_a_single_content_type() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let client = EvolutionClient::new(&base, "key").unwrap().with_instance("demo");

    let _: Value = client
        .post(
            "message/sendText",
            RequestOptions::new()
                .header("Content-Type", "text/plain")
                .json(&json!({ "text": "hi" }))
                .unwrap(),
        )
        .await
        .unwrap();

    let req = only_request(&log);
    let values: Vec<_> = req.headers.get_all(header::CONTENT_TYPE).iter().collect();
    assert_eq!(values, ["application/json"]);
}

#[tokio::test]
async fn null_json_body_is_not_sent() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let client = EvolutionClient::new(&base, "key").unwrap().with_instance("demo");

    let options = RequestOptions::new().json(&None::<Value>).unwrap();
    assert!(options.body().is_none());
    let _: Value = client.post("instance/restart", options).await.unwrap();

    let req = only_request(&log);
    assert!(req.body.is_empty());
    assert!(req.headers.get(header::CONTENT_TYPE).is_none());
}

#[tokio::test]
async fn falsy_query_values_are_dropped() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    let _: Value = client
        .get(
            "instance/fetchInstances",
            RequestOptions::new()
                .global()
                .query("instanceName", "demo")
                .query("page", 2)
                .query("instanceId", "")
                .query("archived", false)
                .query("offset", 0)
                .query("owner", Value::Null),
        )
        .await
        .unwrap();

    assert_eq!(
        only_request(&log).uri.query(),
        Some("instanceName=demo&page=2")
    );
}

#[tokio::test]
async fn media_upload_is_sent_as_multipart() {
    let body = r#"{"key":{"remoteJid":"5511999999999@s.whatsapp.net","fromMe":true,"id":"ABC123"},"status":"PENDING"}"#;
    let (base, log) = spawn_gateway(201, body).await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    let upload = MediaUpload::new(
        "5511999999999",
        MediaType::Image,
        "photo.png",
        "image/png",
        &b"\x89PNG-fake-bytes"[..],
    )
    .caption("look");
    let sent = client.send_media_file(upload, Some("demo")).await.unwrap();
    assert_eq!(sent.key.id, "ABC123");

    let req = only_request(&log);
    assert_eq!(req.uri.path(), "/message/sendMedia/demo/");
    let content_type = req.headers[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="), "{content_type}");
    let raw = String::from_utf8_lossy(&req.body);
    assert!(raw.contains("name=\"mediatype\""));
    assert!(raw.contains("filename=\"photo.png\""));
    assert!(raw.contains("PNG-fake-bytes"));
}

// ===================================================================
// Success decoding
// ===================================================================

#[tokio::test]
async fn success_body_is_decoded() {
    let (base, _log) = spawn_gateway(
        200,
        r#"{"instance":{"instanceName":"demo","state":"open"}}"#,
    )
    .await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    let state = client.connection_state("demo").await.unwrap();
    assert_eq!(state.instance.instance_name, "demo");
    assert_eq!(state.instance.state, ConnectionState::Open);
}

#[tokio::test]
async fn falsy_error_field_is_not_a_failure() {
    let (base, _log) = spawn_gateway(
        200,
        r#"{"status":"SUCCESS","error":false,"response":{"message":"Instance deleted"}}"#,
    )
    .await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    let resp: StatusResponse = client.delete_instance("demo").await.unwrap();
    assert!(!resp.error);
    assert_eq!(resp.message(), Some("Instance deleted"));
}

#[tokio::test]
async fn null_body_decodes_to_none() {
    let (base, _log) = spawn_gateway(200, "null").await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    assert!(client.find_webhook(Some("demo")).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_instance_name_is_rejected() {
    let (base, log) = spawn_gateway(200, "{}").await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    let err = client.connect_instance(" ").await.unwrap_err();
    assert!(matches!(err, EvolutionError::InvalidArgument(_)));
    assert!(log.lock().unwrap().is_empty());
}

// ===================================================================
// Failures
// ===================================================================

#[tokio::test]
async fn server_error_reports_nested_message_and_status() {
    let (base, _log) = spawn_gateway(500, r#"{"response":{"error":"boom"}}"#).await;
    let client = EvolutionClient::new(&base, "key").unwrap().with_instance("demo");

    let err = client
        .post::<Value>("message/sendText", RequestOptions::new())
        .await
        .unwrap_err();

    let api = err.as_api().expect("normalized error");
    assert_eq!(api.message(), "boom");
    assert_eq!(api.status_code(), Some(500));
    assert_eq!(api.kind(), ErrorKind::Upstream);
    let details = api.details().unwrap();
    assert!(details["url"].as_str().unwrap().ends_with("/message/sendText/demo/"));
    assert_eq!(details["method"], "POST");
}

#[tokio::test]
async fn bad_request_envelope_renders_diagnostics() {
    let body = json!({
        "status": 400,
        "error": "Bad Request",
        "response": { "message": ["Instance \"demo\" does not exist"] }
    });
    let (base, _log) = spawn_gateway(400, &body.to_string()).await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    let err = client
        .post::<Value>(
            "message/sendText",
            RequestOptions::new()
                .instance("demo")
                .query("debug", true)
                .json(&json!({ "number": "5511" }))
                .unwrap(),
        )
        .await
        .unwrap_err();
    let api = err.as_api().unwrap();

    assert_eq!(api.message(), "Instance \"demo\" does not exist");
    let details = api.details().unwrap();
    assert_eq!(details["params"], "debug=true");
    assert_eq!(details["body"], r#"{"number":"5511"}"#);
    assert_eq!(details["response"], body);

    let rendered = api.render();
    assert!(rendered.starts_with("EvolutionApiError: Instance \"demo\" does not exist (400)"));
    assert!(rendered.contains("\n  Method: POST"));
    assert!(rendered.contains("\n  Server Error: Bad Request"));
}

#[tokio::test]
async fn error_field_on_success_status_is_a_failure() {
    let (base, _log) = spawn_gateway(
        200,
        r#"{"error":"Unauthorized","response":{"message":["Forbidden for this instance"]}}"#,
    )
    .await;
    let client = EvolutionClient::new(&base, "key").unwrap().with_instance("demo");

    let err = client
        .get::<Value>("chat/findChats", RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Forbidden for this instance");
    assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn top_level_error_shapes_are_extracted() {
    let cases = [
        (400, json!({ "message": "Invalid number" }), "Invalid number"),
        (400, json!({ "message": ["Number is required"] }), "Number is required"),
        (400, json!({ "detail": "bad detail" }), "bad detail"),
        (
            422,
            json!({ "validation": [{ "message": "a" }, { "error": "b" }] }),
            "Validation error: a, b",
        ),
        (500, json!({ "data": { "error": "session crashed" } }), "session crashed"),
        (401, json!({ "errors": ["Unauthorized key"] }), "Unauthorized key"),
    ];

    for (status, body, expected) in cases {
        let (base, _log) = spawn_gateway(status, &body.to_string()).await;
        let client = EvolutionClient::new(&base, "key").unwrap().with_instance("demo");

        let err = client
            .post::<Value>("message/sendText", RequestOptions::new())
            .await
            .unwrap_err();
        let api = err.as_api().unwrap();
        assert_eq!(api.message(), expected, "body {body}");
        assert_eq!(api.status_code(), Some(status));
        assert_eq!(api.details().unwrap()["response"], body);
    }
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_text() {
    let (base, _log) = spawn_gateway(404, "").await;
    let client = EvolutionClient::new(&base, "key").unwrap().with_instance("demo");

    let err = client
        .get::<Value>("webhook/find", RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "404: Not Found");
}

#[tokio::test]
async fn non_json_error_page_is_kept_as_text() {
    let (base, _log) = spawn_gateway(502, "<html>bad gateway</html>").await;
    let client = EvolutionClient::new(&base, "key").unwrap().with_instance("demo");

    let err = client
        .get::<Value>("webhook/find", RequestOptions::new())
        .await
        .unwrap_err();
    let api = err.as_api().unwrap();
    assert_eq!(api.kind(), ErrorKind::Upstream);
    assert_eq!(api.status_code(), Some(502));
    assert_eq!(api.message(), "502: Bad Gateway");
    assert_eq!(api.details().unwrap()["response"], "<html>bad gateway</html>");
}

#[tokio::test]
async fn unparseable_success_body_is_a_transport_error() {
    let (base, _log) = spawn_gateway(200, "not json").await;
    let client = EvolutionClient::new(&base, "key").unwrap().with_instance("demo");

    let err = client
        .get::<Value>("webhook/find", RequestOptions::new())
        .await
        .unwrap_err();
    let api = err.as_api().unwrap();
    assert_eq!(api.kind(), ErrorKind::Transport);
    assert_eq!(api.status_code(), None);
    assert!(std::error::Error::source(api).is_some());
}

#[tokio::test]
async fn mismatched_success_shape_is_a_transport_error() {
    let (base, _log) = spawn_gateway(200, r#"{"unexpected":true}"#).await;
    let client = EvolutionClient::new(&base, "key").unwrap();

    let err = client.connection_state("demo").await.unwrap_err();
    assert_eq!(err.as_api().unwrap().kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EvolutionClient::new(&format!("http://{addr}"), "key")
        .unwrap()
        .with_instance("demo");
    let err = client
        .get::<Value>("settings/find", RequestOptions::new())
        .await
        .unwrap_err();

    let api = err.as_api().unwrap();
    assert_eq!(api.kind(), ErrorKind::Transport);
    assert!(!api.message().is_empty());
    assert_eq!(api.details().unwrap()["method"], "GET");
    assert!(std::error::Error::source(api).is_some());
}

#[tokio::test]
async fn invalid_server_urls_are_rejected() {
    assert!(matches!(
        EvolutionClient::new("not a url", "key"),
        Err(EvolutionError::Url(_))
    ));
    assert!(matches!(
        EvolutionClient::new("mailto:ops@example.com", "key"),
        Err(EvolutionError::Configuration(_))
    ));
}
