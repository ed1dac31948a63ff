//! Tests for `ApiError` construction, rendering and the structured log form.

use evolution_rs::error::{API_ERROR_NAME, UNKNOWN_ERROR_MESSAGE};
use evolution_rs::{ApiError, ErrorKind, EvolutionError};
use serde_json::json;

#[test]
fn message_comes_from_cause_when_available() {
    let err = ApiError::new(
        "fallback",
        Some(json!({ "response": { "error": "boom" } })),
        Some(500),
    );
    assert_eq!(err.message(), "boom");
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert_eq!(err.name(), API_ERROR_NAME);
    assert_eq!(err.details(), Some(&json!({ "response": { "error": "boom" } })));
}

#[test]
fn supplied_message_is_used_when_cause_has_none() {
    let err = ApiError::new("Instance not set", Some(json!({})), None);
    assert_eq!(err.message(), "Instance not set");

    let err = ApiError::new("no cause at all", None, None);
    assert_eq!(err.message(), "no cause at all");
}

#[test]
fn unknown_message_is_the_last_resort() {
    let err = ApiError::new("", Some(json!("   ")), None);
    assert_eq!(err.message(), UNKNOWN_ERROR_MESSAGE);
}

#[test]
fn display_is_the_message_and_alternate_is_the_full_render() {
    let err = ApiError::new(
        "fallback",
        Some(json!({
            "url": "http://localhost:8080/message/sendText/demo/",
            "method": "POST",
            "response": { "error": "boom", "message": "Something broke" }
        })),
        Some(500),
    );

    assert_eq!(err.to_string(), "boom");
    assert_eq!(
        err.render(),
        "EvolutionApiError: boom (500)\n  \
         URL: http://localhost:8080/message/sendText/demo/\n  \
         Method: POST\n  \
         Server Message: Something broke"
    );
    assert_eq!(format!("{err:#}"), err.render());
}

#[test]
fn render_without_details_is_a_single_line() {
    let err = ApiError::new("plain", None, None);
    assert_eq!(err.render(), "EvolutionApiError: plain");
}

#[test]
fn log_record_serializes_camel_case() {
    let err = ApiError::new("fallback", Some(json!({ "error": "bad" })), Some(422));
    let record = serde_json::to_value(err.log_record()).unwrap();

    assert_eq!(record["name"], "EvolutionApiError");
    assert_eq!(record["message"], "bad");
    assert_eq!(record["statusCode"], 422);
    assert_eq!(record["kind"], "upstream");
    assert_eq!(record["details"], json!({ "error": "bad" }));
    assert!(record["origin"].as_str().unwrap().contains("error.rs"));
    assert!(record.get("source").is_none());
}

#[test]
fn origin_points_at_the_raise_site() {
    let err = ApiError::new("here", None, None);
    assert!(err.origin().file().ends_with("error.rs"));
    assert!(err.origin().line() > 0);
}

#[test]
fn evolution_error_is_transparent_over_api_error() {
    let err: EvolutionError = ApiError::new("x", Some(json!({ "error": "denied" })), Some(401)).into();
    assert_eq!(err.to_string(), "denied");
    assert_eq!(err.status_code(), Some(401));
    assert!(err.as_api().is_some());

    let err = EvolutionError::Configuration("instance not set".into());
    assert_eq!(err.status_code(), None);
    assert!(err.as_api().is_none());
}
