use super::*;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::upstream::ChikuApi;
use crate::upstream::types::{UpstreamError, UpstreamReply};

struct ScriptedApi {
    reply: Mutex<Option<Result<UpstreamReply, UpstreamError>>>,
    captured: Mutex<Vec<String>>,
}

impl ScriptedApi {
    fn new(reply: Result<UpstreamReply, UpstreamError>) -> Arc<Self> {
        Arc::new(Self { reply: Mutex::new(Some(reply)), captured: Mutex::new(Vec::new()) })
    }
}

#[async_trait::async_trait]
impl ChikuApi for ScriptedApi {
    async fn ask(&self, message: &str) -> Result<UpstreamReply, UpstreamError> {
        self.captured.lock().unwrap().push(message.to_string());
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(UpstreamReply::default()))
    }
}

fn test_app(api: Arc<ScriptedApi>) -> Router {
    app(AppState::new(api, 2000))
}

fn post_chat(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(CHAT_ROUTE)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://chiku.example")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// success
// =============================================================================

#[tokio::test]
async fn chat_returns_answer() {
    let api = ScriptedApi::new(Ok(UpstreamReply { answer: Some("Hi!".into()) }));
    let response = test_app(api.clone())
        .oneshot(post_chat(json!({ "message": "User: Hello" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    assert_eq!(json_body(response).await, json!({ "answer": "Hi!" }));
    assert_eq!(*api.captured.lock().unwrap(), vec!["User: Hello".to_string()]);
}

#[tokio::test]
async fn chat_non_string_answer_returns_fallback() {
    let api = ScriptedApi::new(Ok(UpstreamReply { answer: Some(json!(42)) }));
    let response = test_app(api)
        .oneshot(post_chat(json!({ "message": "User: Hello" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "answer": crate::services::relay::FALLBACK_ANSWER })
    );
}

#[tokio::test]
async fn chat_missing_answer_returns_fallback() {
    let api = ScriptedApi::new(Ok(UpstreamReply { answer: None }));
    let response = test_app(api)
        .oneshot(post_chat(json!({ "message": "User: Hello" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "answer": crate::services::relay::FALLBACK_ANSWER })
    );
}

// =============================================================================
// client errors
// =============================================================================

#[tokio::test]
async fn chat_without_message_is_bad_request() {
    let api = ScriptedApi::new(Ok(UpstreamReply::default()));
    let response = test_app(api.clone())
        .oneshot(post_chat(json!({}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Message is required" }));
    assert!(api.captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn chat_with_empty_message_is_bad_request() {
    let api = ScriptedApi::new(Ok(UpstreamReply::default()));
    let response = test_app(api)
        .oneshot(post_chat(json!({ "message": "" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_with_non_string_message_is_missing_message() {
    for message in [json!(123), json!(null), json!(["User: hi"]), json!({ "text": "hi" })] {
        let api = ScriptedApi::new(Ok(UpstreamReply::default()));
        let response = test_app(api.clone())
            .oneshot(post_chat(json!({ "message": message }).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({ "error": "Message is required" }));
        assert!(api.captured.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn chat_with_malformed_json_is_bad_request() {
    let api = ScriptedApi::new(Ok(UpstreamReply::default()));
    let response = test_app(api)
        .oneshot(post_chat("{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

// =============================================================================
// upstream errors
// =============================================================================

#[tokio::test]
async fn upstream_failure_is_server_error_with_message() {
    let api = ScriptedApi::new(Err(UpstreamError::Status { status: 503 }));
    let response = test_app(api)
        .oneshot(post_chat(json!({ "message": "User: Hello" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": "Chiku API returned 503" }));
}

#[test]
fn relay_error_to_status_maps_kinds() {
    use crate::services::relay::RelayError;
    assert_eq!(chat::relay_error_to_status(&RelayError::MissingMessage), StatusCode::BAD_REQUEST);
    assert_eq!(chat::relay_error_to_status(&RelayError::InvalidBody("x".into())), StatusCode::BAD_REQUEST);
    assert_eq!(
        chat::relay_error_to_status(&RelayError::Upstream(UpstreamError::Parse("x".into()))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

// =============================================================================
// CORS and health
// =============================================================================

#[tokio::test]
async fn bare_options_is_empty_success() {
    let api = ScriptedApi::new(Ok(UpstreamReply::default()));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(CHAT_ROUTE)
        .header(header::ORIGIN, "https://chiku.example")
        .body(Body::empty())
        .unwrap();
    let response = test_app(api).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let api = ScriptedApi::new(Ok(UpstreamReply::default()));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(CHAT_ROUTE)
        .header(header::ORIGIN, "https://chiku.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization, x-client-info, apikey, content-type")
        .body(Body::empty())
        .unwrap();
    let response = test_app(api).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
}

#[tokio::test]
async fn healthz_is_ok() {
    let api = ScriptedApi::new(Ok(UpstreamReply::default()));
    let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let response = test_app(api).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
