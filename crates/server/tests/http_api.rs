//! Router tests driven through `tower::ServiceExt::oneshot`

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::Engine;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use voice_shop_agent::{AssistantConfig, ShoppingAssistant};
use voice_shop_config::{default_catalog, Settings};
use voice_shop_core::{RecognitionFailure, SpeechToText};
use voice_shop_persistence::InMemoryStore;
use voice_shop_server::{create_router, init_metrics, AppState};

/// Treats the audio bytes as UTF-8 text
struct EchoStt;

#[async_trait]
impl SpeechToText for EchoStt {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, RecognitionFailure> {
        match std::str::from_utf8(audio) {
            Ok(text) if !text.trim().is_empty() => Ok(text.to_lowercase()),
            _ => Err(RecognitionFailure::Unintelligible),
        }
    }

    fn name(&self) -> &str {
        "echo"
    }
}

async fn app_state() -> AppState {
    let assistant = ShoppingAssistant::open(
        Arc::new(InMemoryStore::new()),
        default_catalog(),
        AssistantConfig::default(),
    )
    .await
    .unwrap();
    AppState::new(Settings::default(), assistant)
}

async fn app() -> Router {
    create_router(app_state().await)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn audio(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text)
}

#[tokio::test]
async fn test_text_command_round_trip() {
    let app = app().await;

    let (status, body) = send(
        &app,
        post_json("/api/text-command/alice", json!({ "command": "add two milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("Added 2 milk to your shopping list."));

    let (status, body) = send(&app, get("/api/shopping-list/alice")).await;
    assert_eq!(status, StatusCode::OK);
    let list = body["shopping_list"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "milk");
    assert_eq!(list[0]["quantity"], 2);
    assert_eq!(list[0]["category"], "dairy");
}

#[tokio::test]
async fn test_empty_command() {
    let app = app().await;
    let (status, body) = send(
        &app,
        post_json("/api/text-command/alice", json!({ "command": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Please provide a command.");
}

#[tokio::test]
async fn test_clear_list() {
    let app = app().await;
    send(
        &app,
        post_json("/api/text-command/bob", json!({ "command": "add bread" })),
    )
    .await;

    let (status, body) = send(&app, post_json("/api/clear-list/bob", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Shopping list cleared.");

    let (_, body) = send(&app, get("/api/shopping-list/bob")).await;
    assert!(body["shopping_list"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sessions_are_unique() {
    let app = app().await;
    let (status, first) = send(&app, post_json("/api/sessions", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send(&app, post_json("/api/sessions", json!({}))).await;

    let first = first["user_id"].as_str().unwrap();
    assert_eq!(first.len(), 36);
    assert_ne!(first, second["user_id"].as_str().unwrap());
}

#[tokio::test]
async fn test_voice_command() {
    let app = create_router(app_state().await.with_stt(Arc::new(EchoStt)));

    let (status, body) = send(
        &app,
        post_json("/api/voice-command/carol", json!({ "audio": audio("Add 3 apples") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("Added 3 apples"));

    let (status, body) = send(
        &app,
        post_json("/api/voice-command/carol", json!({ "audio": audio("  ") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["response"],
        "Sorry, I didn't catch that. Please try again."
    );

    let (status, _) = send(
        &app,
        post_json("/api/voice-command/carol", json!({ "audio": "%%not base64%%" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_voice_command_without_stt() {
    let app = app().await;
    let (status, body) = send(
        &app,
        post_json("/api/voice-command/dave", json!({ "audio": audio("add milk") })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    send(
        &app,
        post_json("/api/text-command/erin", json!({ "command": "add eggs" })),
    )
    .await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["users"], 1);
    assert_eq!(body["voice_enabled"], false);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    init_metrics();
    let app = app().await;
    send(
        &app,
        post_json("/api/text-command/frank", json!({ "command": "add milk" })),
    )
    .await;

    let response = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("voice_shop_commands_total"));
}
