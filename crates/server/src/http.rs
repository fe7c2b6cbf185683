//! HTTP Endpoints
//!
//! REST API for the shopping assistant.

use axum::{
    extract::{Json, Path, State},
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use voice_shop_core::LineItem;

use crate::metrics::metrics_handler;
use crate::state::AppState;
use crate::ServerError;

const EMPTY_COMMAND: &str = "Please provide a command.";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.settings.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.timeout_seconds);

    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/text-command/:user_id", post(text_command))
        .route("/api/voice-command/:user_id", post(voice_command))
        .route("/api/shopping-list/:user_id", get(shopping_list))
        .route("/api/clear-list/:user_id", post(clear_list))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// Disabled CORS is fully permissive. An empty or entirely invalid origin
/// list falls back to localhost:3000.
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let parsed_origins = if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to localhost:3000");
        vec![HeaderValue::from_static("http://localhost:3000")]
    } else {
        tracing::info!("CORS configured with {} origins", parsed_origins.len());
        parsed_origins
    };

    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TextCommandRequest {
    #[serde(default)]
    pub command: String,
}

#[derive(Debug, Deserialize)]
pub struct VoiceCommandRequest {
    /// Base64 encoded audio
    pub audio: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShoppingListResponse {
    pub shopping_list: Vec<LineItem>,
}

/// Issue a fresh user id
async fn create_session() -> Json<SessionResponse> {
    let user_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(user_id = %user_id, "Created session");
    Json(SessionResponse { user_id })
}

async fn text_command(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<TextCommandRequest>,
) -> Json<CommandResponse> {
    let command = request.command.trim();
    if command.is_empty() {
        return Json(CommandResponse {
            response: EMPTY_COMMAND.to_string(),
        });
    }

    let response = state.assistant.process_command(command, &user_id).await;
    Json(CommandResponse { response })
}

async fn voice_command(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<VoiceCommandRequest>,
) -> Result<Json<CommandResponse>, ServerError> {
    let stt = state.stt.as_ref().ok_or(ServerError::SpeechUnavailable)?;

    let audio = base64::engine::general_purpose::STANDARD
        .decode(request.audio.as_bytes())
        .map_err(|e| ServerError::InvalidRequest(format!("Invalid base64 audio: {}", e)))?;

    let response = state
        .assistant
        .process_audio(stt.as_ref(), &audio, &user_id)
        .await;
    Ok(Json(CommandResponse { response }))
}

async fn shopping_list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<ShoppingListResponse> {
    let shopping_list = state.assistant.shopping_list(&user_id).await;
    Json(ShoppingListResponse { shopping_list })
}

async fn clear_list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<CommandResponse> {
    let response = state.assistant.clear_list(&user_id).await;
    Json(CommandResponse { response })
}

/// Liveness check
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "users": state.assistant.user_count(),
        "products": state.assistant.catalog().product_count(),
        "voice_enabled": state.stt.is_some(),
    }))
}

