//! HTTP STT Backend - Calls an external recognition service
//!
//! Recorded audio is posted as-is to `{url}/transcribe` and the service answers
//! with a JSON transcript. Every failure is folded into one of the three
//! recognition failure kinds so callers can answer uniformly.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use voice_shop_core::{RecognitionFailure, SpeechToText};

use crate::PipelineError;

/// HTTP STT Backend configuration
#[derive(Debug, Clone)]
pub struct HttpSttConfig {
    /// Base URL of the recognition service
    pub url: String,
    /// Language hint sent with each request
    pub language: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for HttpSttConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8090".to_string(),
            language: "en".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Response from the recognition service
#[derive(Debug, Deserialize)]
struct SttResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP STT Backend
pub struct HttpSpeechToText {
    config: HttpSttConfig,
    client: reqwest::Client,
}

impl HttpSpeechToText {
    pub fn new(config: HttpSttConfig) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| PipelineError::Client(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            url = %config.url,
            language = %config.language,
            timeout_ms = config.timeout_ms,
            "HTTP STT backend configured"
        );

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpSttConfig {
        &self.config
    }

    fn transcribe_url(&self) -> String {
        format!("{}/transcribe", self.config.url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SpeechToText for HttpSpeechToText {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, RecognitionFailure> {
        if audio.is_empty() {
            return Err(RecognitionFailure::Unintelligible);
        }

        let start = Instant::now();
        let response = self
            .client
            .post(self.transcribe_url())
            .header("Content-Type", "application/octet-stream")
            .header("X-Language", &self.config.language)
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!("HTTP STT request timed out: {}", e);
                    RecognitionFailure::Timeout
                } else {
                    tracing::warn!("HTTP STT request failed: {}", e);
                    RecognitionFailure::ServiceError
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::REQUEST_TIMEOUT
            || status == reqwest::StatusCode::GATEWAY_TIMEOUT
        {
            return Err(RecognitionFailure::Timeout);
        }
        if !status.is_success() {
            tracing::warn!("HTTP STT service returned error: {}", status);
            return Err(RecognitionFailure::ServiceError);
        }

        let result: SttResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                RecognitionFailure::Timeout
            } else {
                tracing::warn!("Failed to parse STT response: {}", e);
                RecognitionFailure::ServiceError
            }
        })?;

        if let Some(error) = &result.error {
            tracing::warn!("STT service returned error: {}", error);
        }

        let text = result.text.trim().to_lowercase();
        tracing::debug!(
            chars = text.len(),
            confidence = ?result.confidence,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Transcribed audio"
        );

        if text.is_empty() {
            return Err(RecognitionFailure::Unintelligible);
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::json;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn backend(url: String, timeout_ms: u64) -> HttpSpeechToText {
        HttpSpeechToText::new(HttpSttConfig {
            url,
            timeout_ms,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_transcribes_and_lowercases() {
        let app = Router::new().route(
            "/transcribe",
            post(|| async { Json(json!({ "text": " Add Two Milk ", "confidence": 0.93 })) }),
        );
        let stt = backend(serve(app).await, 2000);

        let text = stt.transcribe(&[1, 2, 3, 4]).await.unwrap();
        assert_eq!(text, "add two milk");
    }

    #[tokio::test]
    async fn test_empty_transcript_is_unintelligible() {
        let app = Router::new().route("/transcribe", post(|| async { Json(json!({ "text": "" })) }));
        let stt = backend(serve(app).await, 2000);

        assert_eq!(
            stt.transcribe(&[1, 2, 3]).await,
            Err(RecognitionFailure::Unintelligible)
        );
    }

    #[tokio::test]
    async fn test_empty_audio_skips_request() {
        let stt = backend("http://127.0.0.1:1".to_string(), 2000);
        assert_eq!(stt.transcribe(&[]).await, Err(RecognitionFailure::Unintelligible));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_service_error() {
        let app = Router::new().route(
            "/transcribe",
            post(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let stt = backend(serve(app).await, 2000);

        assert_eq!(
            stt.transcribe(&[1]).await,
            Err(RecognitionFailure::ServiceError)
        );
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let stt = backend("http://127.0.0.1:1".to_string(), 2000);
        assert_eq!(
            stt.transcribe(&[1]).await,
            Err(RecognitionFailure::ServiceError)
        );
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let app = Router::new().route(
            "/transcribe",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "text": "too late" }))
            }),
        );
        let stt = backend(serve(app).await, 100);

        assert_eq!(stt.transcribe(&[1]).await, Err(RecognitionFailure::Timeout));
    }
}
