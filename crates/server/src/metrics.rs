//! Prometheus metrics
//!
//! The recorder is process-wide; it is installed once and every later call
//! reuses the same handle.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder
pub fn init_metrics() -> Option<PrometheusHandle> {
    PROMETHEUS
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .map_err(|e| tracing::warn!("Failed to install Prometheus recorder: {}", e))
        .ok()
        .cloned()
}

/// Prometheus exposition
pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics disabled\n".to_string(),
        ),
    }
}

pub fn record_error(kind: &'static str) {
    metrics::counter!("voice_shop_errors_total", "kind" => kind).increment(1);
}
