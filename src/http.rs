//! Endpoint de exposición de métricas para Sonda.

use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

/// Construye el router con la única ruta de scrape.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

// GET /metrics — los gauges en formato de texto de Prometheus
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.gauges.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            log::error!("No se pudieron codificar las métricas: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
