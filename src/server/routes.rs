//! HTTP route handlers for the summary API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::common::errors::TldrError;

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate", post(generate))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let probe = Arc::clone(&state);
    let reachable = tokio::task::spawn_blocking(move || probe.generator().is_ready())
        .await
        .ok()
        .and_then(Result::ok)
        .unwrap_or(false);
    let generation_service = if reachable { "reachable" } else { "unreachable" };

    Json(serde_json::json!({
        "status": "ok",
        "service": "tldr-prompt",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.generator().model(),
        "generation_service": generation_service,
    }))
}

/// Summary request.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Text to summarize.
    pub input_text: String,
}

/// Summary response.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Sanitized executive summary.
    pub summary: String,
}

/// Handle summary requests.
async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let summary = tokio::task::spawn_blocking(move || state.summarizer.generate(&request.input_text))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Worker error: {e}")))?
        .map_err(|e| {
            tracing::warn!("Summary generation failed: {e}");
            (error_status(&e), format!("Generation error: {e}"))
        })?;

    Ok(Json(GenerateResponse { summary }))
}

const fn error_status(err: &TldrError) -> StatusCode {
    match err {
        TldrError::MissingGeneration | TldrError::HttpClient(_) | TldrError::HttpStatus(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
