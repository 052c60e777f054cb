//! REST API handlers for shipping quotes
//!
//! This module implements the HTTP endpoints behind the calculator page:
//! the page itself, the selector options and the quote computation.

use super::{engine::compute_quote, helpers::*, models::*, state::SharedState};
use crate::error::QuoteError;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

/// Creates routes for quote-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(calculator_page))
        .route("/options", get(options))
        .route("/quote", post(quote))
        .route("/health", get(health))
}

/// Endpoint: GET /
/// Serves the calculator form.
async fn calculator_page(State(state): State<SharedState>) -> impl IntoResponse {
    state.load_form_html().await.map(Html)
}

/// Endpoint: GET /options
/// Lists modes, selectable countries and the active rate table.
async fn options(State(state): State<SharedState>) -> impl IntoResponse {
    Json(selector_options(&state.rates))
}

/// Endpoint: POST /quote
/// Validates the submitted form values and returns the estimated cost.
async fn quote(
    State(state): State<SharedState>,
    Json(payload): Json<QuoteInput>,
) -> Result<Json<QuoteResponse>, QuoteError> {
    let request = payload.into_request().inspect_err(|e| {
        tracing::info!(reason = e.message(), "Rejected quote input");
    })?;
    let result = compute_quote(&request, &state.rates).inspect_err(|e| {
        tracing::info!(reason = e.message(), "Rejected quote request");
    })?;

    tracing::info!(
        "REST API QUOTE: {}",
        format_quote_summary(&request, &result)
    );

    Ok(Json(QuoteResponse::new(&request, &result)))
}

/// Endpoint: GET /health
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
