//! MCP (Model Context Protocol) route handlers
//!
//! This module implements the Model Context Protocol handlers for the shipping
//! calculator. `handle_tool_call` is public so tests can drive it directly.

use super::{helpers::*, models::*};
use crate::quote::{
    engine::compute_quote,
    helpers::{format_cost, format_quote_summary},
    models::{Country, QuoteInput, QuoteResponse, ShippingMode},
    state::{AppState, SharedState},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

/// Creates routes for MCP-related operations
///
/// `GET /` belongs to the calculator page, so the root path only takes POST.
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp))
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse))
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            tracing::warn!(error = %e.body_text(), "JSON-RPC parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    tracing::debug!(method = method_name, id = %id, "MCP call");

    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "resources/list" => rpc_success(id, handle_resources_list()),
        "resources/read" => match handle_resources_read(&state).await {
            Ok(result) => rpc_success(id, result),
            Err(status) => {
                tracing::warn!(%status, "Calculator page unavailable for resources/read");
                rpc_error(id, INTERNAL_ERROR, "Widget resource unavailable")
            }
        },
        "tools/call" => {
            let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            match handle_tool_call(&state, tool_name, args) {
                Ok(result) => rpc_success(id, result),
                Err(msg) => rpc_error(id, INVALID_PARAMS, msg),
            }
        }
        "ping" => rpc_success(id, json!({})),
        _ => {
            tracing::warn!(method = method_name, "Unknown MCP method");
            rpc_error(id, METHOD_NOT_FOUND, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "listChanged": false, "subscribe": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    let modes: Vec<&str> = ShippingMode::ALL.iter().map(|m| m.as_str()).collect();
    let countries: Vec<&str> = Country::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "tools": [{
            "name": TOOL_NAME,
            "title": "Estimate shipping cost",
            "description": "Estimates the cost of shipping a box given its weight, dimensions, shipping mode and origin/destination countries.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "mode": { "type": "string", "enum": modes, "default": "air" },
                    "origin": { "type": "string", "enum": countries },
                    "destination": { "type": "string", "enum": countries },
                    "weightKg": { "type": "number", "exclusiveMinimum": 0 },
                    "lengthCm": { "type": "number", "exclusiveMinimum": 0 },
                    "widthCm": { "type": "number", "exclusiveMinimum": 0 },
                    "heightCm": { "type": "number", "exclusiveMinimum": 0 }
                },
                "required": ["origin", "destination", "weightKg", "lengthCm", "widthCm", "heightCm"],
                "additionalProperties": false
            },
            "_meta": widget_meta(None)
        }],
        "_meta": widget_meta(None)
    })
}

/// Handles `resources/list` request.
fn handle_resources_list() -> Value {
    json!({
        "resources": [{
            "name": "Shipping calculator",
            "uri": WIDGET_TEMPLATE_URI,
            "mimeType": WIDGET_MIME_TYPE,
            "_meta": widget_meta(None)
        }],
        "_meta": widget_meta(None)
    })
}

/// Handles `resources/read` request.
async fn handle_resources_read(state: &AppState) -> Result<Value, StatusCode> {
    let html = state.load_form_html().await?;
    Ok(json!({
        "contents": [{
            "uri": WIDGET_TEMPLATE_URI,
            "mimeType": WIDGET_MIME_TYPE,
            "text": html,
            "_meta": widget_meta(None)
        }],
        "_meta": widget_meta(None)
    }))
}

/// Handles `tools/call` request (Business Logic).
pub fn handle_tool_call(state: &AppState, name: &str, args: Value) -> Result<Value, String> {
    match name {
        TOOL_NAME => handle_estimate_tool(state, args),
        _ => Err(format!("Unknown tool: {}", name)),
    }
}

/// Handles the estimate_shipping tool functionality
fn handle_estimate_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: QuoteInput =
        serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))?;

    let request = input.into_request().map_err(|e| e.to_string())?;
    let result = compute_quote(&request, &state.rates).map_err(|e| e.to_string())?;

    let quote_id = Uuid::new_v4().simple().to_string();
    tracing::info!(
        quote_id = %quote_id,
        "TOOL QUOTE: {}",
        format_quote_summary(&request, &result)
    );

    let message = format!(
        "Estimated {} shipping cost from {} to {}: {}",
        request.mode.label(),
        request.origin.label(),
        request.destination.label(),
        format_cost(result.cost_estimate)
    );

    Ok(json!({
        "content": [{ "type": "text", "text": message }],
        "structuredContent": {
            "quoteId": quote_id,
            "quote": QuoteResponse::new(&request, &result)
        },
        "_meta": widget_meta(Some(&quote_id))
    }))
}
