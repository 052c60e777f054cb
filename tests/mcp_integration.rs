//! Integration tests for the MCP (Model Context Protocol) endpoint
//!
//! These tests verify the protocol surface of the shipping calculator:
//! - Server initialization and handshake
//! - Tool discovery and listing
//! - Resource discovery and reading
//! - Tool execution (estimate_shipping)
//! - Error handling

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use shipping_calculator::quote::{AppState, RateTable};
use shipping_calculator::router::create_app_router;

/// Helper function to create a test app instance
fn create_test_app() -> axum::Router {
    let state = Arc::new(AppState::new());
    create_app_router(state)
}

/// Helper function to send a JSON-RPC request and get the response
async fn send_jsonrpc_request(
    app: &axum::Router,
    method: &str,
    params: Option<Value>,
    id: i32,
) -> (StatusCode, Value) {
    let request_body = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id
    });

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&request_body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

fn estimate_params(arguments: Value) -> Option<Value> {
    Some(json!({ "name": "estimate_shipping", "arguments": arguments }))
}

#[tokio::test]
async fn test_mcp_sse_endpoint() {
    let app = create_test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/mcp")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(content_type, "text/event-stream");

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body_bytes.to_vec()).unwrap();

    assert!(body_str.contains("event: endpoint"));
    assert!(body_str.contains("data: /mcp"));
}

#[tokio::test]
async fn test_mcp_initialize() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "initialize", None, 1).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);

    let result = &body["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "shipping-calculator");
    assert!(result["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_mcp_tools_list() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "tools/list", None, 2).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);

    let tools = body["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);

    let estimate = &tools[0];
    assert_eq!(estimate["name"], "estimate_shipping");
    assert!(!estimate["description"].as_str().unwrap().is_empty());

    let properties = &estimate["inputSchema"]["properties"];
    assert_eq!(properties["mode"]["enum"], json!(["air", "sea", "land"]));
    assert_eq!(properties["origin"]["enum"].as_array().unwrap().len(), 6);
    assert!(properties["weightKg"].is_object());
}

#[tokio::test]
async fn test_mcp_resources_list() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "resources/list", None, 3).await;

    assert_eq!(status, StatusCode::OK);

    let resources = body["result"]["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 1);

    let widget = &resources[0];
    assert_eq!(widget["uri"], "ui://widget/shipping-calculator.html");
    assert_eq!(widget["mimeType"], "text/html+skybridge");
}

#[tokio::test]
async fn test_mcp_resources_read() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "resources/read", None, 4).await;

    assert_eq!(status, StatusCode::OK);

    let contents = body["result"]["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 1);

    let content = &contents[0];
    assert_eq!(content["uri"], "ui://widget/shipping-calculator.html");
    assert!(content["text"]
        .as_str()
        .unwrap()
        .contains("Calculadora de Envíos"));
}

#[tokio::test]
async fn test_mcp_resources_read_missing_page() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::with_config(RateTable::standard(), Some(dir.path().to_path_buf()));
    let app = create_app_router(Arc::new(state));

    let (status, body) = send_jsonrpc_request(&app, "resources/read", None, 4).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("result").is_none());
    assert_eq!(body["error"]["code"], -32603);
    assert_eq!(body["error"]["message"], "Widget resource unavailable");
}

#[tokio::test]
async fn test_mcp_tool_call_air_quote() {
    let app = create_test_app();

    let params = estimate_params(json!({
        "mode": "air",
        "origin": "colombia",
        "destination": "usa",
        "weightKg": 2,
        "lengthCm": 10,
        "widthCm": 10,
        "heightCm": 10
    }));

    let (status, body) = send_jsonrpc_request(&app, "tools/call", params, 5).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 5);

    let result = &body["result"];
    let content = &result["content"][0];
    assert_eq!(content["type"], "text");
    assert!(content["text"].as_str().unwrap().ends_with("$2,099.8"));

    let structured = &result["structuredContent"];
    let quote_id = structured["quoteId"].as_str().unwrap();
    assert_eq!(result["_meta"]["openai/widgetSessionId"], quote_id);

    let quote = &structured["quote"];
    let cost = quote["costEstimate"].as_f64().unwrap();
    assert!((cost - 2099.8).abs() < 1e-9);
    assert_eq!(quote["volumeCm3"], 1000.0);
    assert_eq!(quote["origin"], "colombia");
}

#[tokio::test]
async fn test_mcp_tool_call_legacy_mode_name() {
    let app = create_test_app();

    let params = estimate_params(json!({
        "mode": "maritimo",
        "origin": "peru",
        "destination": "spain",
        "weightKg": 5,
        "lengthCm": 5,
        "widthCm": 5,
        "heightCm": 5
    }));

    let (_, body) = send_jsonrpc_request(&app, "tools/call", params, 6).await;

    let quote = &body["result"]["structuredContent"]["quote"];
    assert_eq!(quote["mode"], "sea");
    assert_eq!(quote["costEstimate"], 305.0);
}

#[tokio::test]
async fn test_mcp_tool_call_zero_weight() {
    let app = create_test_app();

    let params = estimate_params(json!({
        "origin": "peru",
        "destination": "spain",
        "weightKg": 0,
        "lengthCm": 5,
        "widthCm": 5,
        "heightCm": 5
    }));

    let (status, body) = send_jsonrpc_request(&app, "tools/call", params, 7).await;

    assert_eq!(status, StatusCode::OK);
    let error = &body["error"];
    assert_eq!(error["code"], -32602);
    assert!(error["message"].as_str().unwrap().contains("weight"));
}

#[tokio::test]
async fn test_mcp_unknown_method() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "unknown/method", None, 11).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 11);

    let error = &body["error"];
    assert_eq!(error["code"], -32601);
    assert_eq!(error["message"], "Method not found");
}

#[tokio::test]
async fn test_mcp_invalid_json() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from("invalid json {{{"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();

    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["error"]["message"], "Parse error");
}

#[tokio::test]
async fn test_mcp_tool_call_unknown_tool() {
    let app = create_test_app();

    let params = json!({
        "name": "track_parcel",
        "arguments": {}
    });

    let (status, body) = send_jsonrpc_request(&app, "tools/call", Some(params), 12).await;

    assert_eq!(status, StatusCode::OK);

    let error = &body["error"];
    assert_eq!(error["code"], -32602);
    assert!(error["message"].as_str().unwrap().contains("Unknown tool"));
}

#[tokio::test]
async fn test_mcp_tool_call_invalid_arguments() {
    let app = create_test_app();

    let params = estimate_params(json!({ "weightKg": "heavy" }));

    let (status, body) = send_jsonrpc_request(&app, "tools/call", params, 13).await;

    assert_eq!(status, StatusCode::OK);

    let error = &body["error"];
    assert_eq!(error["code"], -32602);
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("Invalid arguments"));
}

#[tokio::test]
async fn test_mcp_tool_call_rejects_fields_outside_schema() {
    let app = create_test_app();

    let params = estimate_params(json!({
        "origin": "peru",
        "destination": "usa",
        "weight": 1,
        "lengthCm": 1,
        "widthCm": 1,
        "heightCm": 1
    }));

    let (status, body) = send_jsonrpc_request(&app, "tools/call", params, 18).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], -32602);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid arguments"));
}

#[tokio::test]
async fn test_mcp_ping() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "ping", None, 14).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 14);
    assert_eq!(body["result"], json!({}));
}

#[tokio::test]
async fn test_mcp_notifications_initialized() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "notifications/initialized", None, 15).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!({}));
}

#[tokio::test]
async fn test_mcp_invalid_method_type() {
    let app = create_test_app();

    // method should be a string
    let request_body = json!({
        "jsonrpc": "2.0",
        "method": 123,
        "id": 1
    });

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&request_body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
