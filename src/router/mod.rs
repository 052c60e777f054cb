//! Routing module for the shipping calculator

use crate::quote::state::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;
use uuid::Uuid;

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let request_id = Uuid::new_v4().simple().to_string();
        let span = tracing::info_span!(
            "request",
            id = %request_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        async move {
            tracing::info!("REQ");
            let res = next.run(req).await;
            if !res.status().is_success() {
                tracing::warn!(status = %res.status(), "RES (Error)");
            }
            res
        }
        .instrument(span)
        .await
    });

    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(crate::quote::routes())
        .merge(crate::mcp::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}
