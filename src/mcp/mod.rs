//! Model Context Protocol (MCP) Module
//!
//! Exposes the quote engine as a tool and the calculator page as a widget
//! resource:
//! - Protocol models (JsonRpcRequest, constants)
//! - RPC helpers (success/error responses, widget metadata)
//! - MCP handlers (initialize, tools/list, tools/call, etc.)

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types and functions
pub use handlers::routes;
