//! Shipping Calculator Library
//!
//! This library provides a shipping cost estimator: a pure quote engine over a
//! per-country rate table, served over HTTP alongside the calculator page and
//! an MCP (Model Context Protocol) tool endpoint.

// Domain modules
pub mod mcp;
pub mod quote;

// Infrastructure
pub mod config;
pub mod error;
pub mod logger;
pub mod router;

pub use config::ServerConfig;
pub use error::{ConfigError, QuoteError};
