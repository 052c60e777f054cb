//! Shipping Quote Domain Module
//!
//! This module contains all shipping quote logic, including:
//! - Domain models (Country, ShippingMode, requests, results)
//! - The rate table and the pure quote engine
//! - Formatting helpers
//! - Application state
//! - REST API handlers

pub mod engine;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod rates;
pub mod state;

// Re-export commonly used types for convenience
pub use engine::compute_quote;
pub use handlers::routes;
pub use models::{Country, QuoteInput, QuoteRequest, QuoteResult, ShippingMode};
pub use rates::{ModeRates, RateTable};
pub use state::{AppState, SharedState};
