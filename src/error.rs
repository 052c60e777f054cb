//! Error types for the shipping calculator
//!
//! `QuoteError` is what callers of the quote engine see. `ConfigError` only
//! surfaces at startup while loading configuration and rate files.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl QuoteError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Message without the error-kind prefix, suitable for showing in the form.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message) => message,
        }
    }
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "invalid_input",
            "message": self.message(),
        }));
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rate file parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Invalid { message: String },
}

pub type Result<T> = std::result::Result<T, QuoteError>;
