//! Shipping Calculator State
//!
//! The application state holds the rate table and where to find the
//! calculator page. Nothing in it changes after startup.

use super::rates::RateTable;
use axum::http::StatusCode;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// File name of the calculator page inside the assets directory
pub const FORM_HTML_FILE: &str = "shipping-calculator.html";

/// Core application state
pub struct AppState {
    /// Rates every quote is computed against
    pub rates: RateTable,

    /// Path to the directory containing HTML assets.
    pub assets_dir: PathBuf,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates an AppState with the standard rates and locates the assets directory
    pub fn new() -> Self {
        Self::with_config(RateTable::standard(), None)
    }

    /// Creates an AppState from explicit rates and an optional assets directory
    pub fn with_config(rates: RateTable, assets_dir: Option<PathBuf>) -> Self {
        let assets_dir = assets_dir.unwrap_or_else(|| {
            let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Self::locate_assets_directory(&current_dir)
        });

        tracing::info!(
            assets_dir = %assets_dir.display(),
            countries = rates.len(),
            "Application state ready"
        );

        Self { rates, assets_dir }
    }

    /// Looks for `assets/` in the working directory, then its parent
    fn locate_assets_directory(current_dir: &Path) -> PathBuf {
        if current_dir.join("assets").exists() {
            return current_dir.join("assets");
        }

        if let Some(parent) = current_dir.parent() {
            if parent.join("assets").exists() {
                return parent.join("assets");
            }
        }

        PathBuf::from("assets")
    }

    /// Reads the calculator page or a fallback build of it
    pub async fn load_form_html(&self) -> Result<String, StatusCode> {
        let primary_html_path = self.assets_dir.join(FORM_HTML_FILE);
        if primary_html_path.exists() {
            return tokio::fs::read_to_string(primary_html_path)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR);
        }

        // e.g. shipping-calculator-1a2b3c.html
        let fallback_path = self.find_fallback_html_file().await?;
        tracing::debug!(path = %fallback_path.display(), "Serving fallback calculator page");

        tokio::fs::read_to_string(fallback_path)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Finds a fallback HTML file when the primary one is not available
    async fn find_fallback_html_file(&self) -> Result<PathBuf, StatusCode> {
        let mut entries = tokio::fs::read_dir(&self.assets_dir)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;

        let mut fallbacks = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with("shipping-calculator-") && name.ends_with(".html") {
                    fallbacks.push(path);
                }
            }
        }

        // Lexicographically last is the newest build
        fallbacks.sort();
        fallbacks.last().cloned().ok_or(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_primary_page_when_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FORM_HTML_FILE), "<form>primary</form>").unwrap();
        std::fs::write(dir.path().join("shipping-calculator-zzz.html"), "fallback").unwrap();

        let state = AppState::with_config(RateTable::standard(), Some(dir.path().to_path_buf()));
        assert_eq!(state.load_form_html().await.unwrap(), "<form>primary</form>");
    }

    #[tokio::test]
    async fn falls_back_to_latest_build() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("shipping-calculator-001.html"), "old").unwrap();
        std::fs::write(dir.path().join("shipping-calculator-002.html"), "new").unwrap();
        std::fs::write(dir.path().join("other.html"), "ignored").unwrap();

        let state = AppState::with_config(RateTable::standard(), Some(dir.path().to_path_buf()));
        assert_eq!(state.load_form_html().await.unwrap(), "new");
    }

    #[tokio::test]
    async fn missing_page_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::with_config(RateTable::standard(), Some(dir.path().join("nope")));
        assert_eq!(state.load_form_html().await, Err(StatusCode::NOT_FOUND));
    }
}
