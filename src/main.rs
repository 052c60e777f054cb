use clap::Parser;
use shipping_calculator::logger;
use shipping_calculator::quote::AppState;
use shipping_calculator::router::create_app_router;
use shipping_calculator::ServerConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();
    logger::init_logger(config.verbose, config.json_logs);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let rates = match config.load_rates() {
        Ok(rates) => rates,
        Err(e) => {
            tracing::error!("Could not load rate table: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize application state
    let state = Arc::new(AppState::with_config(rates, config.assets_dir.clone()));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
