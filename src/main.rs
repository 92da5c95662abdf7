use dotenvy::dotenv;
use jewellery_mart::cart::AppState;
use jewellery_mart::config::AppConfig;
use jewellery_mart::router::create_app_router;
use jewellery_mart::telemetry::setup_tracing;
use jewellery_mart::Result;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenv().ok();
    setup_tracing();

    let config = AppConfig::from_env()?;

    // Initialize application state
    let state = Arc::new(AppState::new());
    if let Some(path) = &config.catalog_path {
        let count = state
            .catalog
            .load_seed(path)
            .await
            .inspect_err(|e| error!("Failed to load catalog from {}: {}", path.display(), e))?;
        info!("Loaded {} product(s) from {}", count, path.display());
    }

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
