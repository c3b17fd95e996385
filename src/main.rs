mod config;
mod handlers;
mod models;
mod services;
mod web; // Tabbed web UI + JSON endpoints

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::FoodAnalyzer;
use services::{ImageLoader, UsdaClient, WatsonxService};
use web::server::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables first so RUST_LOG from .env reaches the logger
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Diabetes Assistant...");

    let config = Config::from_env()?;

    // One HTTP client shared by every outbound call
    let client = reqwest::Client::new();

    let watsonx = Arc::new(WatsonxService::new(&config, client.clone()));
    log::info!(
        "✅ WatsonX service initialized (vision: {}, text: {})",
        config.vision_model,
        config.text_model
    );

    let usda = Arc::new(UsdaClient::new(&config, client.clone()));
    log::info!("✅ USDA FoodData Central client initialized: {}", config.usda_api_url);

    let analyzer = Arc::new(FoodAnalyzer::new(ImageLoader::new(client), watsonx, usda));

    let app = create_router(analyzer);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    log::info!("🌐 Web UI listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("🛑 Shutting down...");
        })
        .await?;

    Ok(())
}
