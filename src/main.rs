//! Holocron-RS: A Star Wars character explorer written in Rust
//!
//! This is the main entry point for the application.

use anyhow::Result;
use holocron_rs::{
    config::Settings,
    network::HttpClient,
    swapi::SwapiClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting Holocron-RS v{}", holocron_rs::VERSION);

    // Load configuration
    let settings = load_settings()?;
    info!(
        "Loaded configuration for instance: {}",
        settings.general.instance_name
    );

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.upstream)?;
    info!("HTTP client initialized");

    // Build the catalog client
    let archive = SwapiClient::new(client, &settings.upstream.api_base_url);
    info!("Catalog client targeting {}", settings.upstream.api_base_url);

    // Create application state
    let state = AppState::new(settings.clone(), archive)?;
    info!("Application state initialized");

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    // Check environment variable first
    if let Ok(path) = std::env::var("HOLOCRON_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Check for settings file in various locations
    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/holocron/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("holocron-rs/settings.yml"))
            .unwrap_or_default(),
    ];

    for path in paths.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Use defaults
    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
