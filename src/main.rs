//! Server binary.
//!
//! Wires up:
//! - the counter file and scratch path from the environment
//! - the HTTP downloader and the YouTube uploader
//! - the `/upload` route

use shorts_relay::adapters::http::{router, AppState, HttpDownloader};
use shorts_relay::adapters::local::FileCounter;
use shorts_relay::adapters::youtube::upload::https_connector;
use shorts_relay::adapters::youtube::{OAuthCredentialProvider, YouTubeUploader};
use shorts_relay::ports::publisher::VideoPublisher;
use shorts_relay::{AppConfig, PublishService};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt::init();

    // 1. Adapters
    let client = match reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let source = HttpDownloader::new(client);
    let counter = FileCounter::new(&config.counter_file);
    let connector = match https_connector() {
        Ok(connector) => connector,
        Err(e) => {
            error!("Failed to load TLS roots: {}", e);
            std::process::exit(1);
        }
    };
    let credentials = OAuthCredentialProvider::new(config.youtube.clone());
    let publisher = YouTubeUploader::new(connector, credentials);

    if let Err(e) = publisher.ready() {
        warn!("{}; uploads will be refused until they are set", e);
    }

    // 2. Application Service
    let service = Arc::new(PublishService::new(
        source,
        counter,
        publisher,
        &config.video_path,
    ));

    // 3. HTTP Layer
    let app = router(AppState::new(config.api_key.clone(), service));

    // 4. Start Server
    let listener = match tokio::net::TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_address(), e);
            std::process::exit(1);
        }
    };
    info!("YouTube Shorts uploader running on port {}", config.port);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
