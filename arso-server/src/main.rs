use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use arso_server::arso::{ArsoClient, ArsoConfig};
use arso_server::cache::{CacheConfig, ResponseCache};
use arso_server::web::{AppState, create_router};

/// Directory served for any path the dynamic routes don't claim.
const STATIC_DIR: &str = "static";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let port: u16 = port.parse().expect("PORT must be a port number");

    let client = ArsoClient::new(ArsoConfig::default()).expect("Failed to create ARSO client");
    let cache = ResponseCache::new(&CacheConfig::default());
    let state = AppState::new(client);

    let app = create_router(state, cache, STATIC_DIR);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
