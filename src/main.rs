use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use token_relay::{AppState, config::Config, router::create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if !config.has_signing_credentials() {
        tracing::warn!("AGORA_APP_ID or AGORA_APP_CERT missing. Tokens will fail until set.");
    }
    if config.firebase_service_account.is_none() {
        tracing::warn!("FIREBASE_SERVICE_ACCOUNT missing. Call notifications will fail until set.");
    }

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid SERVER_HOST, falling back to 0.0.0.0");
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        }),
        config.server_port,
    );

    let app = create_router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Agora token server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
