mod config;
mod routes;
mod services;
mod state;
mod upstream;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::RelayConfig::from_env().expect("invalid relay configuration");
    let upstream = upstream::HttpUpstream::from_config(&config).expect("upstream client init failed");
    tracing::info!(
        upstream = upstream.url(),
        budget = config.history_budget,
        timeout_secs = config.timeouts.request_secs,
        "Chiku upstream configured"
    );

    let state = state::AppState::new(Arc::new(upstream), config.history_budget);

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chiku relay listening");
    axum::serve(listener, app).await.expect("server failed");
}
