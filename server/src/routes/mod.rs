//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The relay exposes a single chat endpoint plus a health check. Browsers
//! call it cross-origin, so every response carries permissive CORS headers
//! and `OPTIONS` on the chat route always answers with an empty 200.

pub mod chat;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub const CHAT_ROUTE: &str = "/api/chiku-chat";

/// Build the relay router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(CHAT_ROUTE, post(chat::chiku_chat).options(chat::preflight))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
