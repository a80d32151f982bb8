pub mod clock;
pub mod config;
pub mod episodes;
pub mod error;
pub mod handlers;
pub mod mcp;
pub mod models;
pub mod oauth;
pub mod pagination;
pub mod state;
pub mod tools;
pub mod upstream;

use axum::Router;
use axum::routing::{get, post};

use state::AppState;

/// Build the application router with the given state.
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a network port.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/api/health", get(handlers::health))
        .route("/api/health/ready", get(handlers::readiness))
        // MCP (JSON-RPC 2.0); root path for clients configured with the bare URL
        .route("/mcp", post(mcp::server::mcp_handler))
        .route("/", post(mcp::server::mcp_handler))
        .with_state(state)
}
