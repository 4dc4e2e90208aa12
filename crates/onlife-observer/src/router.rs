//! Axum router construction for the observer server.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for browser clients on other origins.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the observer server.
///
/// The router includes:
/// - `GET /` -- HTML page rendering the grid
/// - `GET /ws` -- interactive observer `WebSocket`
/// - `GET /api/state` -- current state message
/// - `GET /api/scenario` -- current grid as a scenario document
/// - `GET /api/status` -- server summary
///
/// Anything else gets a JSON 404.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/ws", get(ws::ws_handler))
        .route("/api/state", get(handlers::get_state))
        .route("/api/scenario", get(handlers::get_scenario))
        .route("/api/status", get(handlers::get_status))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
