//! REST endpoint handlers for the observer server.
//!
//! Every handler reads through [`Simulation::snapshot`], so none of them
//! can advance the grid. Ticks only happen over the `WebSocket`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | HTML page rendering the current grid |
//! | `GET` | `/api/state` | Current state in the `WebSocket` wire format |
//! | `GET` | `/api/scenario` | Current grid as a scenario document |
//! | `GET` | `/api/status` | Generation, size, observers and uptime |
//!
//! [`Simulation::snapshot`]: onlife_core::Simulation::snapshot

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use onlife_types::ServerMessage;
use onlife_world::Scenario;

use crate::error::ObserverError;
use crate::protocol;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- grid page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the grid as emoji.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.simulation.snapshot().await;
    let generation = snapshot.generation;
    let (width, height) = snapshot.grid.shape();
    let observers = state.hub.len().await;
    let name = &state.world_name;
    let grid = &snapshot.grid;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>OnLife: {name}</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        pre.grid {{ font-size: 1.6rem; line-height: 1.2; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>OnLife</h1>
    <p class="subtitle">{name}: generation {generation}, {width} x {height}, {observers} observer(s)</p>
    <pre class="grid">{grid}</pre>
    <h2>API</h2>
    <ul>
        <li><a href="/api/state">/api/state</a></li>
        <li><a href="/api/scenario">/api/scenario</a></li>
        <li><a href="/api/status">/api/status</a></li>
    </ul>
    <p><code>ws://host:port/ws</code> accepts <code>{{"type":"tick"}}</code> and <code>{{"type":"state"}}</code>.</p>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/state
// ---------------------------------------------------------------------------

/// Return the current state exactly as a `WebSocket` observer would see it.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<ServerMessage> {
    Json(protocol::state_message(&state.simulation.snapshot().await))
}

// ---------------------------------------------------------------------------
// GET /api/scenario
// ---------------------------------------------------------------------------

/// Return the current grid encoded as a scenario document.
pub async fn get_scenario(State(state): State<Arc<AppState>>) -> Json<Scenario> {
    let snapshot = state.simulation.snapshot().await;
    Json(snapshot.to_scenario(&state.world_name))
}

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Return a summary of the running server.
pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.simulation.snapshot().await;
    let uptime = Utc::now().signed_duration_since(state.started_at);

    Json(serde_json::json!({
        "world": state.world_name,
        "generation": snapshot.generation,
        "width": snapshot.grid.width(),
        "height": snapshot.grid.height(),
        "observers": state.hub.len().await,
        "started_at": state.started_at.to_rfc3339(),
        "uptime_seconds": uptime.num_seconds(),
    }))
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Answer any unrouted path with a JSON 404.
pub async fn not_found(uri: Uri) -> ObserverError {
    ObserverError::NotFound(format!("no route for {}", uri.path()))
}
