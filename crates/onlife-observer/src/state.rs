//! Shared application state for the observer server.
//!
//! [`AppState`] ties the single [`Simulation`] to the [`ObserverHub`] of
//! live `WebSocket` connections. Every handler and every connection task
//! holds the same `Arc<AppState>`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use onlife_core::Simulation;

use crate::hub::ObserverHub;
use crate::ws::ConnectionSink;

/// State shared across all HTTP handlers and `WebSocket` connections.
#[derive(Debug)]
pub struct AppState {
    /// The authoritative grid and its generation counter.
    pub simulation: Arc<Simulation>,
    /// Connected `WebSocket` observers.
    pub hub: ObserverHub<ConnectionSink>,
    /// Name used for scenario exports and the status page.
    pub world_name: String,
    /// When this server was started.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state around `simulation` with no observers connected.
    pub fn new(simulation: Arc<Simulation>, world_name: impl Into<String>) -> Self {
        Self {
            simulation,
            hub: ObserverHub::new(),
            world_name: world_name.into(),
            started_at: Utc::now(),
        }
    }
}
