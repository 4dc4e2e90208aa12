//! Observer server for the `OnLife` simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) where observers send `tick` and
//!   `state` commands and receive grid states
//! - **REST endpoints** for reading the current state, exporting it as a
//!   scenario document, and checking server status
//! - **Minimal HTML page** (`GET /`) rendering the grid as emoji
//!
//! # Architecture
//!
//! All grid access goes through the shared [`Simulation`] controller. A
//! tick requested by one observer is broadcast to every observer through
//! the [`ObserverHub`], which drops connections it can no longer write
//! to. State reads and protocol errors are answered privately.
//!
//! [`Simulation`]: onlife_core::Simulation
//! [`ObserverHub`]: hub::ObserverHub

pub mod error;
pub mod handlers;
pub mod hub;
pub mod protocol;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

pub use error::{DeliveryError, ObserverError, ProtocolError};
pub use hub::{BroadcastReport, ObserverHub, ObserverSink};
pub use protocol::{Reply, dispatch, parse_command};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
