//! Shared type definitions for the `OnLife` simulation.
//!
//! This crate is the single source of truth for the cell model and the
//! observer wire format. Wire types flow downstream to `TypeScript` via
//! `ts-rs` for browser observers.
//!
//! # Modules
//!
//! - [`cell`] -- Cell kinds, the per-cell sum type, symbols and glyphs
//! - [`ids`] -- Type-safe UUID wrappers for observer identifiers
//! - [`messages`] -- Server and client `WebSocket` messages

pub mod cell;
pub mod ids;
pub mod messages;

// Re-export all public types at crate root for convenience.
pub use cell::{Cell, CellKind, DEFAULT_FIRE_LIFETIME};
pub use ids::ObserverId;
pub use messages::{ClientCommand, ServerMessage};
