//! Simulation control and configuration for the `OnLife` server.
//!
//! This crate sits between the pure grid engine in `onlife-world` and the
//! network-facing observer server. It owns the single authoritative grid
//! and decides how that grid is first created.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides.
//! - [`simulation`] -- [`Simulation`] controller that serialises ticks and
//!   reads behind one lock, plus the initial grid builder.

pub mod config;
pub mod simulation;

pub use config::{ConfigError, Layout, ListenConfig, LogFormat, LoggingConfig, OnlifeConfig, WorldConfig};
pub use simulation::{GridSnapshot, Simulation, initial_grid};
