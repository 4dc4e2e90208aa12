//! Grid engine and scenario codec for the `OnLife` simulation.
//!
//! This crate models the simulated world: a fixed-shape grid of typed cells,
//! the rules that turn one generation into the next, and the textual
//! scenario format used to load and save layouts.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid construction and scenario I/O.
//! - [`grid`] -- [`Grid`] storage, neighbour queries, and the pure
//!   [`Grid::advance`] generation step.
//! - [`scenario`] -- [`Scenario`] rows and metadata, decode/encode, and
//!   JSON documents on disk.
//! - [`starting_grid`] -- The demo layout and uniformly random grids.

pub mod error;
pub mod grid;
pub mod scenario;
pub mod starting_grid;

// Re-export primary types at crate root.
pub use error::{MalformedScenario, ScenarioError, WorldError};
pub use grid::Grid;
pub use scenario::{Scenario, load_grid};
pub use starting_grid::{DEFAULT_GRID_SIZE, demo_grid, random_grid, seeded_random_grid};
