//! The simulation controller: one grid, one generation counter, one lock.
//!
//! [`Simulation`] is the only owner of the live [`Grid`]. Every advance and
//! every read goes through the same [`tokio::sync::Mutex`], so no caller can
//! ever observe a grid halfway through replacement. Nothing is awaited while
//! the lock is held: the generation step is synchronous and fast.
//!
//! Callers only ever receive a [`GridSnapshot`], an owned copy that stays
//! valid after the lock is released and whose mutation never reaches the
//! live grid.

use onlife_world::{Grid, Scenario, ScenarioError};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::{Layout, WorldConfig};

/// An independent copy of the simulation state at one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    /// The grid at `generation`.
    pub grid: Grid,
    /// Number of advances applied since the simulation was created.
    pub generation: u64,
}

impl GridSnapshot {
    /// Encode the snapshot grid as a scenario named `name`.
    pub fn to_scenario(&self, name: &str) -> Scenario {
        Scenario::encode(name, &self.grid)
    }
}

#[derive(Debug)]
struct SimulationState {
    grid: Grid,
    generation: u64,
}

impl SimulationState {
    fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            grid: self.grid.clone(),
            generation: self.generation,
        }
    }
}

/// Serialises generation advances and reads of one grid.
#[derive(Debug)]
pub struct Simulation {
    state: Mutex<SimulationState>,
}

impl Simulation {
    /// Take ownership of `grid` at generation 0.
    pub fn new(grid: Grid) -> Self {
        Self {
            state: Mutex::new(SimulationState {
                grid,
                generation: 0,
            }),
        }
    }

    /// Advance one generation and return the new state.
    ///
    /// Blocks on the same lock as [`snapshot`](Self::snapshot), so ticks and
    /// reads never interleave.
    pub async fn tick(&self) -> GridSnapshot {
        let mut state = self.state.lock().await;
        state.grid = state.grid.advance();
        state.generation = state.generation.saturating_add(1);
        debug!(generation = state.generation, "Generation advanced");
        state.snapshot()
    }

    /// Return the current state without advancing.
    pub async fn snapshot(&self) -> GridSnapshot {
        self.state.lock().await.snapshot()
    }

    /// The current generation number.
    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }
}

/// Build the starting grid described by `world`.
///
/// A configured scenario document wins; otherwise the demo layout or a
/// random grid of `width` x `height` is used.
///
/// # Errors
///
/// Returns [`ScenarioError`] if the scenario document cannot be read or
/// its rows are malformed.
pub fn initial_grid(world: &WorldConfig) -> Result<Grid, ScenarioError> {
    if let Some(path) = &world.scenario {
        let grid = onlife_world::load_grid(path)?;
        info!(
            path = %path.display(),
            width = grid.width(),
            height = grid.height(),
            "Initial grid loaded from scenario"
        );
        return Ok(grid);
    }
    let grid = match world.layout {
        Layout::Demo => onlife_world::demo_grid(),
        Layout::Random => onlife_world::seeded_random_grid(world.width, world.height, world.seed),
    };
    info!(
        layout = ?world.layout,
        width = grid.width(),
        height = grid.height(),
        seed = ?world.seed,
        "Initial grid generated"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use onlife_types::{Cell, CellKind};

    use super::*;

    fn ring() -> Grid {
        onlife_world::demo_grid()
    }

    #[tokio::test]
    async fn fresh_simulation_starts_at_generation_zero() {
        let sim = Simulation::new(ring());
        let snap = sim.snapshot().await;
        assert_eq!(snap.generation, 0);
        assert_eq!(snap.grid, ring());
    }

    #[tokio::test]
    async fn each_tick_applies_exactly_one_advance() {
        let sim = Simulation::new(ring());
        let mut expected = ring();
        for n in 1..=6 {
            let snap = sim.tick().await;
            expected = expected.advance();
            assert_eq!(snap.generation, n);
            assert_eq!(snap.grid, expected);
        }
        assert_eq!(sim.generation().await, 6);
    }

    #[tokio::test]
    async fn snapshot_does_not_advance() {
        let sim = Simulation::new(ring());
        sim.tick().await;
        let a = sim.snapshot().await;
        let b = sim.snapshot().await;
        assert_eq!(a, b);
        assert_eq!(a.generation, 1);
    }

    #[tokio::test]
    async fn mutating_a_snapshot_leaves_live_grid_alone() {
        let sim = Simulation::new(ring());
        let mut snap = sim.snapshot().await;
        snap.grid.set(0, 0, Cell::Life).unwrap();
        assert_eq!(sim.snapshot().await.grid.get(0, 0), Some(Cell::Water));
    }

    #[tokio::test]
    async fn concurrent_ticks_never_skip_or_repeat_generations() {
        let sim = Arc::new(Simulation::new(ring()));
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let sim = Arc::clone(&sim);
                tokio::spawn(async move { sim.tick().await.generation })
            })
            .collect();

        let mut seen = Vec::new();
        for handle in handles {
            seen.push(handle.await.unwrap());
        }
        seen.sort_unstable();
        assert_eq!(seen, (1..=32).collect::<Vec<u64>>());
        assert_eq!(sim.snapshot().await.grid, ring().advance_by(32));
    }

    #[test]
    fn snapshot_encodes_to_scenario() {
        let snap = GridSnapshot {
            grid: ring(),
            generation: 0,
        };
        let scenario = snap.to_scenario("ring");
        assert_eq!(scenario.name, "ring");
        assert_eq!(scenario.rows.first().map(String::as_str), Some("WWWWW"));
        assert_eq!(scenario.rows.get(2).map(String::as_str), Some("WGFGW"));
    }

    #[test]
    fn initial_grid_follows_layout() {
        let mut world = WorldConfig {
            layout: Layout::Demo,
            ..WorldConfig::default()
        };
        assert_eq!(initial_grid(&world).unwrap(), ring());

        world.layout = Layout::Random;
        world.width = 9;
        world.height = 4;
        world.seed = Some(1);
        let grid = initial_grid(&world).unwrap();
        assert_eq!(grid.shape(), (9, 4));
        assert_eq!(grid, initial_grid(&world).unwrap());
    }

    #[test]
    fn initial_grid_prefers_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.json");
        std::fs::write(&path, r#"{"name":"tiny","rows":["LL","LL"]}"#).unwrap();
        let world = WorldConfig {
            scenario: Some(path),
            ..WorldConfig::default()
        };
        let grid = initial_grid(&world).unwrap();
        assert_eq!(grid.count(CellKind::Life), 4);
    }

    #[test]
    fn initial_grid_surfaces_malformed_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"rows":["LQ"]}"#).unwrap();
        let world = WorldConfig {
            scenario: Some(path),
            ..WorldConfig::default()
        };
        assert!(matches!(
            initial_grid(&world),
            Err(ScenarioError::Malformed(_))
        ));
    }
}
