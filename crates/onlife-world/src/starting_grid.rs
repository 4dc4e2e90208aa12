//! Grids used to seed a simulation when no scenario document is given.

use onlife_types::{Cell, CellKind};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::grid::Grid;

/// Side length of the default square grid.
pub const DEFAULT_GRID_SIZE: usize = 5;

/// The 5x5 demo layout: grass ringed by water with a fire at its centre.
const DEMO_LAYOUT: [[CellKind; DEFAULT_GRID_SIZE]; DEFAULT_GRID_SIZE] = {
    use CellKind::{Fire, Grass, Water};
    [
        [Water, Water, Water, Water, Water],
        [Water, Grass, Grass, Grass, Water],
        [Water, Grass, Fire, Grass, Water],
        [Water, Grass, Grass, Grass, Water],
        [Water, Water, Water, Water, Water],
    ]
};

/// Build the demo grid.
pub fn demo_grid() -> Grid {
    let cells = DEMO_LAYOUT.iter().flatten().map(|&k| Cell::new(k)).collect();
    Grid::from_parts(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE, cells)
}

/// Build a grid whose every cell is drawn uniformly from the five kinds.
pub fn random_grid<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    let cells = (0..width.saturating_mul(height))
        .map(|_| Cell::new(CellKind::ALL.choose(rng).copied().unwrap_or(CellKind::Rock)))
        .collect();
    Grid::from_parts(width, height, cells)
}

/// [`random_grid`] with a reproducible RNG when `seed` is given, otherwise
/// the thread-local RNG.
pub fn seeded_random_grid(width: usize, height: usize, seed: Option<u64>) -> Grid {
    match seed {
        Some(seed) => random_grid(width, height, &mut StdRng::seed_from_u64(seed)),
        None => random_grid(width, height, &mut rand::rng()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_grid_matches_ring_layout() {
        let grid = demo_grid();
        assert_eq!(grid.shape(), (5, 5));
        assert_eq!(grid.count(CellKind::Water), 16);
        assert_eq!(grid.count(CellKind::Grass), 8);
        assert_eq!(grid.get(2, 2), Some(Cell::fire(3)));
    }

    #[test]
    fn seeded_grids_are_reproducible() {
        let a = seeded_random_grid(8, 6, Some(42));
        let b = seeded_random_grid(8, 6, Some(42));
        assert_eq!(a, b);
        assert_eq!(a.shape(), (8, 6));
    }

    #[test]
    fn random_grid_draws_every_kind() {
        let grid = seeded_random_grid(40, 40, Some(7));
        for kind in CellKind::ALL {
            assert!(grid.count(kind) > 0, "{kind:?} never drawn");
        }
        assert!(
            grid.cells()
                .iter()
                .filter(|c| c.is(CellKind::Fire))
                .all(|c| c.counter() == 3)
        );
    }
}
