//! The rectangular cell grid and its generation step.
//!
//! A [`Grid`] stores `width * height` cells row-major in one flat buffer.
//! Coordinates are `(x, y)` with the origin at the top-left: `y` selects
//! the row and `x` the column. Every lookup is bounds-checked and returns
//! `None` outside the grid, so edge cells simply have fewer neighbours.
//!
//! # Generation step
//!
//! [`Grid::advance`] never mutates its receiver. It reads only the current
//! grid and writes every next cell into a fresh buffer, so the outcome does
//! not depend on traversal order.
//!
//! | Current         | Next                                                              |
//! |-----------------|-------------------------------------------------------------------|
//! | Water           | Water                                                             |
//! | Grass           | fresh Fire if a 4-neighbour is Fire, else Grass                   |
//! | Fire            | Rock if a 4-neighbour is Water, else counter - 1 (Rock at 0)      |
//! | Life            | Life with 2 or 3 Life 8-neighbours, else Rock                     |
//! | Rock            | Life with exactly 3 Life 8-neighbours, else Rock                  |

use core::fmt;

use onlife_types::{Cell, CellKind};

use crate::error::WorldError;

/// One-axis displacement used to walk to a neighbour without signed casts.
#[derive(Debug, Clone, Copy)]
enum Step {
    Back,
    Stay,
    Forward,
}

impl Step {
    const fn apply(self, v: usize) -> Option<usize> {
        match self {
            Self::Back => v.checked_sub(1),
            Self::Stay => Some(v),
            Self::Forward => v.checked_add(1),
        }
    }
}

/// Up, down, left, right.
const ORTHOGONAL: [(Step, Step); 4] = [
    (Step::Stay, Step::Back),
    (Step::Stay, Step::Forward),
    (Step::Back, Step::Stay),
    (Step::Forward, Step::Stay),
];

/// All eight surrounding cells, diagonals included.
const SURROUNDING: [(Step, Step); 8] = [
    (Step::Back, Step::Back),
    (Step::Stay, Step::Back),
    (Step::Forward, Step::Back),
    (Step::Back, Step::Stay),
    (Step::Forward, Step::Stay),
    (Step::Back, Step::Forward),
    (Step::Stay, Step::Forward),
    (Step::Forward, Step::Forward),
];

/// A fixed-shape 2-D array of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width.saturating_mul(height)],
        }
    }

    /// Assemble a grid from a row-major buffer whose length the caller has
    /// already checked against `width * height`.
    pub(crate) const fn from_parts(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::RaggedRow`] if any row's length differs from the
    /// first row's.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, WorldError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(WorldError::RaggedRow {
                row,
                width: found.len(),
                expected: width,
            });
        }
        Ok(Self::from_parts(
            width,
            height,
            rows.into_iter().flatten().collect(),
        ))
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub const fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Whether the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        y.checked_mul(self.width)?.checked_add(x)
    }

    /// The cell at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).and_then(|i| self.cells.get(i)).copied()
    }

    /// Overwrite the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), WorldError> {
        let slot = self
            .index(x, y)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(WorldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })?;
        *slot = cell;
        Ok(())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cells of row `y`; empty outside the grid.
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let Some(start) = y.checked_mul(self.width) else {
            return &[];
        };
        let end = start.saturating_add(self.width);
        self.cells.get(start..end).unwrap_or(&[])
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Every `(x, y)` coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Number of cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.is(kind)).count()
    }

    /// One symbol per cell, row by row. This is the wire representation.
    pub fn symbol_rows(&self) -> Vec<Vec<char>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn neighbour(&self, x: usize, y: usize, (dx, dy): (Step, Step)) -> Option<Cell> {
        self.get(dx.apply(x)?, dy.apply(y)?)
    }

    /// Whether any up/down/left/right neighbour of `(x, y)` is of `kind`.
    pub fn has_orthogonal(&self, x: usize, y: usize, kind: CellKind) -> bool {
        ORTHOGONAL
            .iter()
            .filter_map(|&step| self.neighbour(x, y, step))
            .any(|c| c.is(kind))
    }

    /// Number of `Life` cells among the eight cells surrounding `(x, y)`.
    pub fn life_neighbours(&self, x: usize, y: usize) -> usize {
        SURROUNDING
            .iter()
            .filter_map(|&step| self.neighbour(x, y, step))
            .filter(|c| c.is(CellKind::Life))
            .count()
    }

    /// The value `cell` at `(x, y)` takes in the next generation.
    fn next_cell(&self, x: usize, y: usize, cell: Cell) -> Cell {
        match cell {
            Cell::Water => Cell::Water,
            Cell::Grass => {
                if self.has_orthogonal(x, y, CellKind::Fire) {
                    Cell::new(CellKind::Fire)
                } else {
                    Cell::Grass
                }
            }
            Cell::Fire { remaining } => {
                if self.has_orthogonal(x, y, CellKind::Water) {
                    return Cell::Rock;
                }
                match remaining.saturating_sub(1) {
                    0 => Cell::Rock,
                    left => Cell::fire(left),
                }
            }
            Cell::Rock | Cell::Life => match (cell, self.life_neighbours(x, y)) {
                (Cell::Life, 2 | 3) | (Cell::Rock, 3) => Cell::Life,
                _ => Cell::Rock,
            },
        }
    }

    /// Compute the next generation.
    ///
    /// Pure: `self` is untouched and the result has the same shape.
    pub fn advance(&self) -> Self {
        let cells = self
            .positions()
            .filter_map(|(x, y)| self.get(x, y).map(|cell| self.next_cell(x, y, cell)))
            .collect();
        Self::from_parts(self.width, self.height, cells)
    }

    /// Advance `generations` times.
    pub fn advance_by(&self, generations: u64) -> Self {
        let mut grid = self.clone();
        for _ in 0..generations {
            grid = grid.advance();
        }
        grid
    }
}

impl fmt::Display for Grid {
    /// Render one emoji per cell, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                f.write_str(cell.kind().glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
