//! Scenario documents: a textual grid layout plus optional metadata.
//!
//! Each row is a string with one symbol per column (see
//! [`onlife_types::cell`] for the symbol table). On disk a scenario is a
//! JSON object:
//!
//! ```json
//! {
//!   "name": "ring",
//!   "description": "grass field ringed by water",
//!   "fireLifetime": 5,
//!   "rows": ["WWW", "WFW", "WWW"]
//! }
//! ```
//!
//! Only `rows` is required. A `fireLifetime` of 0 (or absent) means fires
//! decoded from the rows start at [`DEFAULT_FIRE_LIFETIME`].
//!
//! Encoding a grid is lossy for fire: only the presence of a fire is
//! written, not its remaining lifetime.
//!
//! [`DEFAULT_FIRE_LIFETIME`]: onlife_types::DEFAULT_FIRE_LIFETIME

use std::path::Path;

use onlife_types::{Cell, CellKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MalformedScenario, ScenarioError};
use crate::grid::Grid;

/// A serialisable grid layout with optional metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Starting lifetime for fire cells in `rows`. 0 uses the default.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub fire_lifetime: u32,

    /// One string per grid row, one symbol per cell.
    pub rows: Vec<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(v: &u32) -> bool {
    *v == 0
}

impl Scenario {
    /// Number of columns, taken from the first row.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.chars().count())
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The cell a fire symbol decodes to under this scenario's override.
    const fn fire_cell(&self) -> Cell {
        if self.fire_lifetime > 0 {
            Cell::fire(self.fire_lifetime)
        } else {
            Cell::new(CellKind::Fire)
        }
    }

    /// Convert the rows into a grid.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedScenario`] when there are no rows, a row's width
    /// differs from the first row's, or a symbol is unknown. No partial grid
    /// is produced.
    pub fn decode(&self) -> Result<Grid, MalformedScenario> {
        let expected = self
            .rows
            .first()
            .ok_or(MalformedScenario::NoRows)?
            .chars()
            .count();
        let fire = self.fire_cell();

        let mut cells = Vec::with_capacity(expected.saturating_mul(self.rows.len()));
        for (row, line) in self.rows.iter().enumerate() {
            let width = line.chars().count();
            if width != expected {
                return Err(MalformedScenario::RaggedRow {
                    row,
                    width,
                    expected,
                });
            }
            for (column, symbol) in line.chars().enumerate() {
                let kind = CellKind::from_symbol(symbol).ok_or(MalformedScenario::UnknownSymbol {
                    row,
                    column,
                    symbol,
                })?;
                cells.push(if kind == CellKind::Fire {
                    fire
                } else {
                    Cell::new(kind)
                });
            }
        }

        Ok(Grid::from_parts(expected, self.rows.len(), cells))
    }

    /// Snapshot a grid as a scenario named `name`.
    ///
    /// Never fails. `description` and `fire_lifetime` are left empty.
    pub fn encode(name: impl Into<String>, grid: &Grid) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fire_lifetime: 0,
            rows: grid
                .rows()
                .map(|row| row.iter().map(|c| c.symbol()).collect())
                .collect(),
        }
    }

    /// Read a scenario document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] if the file cannot be read, or
    /// [`ScenarioError::Document`] if it is not a scenario JSON object.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let bytes = std::fs::read(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario: Self =
            serde_json::from_slice(&bytes).map_err(|source| ScenarioError::Document {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            name = scenario.name,
            width = scenario.width(),
            height = scenario.height(),
            "Scenario loaded"
        );
        Ok(scenario)
    }

    /// Write this scenario to disk as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::NothingToSave`] if there are no rows, or
    /// [`ScenarioError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ScenarioError> {
        if self.rows.is_empty() {
            return Err(ScenarioError::NothingToSave);
        }
        let json = serde_json::to_vec_pretty(self).map_err(|source| ScenarioError::Document {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), name = self.name, "Scenario saved");
        Ok(())
    }
}

/// Load a scenario document and decode it into a grid.
///
/// # Errors
///
/// Any [`ScenarioError`] from loading, or [`ScenarioError::Malformed`] if
/// the rows are invalid.
pub fn load_grid(path: &Path) -> Result<Grid, ScenarioError> {
    Ok(Scenario::load(path)?.decode()?)
}
