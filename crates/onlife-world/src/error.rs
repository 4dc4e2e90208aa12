//! Error types for the `onlife-world` crate.
//!
//! Grid construction fails with [`WorldError`]. Scenario decoding fails with
//! [`MalformedScenario`], and anything that touches storage returns
//! [`ScenarioError`], which wraps the former.

use std::path::PathBuf;

/// Errors that can occur while building or editing a grid.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A row's length differs from the first row's.
    #[error("row {row} has {width} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Cells found in the row.
        width: usize,
        /// Cells in the first row.
        expected: usize,
    },

    /// A coordinate lies outside the grid.
    #[error("({x}, {y}) is outside a {width}x{height} grid")]
    OutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}

/// Reasons a scenario's rows cannot be turned into a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedScenario {
    /// The scenario has no rows at all.
    #[error("scenario has no rows")]
    NoRows,

    /// A row's symbol count differs from the first row's.
    #[error("row {row} has width {width}, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Symbols found in the row.
        width: usize,
        /// Symbols in the first row.
        expected: usize,
    },

    /// A symbol does not map to any cell kind.
    #[error("row {row} col {column}: unknown cell symbol {symbol:?}")]
    UnknownSymbol {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// The offending symbol.
        symbol: char,
    },
}

/// Errors raised while loading, decoding, or saving scenario documents.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The rows do not describe a valid grid.
    #[error("malformed scenario: {0}")]
    Malformed(#[from] MalformedScenario),

    /// Reading or writing the document failed.
    #[error("scenario I/O failed for {}: {source}", path.display())]
    Io {
        /// The document path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not a valid scenario JSON object.
    #[error("invalid scenario document {}: {source}", path.display())]
    Document {
        /// The document path.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A scenario without rows cannot be saved.
    #[error("scenario has no rows to save")]
    NothingToSave,
}
