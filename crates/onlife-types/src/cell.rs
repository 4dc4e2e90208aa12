//! Cell kinds and the per-cell value type.
//!
//! A [`Cell`] is a closed sum type: only [`Cell::Fire`] carries a payload
//! (the remaining lifetime before it burns out), so a grass, water, rock or
//! life cell can never hold a stale counter. [`CellKind`] is the payload-free
//! projection used for symbol mapping, counting, and comparisons.
//!
//! # Symbols
//!
//! | Kind  | Symbol | Also accepted | Glyph |
//! |-------|--------|---------------|-------|
//! | Rock  | `.`    | `·`, `R`      | 🪨    |
//! | Grass | `G`    |               | 🌱    |
//! | Water | `W`    |               | 💧    |
//! | Life  | `L`    |               | 🧡    |
//! | Fire  | `F`    | `🔥`          | 🔥    |

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifetime, in generations, of a freshly ignited fire.
pub const DEFAULT_FIRE_LIFETIME: u32 = 3;

/// The terrain or state category of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Flammable ground. Ignites when a fire touches it orthogonally.
    Grass,
    /// A burning cell with a finite lifetime.
    Fire,
    /// Inert and permanent. Extinguishes adjacent fire.
    Water,
    /// Inert ground; the "dead" half of the life rule.
    #[serde(alias = "Empty")]
    Rock,
    /// A living cell governed by the Conway rule.
    Life,
}

impl CellKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 5] = [Self::Grass, Self::Fire, Self::Water, Self::Rock, Self::Life];

    /// The canonical one-character symbol used by scenarios and the wire format.
    pub const fn symbol(self) -> char {
        match self {
            Self::Rock => '.',
            Self::Grass => 'G',
            Self::Water => 'W',
            Self::Life => 'L',
            Self::Fire => 'F',
        }
    }

    /// Parse a scenario symbol, including the alternate spellings.
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | '·' | 'R' => Some(Self::Rock),
            'G' => Some(Self::Grass),
            'W' => Some(Self::Water),
            'L' => Some(Self::Life),
            'F' | '🔥' => Some(Self::Fire),
            _ => None,
        }
    }

    /// Emoji used when rendering a grid for humans.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Grass => "🌱",
            Self::Fire => "🔥",
            Self::Water => "💧",
            Self::Rock => "🪨",
            Self::Life => "🧡",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Cell {
    /// See [`CellKind::Grass`].
    Grass,
    /// See [`CellKind::Fire`].
    Fire {
        /// Generations left before the fire burns out to rock.
        remaining: u32,
    },
    /// See [`CellKind::Water`].
    Water,
    /// See [`CellKind::Rock`].
    #[default]
    Rock,
    /// See [`CellKind::Life`].
    Life,
}

impl Cell {
    /// A fresh cell of the given kind. Fire starts at [`DEFAULT_FIRE_LIFETIME`].
    pub const fn new(kind: CellKind) -> Self {
        match kind {
            CellKind::Grass => Self::Grass,
            CellKind::Fire => Self::fire(DEFAULT_FIRE_LIFETIME),
            CellKind::Water => Self::Water,
            CellKind::Rock => Self::Rock,
            CellKind::Life => Self::Life,
        }
    }

    /// A fire cell with an explicit remaining lifetime.
    pub const fn fire(remaining: u32) -> Self {
        Self::Fire { remaining }
    }

    /// The payload-free kind of this cell.
    pub const fn kind(self) -> CellKind {
        match self {
            Self::Grass => CellKind::Grass,
            Self::Fire { .. } => CellKind::Fire,
            Self::Water => CellKind::Water,
            Self::Rock => CellKind::Rock,
            Self::Life => CellKind::Life,
        }
    }

    /// The fire countdown, or 0 for every other kind.
    pub const fn counter(self) -> u32 {
        match self {
            Self::Fire { remaining } => remaining,
            Self::Grass | Self::Water | Self::Rock | Self::Life => 0,
        }
    }

    /// Whether this cell is of `kind`.
    pub fn is(self, kind: CellKind) -> bool {
        self.kind() == kind
    }

    /// Shorthand for `self.kind().symbol()`.
    pub const fn symbol(self) -> char {
        self.kind().symbol()
    }
}

impl From<CellKind> for Cell {
    fn from(kind: CellKind) -> Self {
        Self::new(kind)
    }
}
