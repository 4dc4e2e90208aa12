//! Wire messages exchanged with observers over the `WebSocket`.
//!
//! Every message is a JSON object discriminated by its `type` field:
//!
//! ```text
//! -> {"type":"tick"}
//! -> {"type":"state"}
//! <- {"type":"state","tick":4,"grid":[["W","G"],["F","."]]}
//! <- {"type":"error","error":"unknown command"}
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A message the server sends to an observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ServerMessage {
    /// Full grid state at a generation. Sent on connect and after every tick.
    State {
        /// The generation number.
        tick: u64,
        /// One symbol per cell; outer index is the row (`y`), inner the column (`x`).
        grid: Vec<Vec<char>>,
    },
    /// A command could not be handled. Only the requesting observer sees it.
    Error {
        /// Human-readable reason.
        error: String,
    },
}

impl ServerMessage {
    /// Build an error reply.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error {
            error: reason.into(),
        }
    }

    /// The generation carried by a state message.
    pub const fn tick(&self) -> Option<u64> {
        match self {
            Self::State { tick, .. } => Some(*tick),
            Self::Error { .. } => None,
        }
    }
}

/// A command an observer sends to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ClientCommand {
    /// Advance the simulation one generation and broadcast the result.
    Tick,
    /// Reply privately with the current state.
    State,
}

impl ClientCommand {
    /// Look up a command by its `type` tag.
    pub fn from_type(tag: &str) -> Option<Self> {
        match tag {
            "tick" => Some(Self::Tick),
            "state" => Some(Self::State),
            _ => None,
        }
    }
}
