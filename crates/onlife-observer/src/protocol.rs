//! Observer command protocol.
//!
//! Each inbound `WebSocket` frame is one JSON object with a `type` field.
//! [`dispatch`] turns a frame into a [`Reply`]: either a state message for
//! every observer (after a tick) or a message for the sender alone (a state
//! read, or an error). A bad frame never closes the connection and never
//! touches the simulation.
//!
//! | Frame                | Effect                     | Reply                          |
//! |----------------------|----------------------------|--------------------------------|
//! | `{"type":"tick"}`    | advance one generation     | broadcast state                |
//! | `{"type":"state"}`   | none                       | private state                  |
//! | unknown/missing type | none                       | private `unknown command`      |
//! | not a JSON object    | none                       | private `invalid command: ...` |

use onlife_core::{GridSnapshot, Simulation};
use onlife_types::{ClientCommand, ServerMessage};
use serde::Deserialize;
use serde::de::Error as _;
use tracing::debug;

use crate::error::ProtocolError;

/// Where the result of a command goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Send to the requesting observer only.
    Private(ServerMessage),
    /// Send to every registered observer.
    Broadcast(ServerMessage),
}

/// Just enough structure to read the command tag.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Parse one inbound frame.
///
/// # Errors
///
/// [`ProtocolError::Invalid`] if the frame is not a JSON object with an
/// optional string `type`; [`ProtocolError::UnknownCommand`] if `type` is
/// missing or unrecognised.
pub fn parse_command(raw: &[u8]) -> Result<ClientCommand, ProtocolError> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    if !value.is_object() {
        return Err(ProtocolError::Invalid(serde_json::Error::custom(
            "expected a JSON object",
        )));
    }
    let envelope: Envelope = serde_json::from_value(value)?;
    envelope
        .kind
        .as_deref()
        .and_then(ClientCommand::from_type)
        .ok_or(ProtocolError::UnknownCommand(envelope.kind))
}

/// The state message for a snapshot.
pub fn state_message(snapshot: &GridSnapshot) -> ServerMessage {
    ServerMessage::State {
        tick: snapshot.generation,
        grid: snapshot.grid.symbol_rows(),
    }
}

/// Execute one inbound frame against the simulation.
pub async fn dispatch(simulation: &Simulation, raw: &[u8]) -> Reply {
    match parse_command(raw) {
        Ok(ClientCommand::Tick) => Reply::Broadcast(state_message(&simulation.tick().await)),
        Ok(ClientCommand::State) => Reply::Private(state_message(&simulation.snapshot().await)),
        Err(e) => {
            debug!(error = %e, "Rejected observer command");
            Reply::Private(ServerMessage::error(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn sim() -> Simulation {
        Simulation::new(onlife_world::demo_grid())
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(br#"{"type":"tick"}"#).unwrap(), ClientCommand::Tick);
        assert_eq!(
            parse_command(br#"{"type":"state","extra":1}"#).unwrap(),
            ClientCommand::State
        );
    }

    #[test]
    fn unknown_and_missing_types_are_unknown_commands() {
        assert!(matches!(
            parse_command(br#"{"type":"explode"}"#),
            Err(ProtocolError::UnknownCommand(Some(t))) if t == "explode"
        ));
        assert!(matches!(
            parse_command(b"{}"),
            Err(ProtocolError::UnknownCommand(None))
        ));
    }

    #[test]
    fn malformed_frames_are_invalid() {
        for raw in [
            &b"not json"[..],
            b"42",
            br#"{"type":5}"#,
            b"",
            br#"["tick"]"#,
            b"[]",
            br#""tick""#,
        ] {
            assert!(matches!(parse_command(raw), Err(ProtocolError::Invalid(_))));
        }
    }

    #[tokio::test]
    async fn array_frame_does_not_tick() {
        let sim = sim();
        let Reply::Private(ServerMessage::Error { error }) = dispatch(&sim, br#"["tick"]"#).await
        else {
            panic!("expected private error");
        };
        assert_eq!(error, "invalid command: expected a JSON object");
        assert_eq!(sim.generation().await, 0);
    }

    #[tokio::test]
    async fn tick_is_broadcast() {
        let sim = sim();
        let (tick, grid) = match dispatch(&sim, br#"{"type":"tick"}"#).await {
            Reply::Broadcast(ServerMessage::State { tick, grid }) => (tick, grid),
            other => panic!("expected broadcast state, got {other:?}"),
        };
        assert_eq!(tick, 1);
        assert_eq!(grid, onlife_world::demo_grid().advance().symbol_rows());
    }

    #[tokio::test]
    async fn state_is_private_and_does_not_advance() {
        let sim = sim();
        let reply = dispatch(&sim, br#"{"type":"state"}"#).await;
        assert_eq!(
            reply,
            Reply::Private(state_message(&sim.snapshot().await))
        );
        assert_eq!(sim.generation().await, 0);
    }

    #[tokio::test]
    async fn errors_are_private_and_leave_simulation_alone() {
        let sim = sim();
        assert_eq!(
            dispatch(&sim, br#"{"type":"nope"}"#).await,
            Reply::Private(ServerMessage::error("unknown command"))
        );
        let Reply::Private(ServerMessage::Error { error }) = dispatch(&sim, b"{oops").await else {
            panic!("expected private error");
        };
        assert!(error.starts_with("invalid command: "));
        assert_eq!(sim.generation().await, 0);
    }

    #[test]
    fn state_message_uses_row_major_symbols() {
        let snapshot = GridSnapshot {
            grid: onlife_world::demo_grid(),
            generation: 9,
        };
        let ServerMessage::State { tick, grid } = state_message(&snapshot) else {
            panic!("expected state");
        };
        assert_eq!(tick, 9);
        assert_eq!(grid.get(2).cloned(), Some(vec!['W', 'G', 'F', 'G', 'W']));
    }
}
