//! `WebSocket` handler for interactive observers.
//!
//! Clients connect to `GET /ws`. On connect the observer is registered with
//! the hub and sent the current state. Each text or binary frame it sends is
//! run through [`protocol::dispatch`]: a tick result goes to every observer,
//! anything else goes back to the sender only.
//!
//! Each connection is split in two. A writer task drains a bounded channel
//! into the socket; the channel's sender is what the hub holds, so a
//! broadcast never waits on a slow client. Delivery fails once the channel
//! is full (the peer stopped reading) or closed (the writer ended), and the
//! hub prunes the observer in that same broadcast.
//!
//! [`protocol::dispatch`]: crate::protocol::dispatch

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use onlife_types::{ObserverId, ServerMessage};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::error::DeliveryError;
use crate::hub::ObserverSink;
use crate::protocol::{self, Reply};
use crate::state::AppState;

/// Frames that may wait for one observer's writer before it is dropped.
pub const OBSERVER_QUEUE_CAPACITY: usize = 32;

/// The write half of one observer connection, as held by the hub.
pub type ConnectionSink = mpsc::Sender<Message>;

/// Queue a frame without waiting.
fn enqueue(tx: &ConnectionSink, message: Message) -> Result<(), DeliveryError> {
    tx.try_send(message).map_err(|e| match e {
        TrySendError::Full(_) => DeliveryError::Disconnected(String::from("send queue full")),
        TrySendError::Closed(_) => DeliveryError::Disconnected(String::from("writer closed")),
    })
}

impl ObserverSink for ConnectionSink {
    fn deliver(&self, payload: &Arc<str>) -> Result<(), DeliveryError> {
        enqueue(self, Message::Text(payload.to_string().into()))
    }
}

/// Upgrade an HTTP request to an observer connection.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Serialise `message` and queue it for one observer only.
fn send_private(tx: &ConnectionSink, message: &ServerMessage) -> Result<(), DeliveryError> {
    let json = serde_json::to_string(message)?;
    enqueue(tx, Message::Text(json.into()))
}

/// Register an observer, then greet it with the current state.
///
/// The observer is in the hub before the snapshot is taken, so every tick
/// after the greeting's generation reaches it.
async fn join(state: &AppState, id: ObserverId, tx: &ConnectionSink) {
    state.hub.add(id, tx.clone()).await;
    info!(observer = %id, "Observer connected");

    let greeting = protocol::state_message(&state.simulation.snapshot().await);
    if let Err(e) = send_private(tx, &greeting) {
        debug!(observer = %id, error = %e, "Initial state not delivered");
    }
}

/// Run one observer connection to completion.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let id = ObserverId::new();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<Message>(OBSERVER_QUEUE_CAPACITY);

    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    join(&state, id, &tx).await;

    while let Some(frame) = receiver.next().await {
        let raw = match frame {
            Ok(Message::Text(text)) => text.as_str().as_bytes().to_vec(),
            Ok(Message::Binary(bytes)) => bytes.to_vec(),
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(_) | Message::Pong(_)) => continue,
            Err(e) => {
                debug!(observer = %id, error = %e, "WebSocket read failed");
                break;
            }
        };

        match protocol::dispatch(&state.simulation, &raw).await {
            Reply::Broadcast(message) => match state.hub.broadcast(&message).await {
                Ok(report) => debug!(
                    observer = %id,
                    tick = ?message.tick(),
                    delivered = report.delivered,
                    pruned = report.pruned,
                    "State broadcast"
                ),
                Err(e) => warn!(error = %e, "Failed to serialise state broadcast"),
            },
            Reply::Private(message) => {
                if let Err(e) = send_private(&tx, &message) {
                    debug!(observer = %id, error = %e, "Reply not delivered");
                    break;
                }
            }
        }
    }

    state.hub.remove(id).await;
    drop(tx);
    writer.abort();
    info!(observer = %id, "Observer disconnected");
}
