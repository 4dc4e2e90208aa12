//! Registry of connected observers with self-pruning broadcast.
//!
//! The hub maps each [`ObserverId`] to a sink. A broadcast serialises the
//! message once, then walks the whole registry under the hub's own lock
//! (never the simulation lock) and hands the payload to every sink. A sink
//! that refuses delivery is removed in that same pass, so a dead connection
//! disappears the next time something is sent to it. Failed deliveries are
//! not retried and are not reported to whoever triggered the broadcast.

use std::collections::BTreeMap;
use std::sync::Arc;

use onlife_types::ObserverId;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::DeliveryError;

/// Something a serialised message can be handed to.
pub trait ObserverSink: Send + Sync {
    /// Hand over one payload. An error marks the observer as gone.
    fn deliver(&self, payload: &Arc<str>) -> Result<(), DeliveryError>;
}

/// Outcome of one [`ObserverHub::broadcast`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Observers that accepted the message.
    pub delivered: usize,
    /// Observers removed because delivery failed.
    pub pruned: usize,
}

/// The set of currently registered observers.
#[derive(Debug)]
pub struct ObserverHub<S> {
    observers: Mutex<BTreeMap<ObserverId, S>>,
}

impl<S: ObserverSink> ObserverHub<S> {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(BTreeMap::new()),
        }
    }

    /// Register `sink` under `id`. Returns `false` if `id` was already
    /// present, in which case its sink is replaced.
    pub async fn add(&self, id: ObserverId, sink: S) -> bool {
        self.observers.lock().await.insert(id, sink).is_none()
    }

    /// Unregister `id`. Removing an absent observer is a no-op that returns
    /// `false`.
    pub async fn remove(&self, id: ObserverId) -> bool {
        self.observers.lock().await.remove(&id).is_some()
    }

    /// Whether `id` is registered.
    pub async fn contains(&self, id: ObserverId) -> bool {
        self.observers.lock().await.contains_key(&id)
    }

    /// Number of registered observers.
    pub async fn len(&self) -> usize {
        self.observers.lock().await.len()
    }

    /// Whether no observer is registered.
    pub async fn is_empty(&self) -> bool {
        self.observers.lock().await.is_empty()
    }

    /// Serialise `message` once and deliver it to every observer, pruning
    /// those whose delivery fails.
    ///
    /// # Errors
    ///
    /// Returns the serialisation error, in which case nothing is sent and
    /// membership is unchanged.
    pub async fn broadcast<M: Serialize>(
        &self,
        message: &M,
    ) -> Result<BroadcastReport, serde_json::Error> {
        let payload: Arc<str> = serde_json::to_string(message)?.into();
        let mut report = BroadcastReport::default();

        let mut observers = self.observers.lock().await;
        observers.retain(|id, sink| match sink.deliver(&payload) {
            Ok(()) => {
                report.delivered = report.delivered.saturating_add(1);
                true
            }
            Err(e) => {
                debug!(observer = %id, error = %e, "Pruning observer after failed delivery");
                report.pruned = report.pruned.saturating_add(1);
                false
            }
        });

        Ok(report)
    }
}

impl<S: ObserverSink> Default for ObserverHub<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    /// Records every payload; fails once `broken` is set.
    #[derive(Debug, Default)]
    struct RecordingSink {
        received: StdMutex<Vec<String>>,
        broken: AtomicBool,
    }

    impl ObserverSink for Arc<RecordingSink> {
        fn deliver(&self, payload: &Arc<str>) -> Result<(), DeliveryError> {
            if self.broken.load(Ordering::Acquire) {
                return Err(DeliveryError::Disconnected(String::from("broken pipe")));
            }
            self.received.lock().unwrap().push(payload.to_string());
            Ok(())
        }
    }

    fn received(sink: &RecordingSink) -> Vec<String> {
        sink.received.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn add_and_remove_are_explicit_and_idempotent() {
        let hub = ObserverHub::new();
        let id = ObserverId::new();
        assert!(hub.is_empty().await);

        assert!(hub.add(id, Arc::new(RecordingSink::default())).await);
        assert!(hub.contains(id).await);
        assert_eq!(hub.len().await, 1);

        assert!(hub.remove(id).await);
        assert!(!hub.remove(id).await);
        assert!(hub.is_empty().await);
    }

    #[tokio::test]
    async fn broadcast_reaches_every_observer() {
        let hub = ObserverHub::new();
        let a = Arc::new(RecordingSink::default());
        let b = Arc::new(RecordingSink::default());
        hub.add(ObserverId::new(), Arc::clone(&a)).await;
        hub.add(ObserverId::new(), Arc::clone(&b)).await;

        let report = hub.broadcast(&serde_json::json!({"n": 1})).await.unwrap();

        assert_eq!(report, BroadcastReport { delivered: 2, pruned: 0 });
        assert_eq!(received(&a), vec![r#"{"n":1}"#]);
        assert_eq!(received(&b), vec![r#"{"n":1}"#]);
    }

    #[tokio::test]
    async fn failed_delivery_prunes_only_that_observer() {
        let hub = ObserverHub::new();
        let (id_a, id_b) = (ObserverId::new(), ObserverId::new());
        let a = Arc::new(RecordingSink::default());
        let b = Arc::new(RecordingSink::default());
        b.broken.store(true, Ordering::Release);
        hub.add(id_a, Arc::clone(&a)).await;
        hub.add(id_b, Arc::clone(&b)).await;

        let report = hub.broadcast(&"tick").await.unwrap();

        assert_eq!(report, BroadcastReport { delivered: 1, pruned: 1 });
        assert!(hub.contains(id_a).await);
        assert!(!hub.contains(id_b).await);
        assert_eq!(hub.len().await, 1);
        assert_eq!(received(&a), vec!["\"tick\""]);
        assert!(received(&b).is_empty());
    }

    #[tokio::test]
    async fn pruned_observer_is_not_retried() {
        let hub = ObserverHub::new();
        let dead = Arc::new(RecordingSink::default());
        dead.broken.store(true, Ordering::Release);
        hub.add(ObserverId::new(), Arc::clone(&dead)).await;

        hub.broadcast(&1).await.unwrap();
        dead.broken.store(false, Ordering::Release);
        let report = hub.broadcast(&2).await.unwrap();

        assert_eq!(report, BroadcastReport::default());
        assert!(received(&dead).is_empty());
    }

    #[tokio::test]
    async fn broadcast_to_empty_hub_is_a_no_op() {
        let hub: ObserverHub<Arc<RecordingSink>> = ObserverHub::new();
        assert_eq!(hub.broadcast(&"x").await.unwrap(), BroadcastReport::default());
    }
}
