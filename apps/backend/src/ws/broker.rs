//! In-process change notification channel.
//!
//! Events are hints only: delivery may lag, drop or duplicate, and receivers
//! are expected to re-read state rather than trust the payload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    /// A new canonical state version was committed.
    StateAvailable { room_id: String, version: u32 },
    /// Room membership, readiness or status changed.
    RoomChanged { room_id: String },
}

impl EventEnvelope {
    pub fn room_id(&self) -> &str {
        match self {
            EventEnvelope::StateAvailable { room_id, .. } => room_id,
            EventEnvelope::RoomChanged { room_id } => room_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<EventEnvelope>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.tx.subscribe()
    }

    /// Publish a "state_available" event. Never fails the caller.
    pub fn publish_state(&self, room_id: &str, version: u32) {
        self.publish(EventEnvelope::StateAvailable {
            room_id: room_id.to_string(),
            version,
        });
    }

    /// Publish a "room_changed" event. Never fails the caller.
    pub fn publish_room(&self, room_id: &str) {
        self.publish(EventEnvelope::RoomChanged {
            room_id: room_id.to_string(),
        });
    }

    fn publish(&self, envelope: EventEnvelope) {
        // `send` only errors when nobody is listening.
        if let Err(err) = self.tx.send(envelope) {
            trace!(room_id = err.0.room_id(), "no change listeners");
        }
    }
}
