//! Fetch lifecycle events.
//!
//! The orchestrator reports every request it starts and how it ended. The
//! store already carries the resulting state; these events exist for
//! adapters that want a timeline (progress output, logs, tests).
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "completed", "generation": 3, "records": 20, "totalPages": 3 }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::FetchError;

/// Broadcast channel capacity for fetch events.
const CHANNEL_CAPACITY: usize = 64;

/// What happened to one fetch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FetchEvent {
    /// A request began; the store now shows `loading`.
    Started {
        generation: u64,
        page: u32,
        #[serde(rename = "pageSize")]
        page_size: u32,
    },

    /// The request succeeded and its records were committed.
    Completed {
        generation: u64,
        records: usize,
        #[serde(rename = "totalPages")]
        total_pages: u32,
    },

    /// The request failed and its error was committed.
    Failed { generation: u64, error: FetchError },

    /// A newer request superseded this one; its outcome was dropped.
    Discarded { generation: u64 },
}

impl FetchEvent {
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Started { generation, .. }
            | Self::Completed { generation, .. }
            | Self::Failed { generation, .. }
            | Self::Discarded { generation } => *generation,
        }
    }
}

/// Sink for fetch events.
///
/// Fire-and-forget: implementations must not block and handle their own
/// delivery failures.
pub trait FetchEvents: Send + Sync {
    fn emit(&self, event: FetchEvent);
}

/// Discards every event. Default for the CLI and most tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFetchEvents;

impl FetchEvents for NoopFetchEvents {
    fn emit(&self, _event: FetchEvent) {}
}

/// Fans events out to any number of `broadcast` receivers.
pub struct BroadcastFetchEvents {
    sender: broadcast::Sender<FetchEvent>,
}

impl BroadcastFetchEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FetchEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastFetchEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchEvents for BroadcastFetchEvents {
    fn emit(&self, event: FetchEvent) {
        // Only log if there are receivers
        if self.sender.receiver_count() > 0 {
            debug!(target: "charview.fetch", ?event, "Broadcasting fetch event");
            let _ = self.sender.send(event);
        }
    }
}
