//! In-memory token store for tests and ephemeral sessions.

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use crate::{EVENT_BUFFER, StoreEvent, StoredSession, TokenStore};

/// A [`TokenStore`] backed by process memory.
///
/// Clones share one slot and one event channel, which makes this the
/// store of choice for cross-tab tests: each clone is a "tab", mutations
/// through any of them are visible to all.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    slot: RwLock<Option<StoredSession>>,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            inner: Arc::new(Inner {
                slot: RwLock::new(None),
                events,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<StoredSession> {
        let slot = match self.inner.slot.read() {
            Ok(slot) => slot,
            Err(poisoned) => {
                // A panicking writer poisons the lock; the data is a
                // plain Option and stays readable.
                tracing::warn!("memory store lock poisoned, reading anyway");
                poisoned.into_inner()
            }
        };
        slot.clone().filter(|s| !s.token.is_empty())
    }

    fn save(&self, session: &StoredSession) {
        match self.inner.slot.write() {
            Ok(mut slot) => *slot = Some(session.clone()),
            Err(poisoned) => *poisoned.into_inner() = Some(session.clone()),
        }
        let _ = self.inner.events.send(StoreEvent::Saved);
    }

    fn clear(&self) {
        match self.inner.slot.write() {
            Ok(mut slot) => *slot = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        let _ = self.inner.events.send(StoreEvent::Cleared);
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }
}

// =========================================================================
// Tests
// =========================================================================
