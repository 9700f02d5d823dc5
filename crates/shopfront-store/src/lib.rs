//! The token store: durable session persistence for Shopfront.
//!
//! This crate is the client-side equivalent of the browser's origin
//! storage. It holds exactly one record — the bearer token plus the
//! cached profile snapshot — and guarantees:
//!
//! 1. **Atomic replacement** — writing a new session replaces any prior
//!    one whole; readers never observe half a record.
//! 2. **Degraded reads** — storage failures (missing file, corrupt data,
//!    unwritable disk) surface as "no session", never as errors. The
//!    worst outcome of a broken store is a signed-out user.
//! 3. **Change notifications** — every mutation is broadcast to
//!    subscribers, so other "tabs" (clones of the store) can re-derive
//!    their session view. This is the storage-event analogue: passive
//!    and eventual, not a lock.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (above)  ← derives Anonymous/Authenticated from the record
//!     ↕
//! Store Layer (this crate)  ← owns the persisted medium
//! ```

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use shopfront_protocol::UserProfile;

/// Broadcast buffer for store change events. Small on purpose: a lagging
/// subscriber re-reads the store anyway, so dropped events only cost a
/// redundant refresh.
pub(crate) const EVENT_BUFFER: usize = 16;

// ---------------------------------------------------------------------------
// StoredSession
// ---------------------------------------------------------------------------

/// The single record a token store persists.
///
/// Token and profile live in one serialized blob so they are written and
/// cleared together — there is no observable state where one exists
/// without the other. The token is the ground truth: a record whose
/// token is empty (however it got that way) reads as no session, and any
/// leftover profile data in it is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// The opaque bearer credential issued at login.
    pub token: String,

    /// Display fields cached at login time. Not authoritative.
    #[serde(default)]
    pub profile: UserProfile,
}

impl StoredSession {
    pub fn new(token: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            token: token.into(),
            profile,
        }
    }
}

// ---------------------------------------------------------------------------
// StoreEvent
// ---------------------------------------------------------------------------

/// A change notification emitted after every store mutation.
///
/// Carries no payload — subscribers re-read the store, which also covers
/// the case where several mutations coalesced while they were busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A session record was written (login or profile refresh).
    Saved,

    /// The record was removed (logout or forced invalidation).
    Cleared,
}

// ---------------------------------------------------------------------------
// TokenStore
// ---------------------------------------------------------------------------

/// Durable, synchronously readable session persistence.
///
/// ## Trait bounds
///
/// - `Clone` → a clone shares the same persisted state and the same
///   event channel. Clones model browser tabs: independent readers of
///   one shared medium.
/// - `Send + Sync + 'static` → the store is held inside session managers
///   that live in async tasks.
///
/// ## No error surface
///
/// None of these methods return `Result`. The contract is deliberate:
/// a store that cannot read reports no session, and a store that cannot
/// write logs the failure and moves on. Callers branch on session
/// presence, not on storage health.
pub trait TokenStore: Clone + Send + Sync + 'static {
    /// Reads the current session record, if a readable one exists.
    fn load(&self) -> Option<StoredSession>;

    /// Atomically replaces the session record and notifies subscribers.
    fn save(&self, session: &StoredSession);

    /// Removes the session record entirely and notifies subscribers.
    /// Idempotent — clearing an empty store is a no-op plus an event.
    fn clear(&self);

    /// Subscribes to change notifications from every clone of this
    /// store.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
