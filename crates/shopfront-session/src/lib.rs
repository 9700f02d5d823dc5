//! Session management for Shopfront.
//!
//! This crate owns the client's belief about who is signed in:
//!
//! 1. **Transitions** — login and logout, the only two ways the belief
//!    changes on purpose ([`SessionManager`])
//! 2. **Queries** — deriving Anonymous/Authenticated from the token
//!    store, without ever mutating it
//! 3. **Notifications** — session events for the presentation layer,
//!    plus cross-tab revalidation when another tab touches the store
//!
//! # How it fits in the stack
//!
//! ```text
//! Guard Layer (above)     ← asks "who is this?" before gating a page
//!     ↕
//! Session Layer (this crate)  ← sole owner of session transitions
//!     ↕
//! Store + API Layer (below)   ← persistence and the remote backend
//! ```
//!
//! There is exactly one `SessionManager` per page/tab, constructed
//! explicitly and injected where needed — no ambient globals.

mod error;
mod manager;
mod nav;
mod state;

pub use error::SessionError;
pub use manager::SessionManager;
pub use nav::PageTargets;
pub use state::{LoginOutcome, SessionEvent, SessionState};
