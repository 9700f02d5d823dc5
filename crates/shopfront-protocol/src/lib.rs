//! Shared types for Shopfront's client/backend contract.
//!
//! This crate defines everything the other layers agree on:
//!
//! 1. **Identity** — [`Role`], [`UserProfile`], [`Credentials`]
//! 2. **Wire shapes** — the JSON bodies of the auth endpoints
//!    ([`LoginResponse`], [`LogoutResponse`], [`ApiFailure`])
//! 3. **Token claims** — decoding the payload embedded in the bearer
//!    token ([`TokenClaims`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Guard / Session Layer (above)  ← derives roles and states from these types
//!     ↕
//! Protocol Layer (this crate)    ← the shared vocabulary
//!     ↕
//! Store / API Layer (below)      ← persists and transmits them
//! ```

mod claims;
mod error;
mod types;

pub use claims::TokenClaims;
pub use error::ProtocolError;
pub use types::{
    ApiFailure, ApiUser, Credentials, LoginResponse, LogoutResponse, Role,
    UserProfile,
};
