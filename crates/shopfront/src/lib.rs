//! # Shopfront
//!
//! The client-side session kit for the Shopfront storefront: token
//! lifecycle, role-gated navigation, and cross-tab session sync over a
//! remote REST auth backend.
//!
//! This meta-crate ties the layers together — store, API client,
//! session manager, access guard — behind one builder and one error
//! type. The sub-crates remain usable on their own.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use shopfront::prelude::*;
//!
//! # async fn run() -> Result<(), ShopfrontError> {
//! let shop = Shopfront::builder()
//!     .base_url("https://shop.example.com")
//!     .session_file("/tmp/shopfront-session.json")
//!     .build()?;
//!
//! let outcome = shop
//!     .session()
//!     .login(Credentials::new("ada@shop.test", "secret"))
//!     .await?;
//! println!("signed in as {}, go to {}", outcome.role, outcome.redirect);
//! # Ok(())
//! # }
//! ```

mod error;
mod kit;

pub use error::ShopfrontError;
pub use kit::{Shopfront, ShopfrontBuilder};

/// The working set, importable in one line.
pub mod prelude {
    pub use shopfront_api::{ApiConfig, ApiError, AuthApi, HttpAuthApi};
    pub use shopfront_guard::{AccessGuard, Navigator};
    pub use shopfront_protocol::{
        ApiUser, Credentials, Role, TokenClaims, UserProfile,
    };
    pub use shopfront_session::{
        LoginOutcome, PageTargets, SessionError, SessionEvent,
        SessionManager, SessionState,
    };
    pub use shopfront_store::{
        FileStore, MemoryStore, StoredSession, TokenStore,
    };

    pub use crate::{Shopfront, ShopfrontBuilder, ShopfrontError};
}
