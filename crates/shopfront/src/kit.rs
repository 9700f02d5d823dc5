//! `Shopfront` builder and the assembled kit.
//!
//! This is the entry point for pages: it wires the production layers —
//! file-backed store, HTTP API client, session manager — into one
//! handle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use shopfront_api::{ApiConfig, HttpAuthApi};
use shopfront_guard::{AccessGuard, Navigator};
use shopfront_session::{PageTargets, SessionManager};
use shopfront_store::FileStore;

use crate::ShopfrontError;

/// Builder for configuring and assembling the kit.
///
/// # Example
///
/// ```rust,no_run
/// use shopfront::prelude::*;
///
/// # fn run() -> Result<(), ShopfrontError> {
/// let shop = Shopfront::builder()
///     .base_url("https://shop.example.com")
///     .session_file("/tmp/session.json")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ShopfrontBuilder {
    base_url: String,
    session_file: PathBuf,
    timeout: Option<Duration>,
    targets: PageTargets,
}

impl ShopfrontBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: ApiConfig::default().base_url,
            session_file: PathBuf::from(".shopfront-session.json"),
            timeout: None,
            targets: PageTargets::default(),
        }
    }

    /// Sets the origin of the remote REST API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets where the session record is persisted.
    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// Sets a whole-request timeout for backend calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the navigation targets (login page, role homes).
    pub fn page_targets(mut self, targets: PageTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Assembles the kit.
    ///
    /// # Errors
    /// [`ShopfrontError::Api`] when the base URL doesn't parse or the
    /// HTTP stack fails to initialize.
    pub fn build(self) -> Result<Shopfront, ShopfrontError> {
        let api = HttpAuthApi::new(ApiConfig {
            base_url: self.base_url,
            timeout: self.timeout,
        })?;
        let store = FileStore::new(self.session_file);
        let session =
            Arc::new(SessionManager::new(store, api, self.targets));

        Ok(Shopfront { session })
    }
}

impl Default for ShopfrontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The assembled client kit: one session manager over the production
/// store and API client, plus guards on demand.
pub struct Shopfront {
    session: Arc<SessionManager<FileStore, HttpAuthApi>>,
}

impl Shopfront {
    /// Creates a new builder.
    pub fn builder() -> ShopfrontBuilder {
        ShopfrontBuilder::new()
    }

    /// The session manager. Cheap to clone the `Arc`; every page of the
    /// tab shares this one instance.
    pub fn session(&self) -> Arc<SessionManager<FileStore, HttpAuthApi>> {
        Arc::clone(&self.session)
    }

    /// Builds an access guard for a page, redirecting through
    /// `navigator`.
    pub fn guard<N: Navigator>(
        &self,
        navigator: N,
    ) -> AccessGuard<FileStore, HttpAuthApi, N> {
        AccessGuard::new(self.session(), navigator)
    }
}
