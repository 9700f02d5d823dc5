//! API client layer for Shopfront.
//!
//! Provides the [`AuthApi`] trait that abstracts over the remote auth
//! backend, and [`HttpAuthApi`], the production implementation speaking
//! JSON over HTTP.
//!
//! # Why a trait?
//!
//! The session layer doesn't care how the backend is reached — it needs
//! three operations with well-defined failure modes. Putting a trait at
//! this seam lets us:
//! - use the real HTTP client in production
//! - use an in-process stub in session and guard tests
//! - swap transports without touching session logic
//!
//! The client itself is *stateless*: it holds no token. Callers that
//! want authenticated requests pass the bearer token explicitly — the
//! session layer owns where tokens come from.

#![allow(async_fn_in_trait)]

mod client;
mod error;

pub use client::{ApiConfig, HttpAuthApi};
pub use error::ApiError;

use shopfront_protocol::{
    ApiUser, Credentials, LoginResponse, LogoutResponse,
};

/// The remote auth backend, reduced to the operations the session layer
/// consumes.
///
/// ## Trait bounds
///
/// - `Send + Sync` → shared across async tasks.
/// - `'static` → owns its data; lives as long as the session manager.
/// - Futures are `Send` so session operations can run inside spawned
///   tasks.
pub trait AuthApi: Send + Sync + 'static {
    /// Exchanges credentials for a bearer token and the user it
    /// identifies. `POST /api/auth/login`.
    ///
    /// # Errors
    /// - [`ApiError::Http`] — the backend rejected the credentials
    ///   (or anything else with a status code)
    /// - [`ApiError::Network`] — no usable response at all
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<LoginResponse, ApiError>> + Send;

    /// Tells the backend to invalidate the session behind `token`.
    /// `POST /api/auth/logout` with `Authorization: Bearer <token>`.
    ///
    /// Callers treat this as best-effort: local invalidation never
    /// waits on the outcome.
    fn logout(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<LogoutResponse, ApiError>> + Send;

    /// Re-fetches the profile of the user behind `token`.
    /// `GET /api/auth/me` with bearer. A 401 here is the backend saying
    /// the token is dead — the session layer reacts by logging out
    /// locally.
    fn fetch_profile(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<ApiUser, ApiError>> + Send;
}
