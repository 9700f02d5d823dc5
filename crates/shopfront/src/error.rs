//! Unified error type for the Shopfront kit.

use shopfront_api::ApiError;
use shopfront_protocol::ProtocolError;
use shopfront_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `shopfront` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attribute on each variant auto-generates `From` impls, so
/// the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ShopfrontError {
    /// A data-level error (token claims, role labels).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A backend error (rejected request, unreachable network, bad
    /// base URL).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A session-transition error (validation, surfaced login failure).
    #[error(transparent)]
    Session(#[from] SessionError),
}
