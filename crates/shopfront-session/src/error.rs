//! Error types for the session layer.

use shopfront_api::ApiError;

/// Errors a session transition can surface to the caller.
///
/// Deliberately small. Claim-decode problems never appear here — they
/// degrade to `Anonymous` inside queries — and logout never fails at
/// all.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A credential field was empty. Rejected before any network call,
    /// so the backend never sees half-filled login forms.
    #[error("missing credential field: {0}")]
    Validation(&'static str),

    /// The backend rejected the transition, or never answered. The
    /// inner error carries the status/message for user display.
    #[error(transparent)]
    Api(#[from] ApiError),
}
