//! Error types for the API layer.

/// Errors produced while talking to the auth backend.
///
/// The split between [`Http`](ApiError::Http) and
/// [`Network`](ApiError::Network) is load-bearing: an HTTP failure means
/// the backend answered and said no (callers branch on the status — a
/// 401 means the token is dead), while a network failure means nothing
/// answered at all (callers retry or degrade, but learn nothing about
/// the session).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured base URL doesn't parse, or a path failed to join
    /// onto it. Caught at construction in the usual case.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The backend answered with a non-success status.
    ///
    /// `message` carries the optional human-readable `message` field of
    /// the JSON error body, for user-facing display.
    #[error("request rejected: HTTP {status}")]
    Http {
        status: u16,
        message: Option<String>,
    },

    /// No usable response: connection refused, DNS failure, timeout, or
    /// a success body that didn't decode.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// The HTTP status, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` when the backend explicitly rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The backend's human-readable message, when present.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
