//! Error types for the protocol layer.
//!
//! Each crate in Shopfront defines its own error enum. A `ProtocolError`
//! always means "this piece of data doesn't parse" — never a network or
//! storage problem.

/// Errors that can occur while decoding shared types.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The token is not three dot-joined segments. Opaque (non-JWT)
    /// tokens land here; the session layer treats them as carrying no
    /// readable claims.
    #[error("token is not a three-segment claims token")]
    MalformedToken,

    /// The payload segment is not valid base64url.
    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload decoded to bytes but is not the expected JSON shape.
    #[error("claims decode failed: {0}")]
    Decode(serde_json::Error),

    /// Serializing claims failed (only reachable from the stub-token
    /// encoder).
    #[error("claims encode failed: {0}")]
    Encode(serde_json::Error),

    /// A role label outside the closed set, from the strict
    /// [`FromStr`](std::str::FromStr) parse. The lenient paths never
    /// produce this.
    #[error("unknown role {0:?}")]
    UnknownRole(String),
}
