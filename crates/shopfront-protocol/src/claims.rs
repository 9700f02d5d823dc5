//! Decoding the structured payload embedded in a bearer token.
//!
//! The backend issues JWT-shaped tokens: three base64url segments joined
//! by dots, `header.payload.signature`. The client never verifies the
//! signature — it has no key, and the backend re-checks the token on
//! every authenticated request anyway. What the client *does* need is the
//! middle segment: who the session belongs to and which role it carries.
//!
//! Decoding is a pure read. It never touches the store, and every failure
//! mode collapses to "this token carries no readable session" at the
//! layer above.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::types::lenient_role;
use crate::{ProtocolError, Role};

/// The claims embedded in a bearer token's payload segment.
///
/// Only the claims the storefront actually reads are modeled; unknown
/// claims in the payload are ignored by serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the identity the token was issued for.
    pub sub: String,

    /// The access tier embedded at issuance. Lenient on decode: an
    /// unknown label reads as `None` rather than failing the token.
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,

    /// Issued-at, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,

    /// Expiry, seconds since the Unix epoch.
    ///
    /// Surfaced for display and diagnostics only. Session validity does
    /// not consult it: a session lives until logout or until the backend
    /// rejects the token with a 401.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

impl TokenClaims {
    /// Decodes the claims from a raw bearer token.
    ///
    /// # Errors
    /// - [`ProtocolError::MalformedToken`] — not three dot-joined segments
    /// - [`ProtocolError::Base64`] — payload segment is not base64url
    /// - [`ProtocolError::Decode`] — payload is not the expected JSON
    pub fn decode(token: &str) -> Result<Self, ProtocolError> {
        let mut segments = token.split('.');
        // `next()` three times, then make sure nothing is left over.
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(ProtocolError::MalformedToken);
        };

        let bytes = URL_SAFE_NO_PAD.decode(payload)?;
        serde_json::from_slice(&bytes).map_err(ProtocolError::Decode)
    }

    /// Encodes these claims as an *unsigned* JWT-shaped token.
    ///
    /// The signature segment is a fixed placeholder — the result decodes
    /// with [`TokenClaims::decode`] but will never pass backend
    /// verification. This exists for stub backends and tests; real
    /// tokens are minted by the remote API.
    pub fn encode_unsigned(&self) -> Result<String, ProtocolError> {
        let header =
            URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(self).map_err(ProtocolError::Encode)?,
        );
        Ok(format!("{header}.{payload}.unsigned"))
    }

    /// The effective access tier: the embedded role, or `user` when the
    /// token carries none.
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or_default()
    }

    /// Whether the token's nominal expiry lies before `now_secs`.
    ///
    /// Diagnostic only — see the note on [`TokenClaims::exp`].
    pub fn is_expired_at(&self, now_secs: u64) -> bool {
        self.exp.is_some_and(|exp| exp < now_secs)
    }
}

// =========================================================================
// Tests
// =========================================================================
