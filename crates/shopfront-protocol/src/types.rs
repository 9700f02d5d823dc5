//! Core identity and wire types for the auth contract.
//!
//! These are the structures that travel between the storefront client and
//! the remote REST backend, plus the role/profile vocabulary every other
//! layer speaks. The JSON shapes here must match the backend exactly —
//! a mismatch means logins silently stop working.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The access tier of a signed-in user.
///
/// This is a *closed* set: the storefront recognizes exactly these three
/// tiers, and every page is gated on one or more of them. Modeling it as
/// an enum (instead of matching on raw strings at each call site) means
/// the compiler checks every dispatch — adding a tier forces every match
/// to be revisited.
///
/// `#[serde(rename_all = "lowercase")]` makes the JSON representation
/// `"admin"` / `"seller"` / `"user"`, which is what the backend embeds
/// in tokens and user objects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Back-office administrator.
    Admin,

    /// Marketplace seller with a seller panel.
    Seller,

    /// Regular shopper. This is the default tier: anything we cannot
    /// positively identify as admin or seller is treated as a plain user.
    #[default]
    User,
}

impl Role {
    /// Parses a role string, falling back to [`Role::User`] on anything
    /// unrecognized.
    ///
    /// Backends evolve: a new or misspelled tier label must degrade to
    /// the least-privileged role, never reject the whole session.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for Role {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "seller" => Ok(Self::Seller),
            "user" => Ok(Self::User),
            other => Err(ProtocolError::UnknownRole(other.to_string())),
        }
    }
}

/// Display matches the wire spelling, so logs and JSON agree.
impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Seller => write!(f, "seller"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Deserializes an optional role leniently: a missing field, `null`, or
/// an unrecognized label all come out as `None`.
///
/// Used for the role slots in [`ApiUser`] and
/// [`TokenClaims`](crate::TokenClaims), where a strange value must not
/// fail the surrounding decode.
pub(crate) fn lenient_role<'de, D>(de: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.as_deref().map(|s| Role::parse_lenient(s)))
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// A login form submission: email + password.
///
/// Serializes to the exact body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the name of the first empty field, if any.
    ///
    /// The session layer rejects incomplete credentials *before* any
    /// network call — see `SessionManager::login`.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.email.trim().is_empty() {
            Some("email")
        } else if self.password.is_empty() {
            Some("password")
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// UserProfile
// ---------------------------------------------------------------------------

/// The cached display fields of a signed-in user.
///
/// This is a *snapshot*: it is written once at login (and on explicit
/// profile refreshes) purely so pages can render a name and email without
/// re-fetching on every load. It is NOT authoritative — access decisions
/// come from the token's embedded role, never from here.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default,
)]
pub struct UserProfile {
    /// Display name shown in the header.
    pub name: String,

    /// Email shown on account pages.
    pub email: String,
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// The user object the backend returns from login and `GET /api/auth/me`.
///
/// The role slot is lenient: older backends omit it, and an unknown label
/// must not fail the decode of an otherwise-good response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUser {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
}

impl ApiUser {
    /// Extracts the display snapshot persisted alongside the token.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Success body of `POST /api/auth/login`: the bearer token plus the
/// user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: ApiUser,
}

/// Body of `POST /api/auth/logout`.
///
/// Informational only — the client invalidates its local session whether
/// or not the server acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}

/// The body shape of a non-2xx response.
///
/// The backend attaches an optional human-readable `message`; anything
/// else in the body is ignored. `Default` gives `message: None`, which is
/// what we fall back to when an error body is not JSON at all.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default,
)]
pub struct ApiFailure {
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================================
// Tests
// =========================================================================
