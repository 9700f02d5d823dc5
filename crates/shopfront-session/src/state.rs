//! Session state and event types.

use shopfront_protocol::{Role, UserProfile};

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The client's current belief about the signed-in user.
///
/// A state machine with two states:
///
/// ```text
///   Anonymous ──(login)──→ Authenticated
///       ↑                       │
///       └───────(logout)────────┘
/// ```
///
/// The state is *derived*, not stored: every query re-reads the token
/// store and re-decodes the token, so the belief can never drift from
/// the persisted medium. Anything unreadable — no token, opaque token,
/// corrupt claims — collapses to `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No readable session. The default belief.
    Anonymous,

    /// A session exists. `role` comes from the token's embedded claims
    /// (the authoritative source); `profile` is the cached display
    /// snapshot.
    Authenticated {
        role: Role,
        profile: UserProfile,
    },
}

impl SessionState {
    /// The role, when authenticated.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { role, .. } => Some(*role),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

// ---------------------------------------------------------------------------
// SessionEvent
// ---------------------------------------------------------------------------

/// Notifications the presentation layer subscribes to.
///
/// Redundant events are normal — a login produces both `Established`
/// (from the transition) and `Synced` (from the store change it caused).
/// Subscribers should render from the carried state, not count events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login completed in *this* tab.
    Established(SessionState),

    /// The session was cleared in this tab (logout or forced
    /// invalidation).
    Cleared,

    /// The store changed — possibly from another tab — and the state
    /// was re-derived.
    Synced(SessionState),
}

// ---------------------------------------------------------------------------
// LoginOutcome
// ---------------------------------------------------------------------------

/// What a successful login hands back to the page that submitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// The role the session was established with.
    pub role: Role,

    /// Where this role lands after login: admins on the admin panel,
    /// sellers on the seller panel, everyone else on the storefront.
    pub redirect: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_role() {
        assert_eq!(SessionState::Anonymous.role(), None);
        assert!(!SessionState::Anonymous.is_authenticated());
    }

    #[test]
    fn test_authenticated_exposes_role() {
        let state = SessionState::Authenticated {
            role: Role::Seller,
            profile: UserProfile::default(),
        };
        assert_eq!(state.role(), Some(Role::Seller));
        assert!(state.is_authenticated());
    }
}
