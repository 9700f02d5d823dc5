//! The session manager: sole owner of session transitions.
//!
//! Every way the client's belief about the signed-in user can change
//! goes through here:
//! - `login` — the only path that writes a new session
//! - `logout` — the only path that deliberately destroys one
//! - `refresh_profile` — re-syncs the display snapshot (and honors the
//!   backend declaring the token dead)
//! - `query_state` — the read side, pure and infallible
//!
//! # Concurrency note
//!
//! `SessionManager` holds no session state of its own — everything is
//! derived from the token store on demand. Two overlapping logins are
//! allowed to race at the API layer; whichever response lands last wins
//! the store. There is no lock, and none is needed: the store's writes
//! are atomic, and readers tolerate eventual consistency.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use shopfront_api::AuthApi;
use shopfront_protocol::{Credentials, TokenClaims};
use shopfront_store::{StoredSession, TokenStore};

use crate::{
    LoginOutcome, PageTargets, SessionError, SessionEvent, SessionState,
};

/// Buffer for session event subscribers. Lagging subscribers can always
/// re-query the state, so a small buffer is enough.
const EVENT_BUFFER: usize = 16;

/// Orchestrates login, logout, and session queries for one tab.
///
/// ## Lifecycle
///
/// ```text
/// login() ──→ [Authenticated] ──→ logout() ──→ [Anonymous]
///                   │                               ↑
///                   └── refresh_profile() ── 401 ───┘
/// ```
///
/// Construct one per page with the store, the API client, and the
/// navigation targets; hand clones of the store to other tabs.
pub struct SessionManager<S: TokenStore, A: AuthApi> {
    store: S,
    api: A,
    targets: PageTargets,
    events: broadcast::Sender<SessionEvent>,
}

impl<S: TokenStore, A: AuthApi> SessionManager<S, A> {
    pub fn new(store: S, api: A, targets: PageTargets) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            store,
            api,
            targets,
            events,
        }
    }

    /// The navigation targets this manager redirects through.
    pub fn targets(&self) -> &PageTargets {
        &self.targets
    }

    /// Subscribes to session notifications: established, cleared, and
    /// cross-tab syncs.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    // -----------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------

    /// Attempts to establish a session from a login form submission.
    ///
    /// The transition is atomic with respect to the store: until the
    /// backend has accepted the credentials, nothing is written, so a
    /// failed login leaves any existing session exactly as it was.
    ///
    /// Role derivation order: the token's embedded role, then the role
    /// in the response's user object, then plain `user`. The token wins
    /// because it is what the backend will re-check on every request.
    ///
    /// # Errors
    /// - [`SessionError::Validation`] — an empty field, rejected before
    ///   any network call
    /// - [`SessionError::Api`] — the backend said no, or never answered
    pub async fn login(
        &self,
        credentials: Credentials,
    ) -> Result<LoginOutcome, SessionError> {
        if let Some(field) = credentials.missing_field() {
            return Err(SessionError::Validation(field));
        }

        let resp = self.api.login(&credentials).await?;

        let claims_role = TokenClaims::decode(&resp.token)
            .ok()
            .and_then(|claims| claims.role);
        let role = claims_role.or(resp.user.role).unwrap_or_default();
        let profile = resp.user.profile();

        self.store
            .save(&StoredSession::new(resp.token, profile.clone()));

        tracing::info!(%role, email = %credentials.email, "session established");

        let state = SessionState::Authenticated { role, profile };
        let _ = self.events.send(SessionEvent::Established(state));

        Ok(LoginOutcome {
            role,
            redirect: self.targets.home_for(role).to_string(),
        })
    }

    /// Ends the session. Infallible by design.
    ///
    /// The backend is told best-effort; whether it acknowledges, errors,
    /// or never answers, the local session is invalidated. A user who
    /// clicks "log out" is logged out, full stop.
    ///
    /// Returns the post-logout destination (the storefront home).
    pub async fn logout(&self) -> String {
        if let Some(session) = self.store.load() {
            if let Err(e) = self.api.logout(&session.token).await {
                tracing::warn!(
                    error = %e,
                    "backend logout failed, invalidating locally anyway"
                );
            }
        }

        self.store.clear();
        tracing::info!("session cleared");
        let _ = self.events.send(SessionEvent::Cleared);

        self.targets.home.clone()
    }

    /// Re-fetches the profile snapshot from the backend.
    ///
    /// The snapshot exists so pages don't have to do this on every load;
    /// call it from account pages or after profile edits. Two outcomes
    /// are not errors:
    /// - the backend returns the profile → snapshot updated in place
    /// - the backend answers 401 → the token is dead, the session is
    ///   cleared locally, `Ok(Anonymous)` comes back
    ///
    /// # Errors
    /// Any other backend failure; the store is left untouched.
    pub async fn refresh_profile(
        &self,
    ) -> Result<SessionState, SessionError> {
        let Some(session) = self.store.load() else {
            return Ok(SessionState::Anonymous);
        };

        match self.api.fetch_profile(&session.token).await {
            Ok(user) => {
                self.store.save(&StoredSession::new(
                    session.token,
                    user.profile(),
                ));
                Ok(self.query_state())
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!(
                    "backend rejected the token, clearing session"
                );
                self.store.clear();
                let _ = self.events.send(SessionEvent::Cleared);
                Ok(SessionState::Anonymous)
            }
            Err(e) => Err(e.into()),
        }
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Derives the current state from the store. Pure: never mutates,
    /// never fails — anything unreadable is `Anonymous`.
    pub fn query_state(&self) -> SessionState {
        derive_state(&self.store)
    }

    // -----------------------------------------------------------------
    // Cross-tab sync
    // -----------------------------------------------------------------

    /// Spawns the revalidation task: every store change — including ones
    /// made by other tabs — re-derives the state and broadcasts it as
    /// [`SessionEvent::Synced`].
    ///
    /// Passive and event-driven; nothing polls. The task runs for the
    /// life of the tab — abort the returned handle to stop it early.
    pub fn spawn_store_sync(&self) -> JoinHandle<()> {
        let store = self.store.clone();
        let events = self.events.clone();
        let mut changes = self.store.subscribe();

        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Fine: we re-read the store, which reflects all
                        // the changes we missed.
                        tracing::debug!(
                            missed,
                            "store events lagged, refreshing"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
                let _ = events
                    .send(SessionEvent::Synced(derive_state(&store)));
            }
        })
    }
}

/// The one place session state is derived from storage.
fn derive_state<S: TokenStore>(store: &S) -> SessionState {
    let Some(session) = store.load() else {
        return SessionState::Anonymous;
    };

    match TokenClaims::decode(&session.token) {
        Ok(claims) => SessionState::Authenticated {
            role: claims.effective_role(),
            profile: session.profile,
        },
        Err(e) => {
            // An opaque or corrupt token is not an error condition for
            // the caller — it is simply not a session we can read.
            tracing::debug!(
                error = %e,
                "stored token carries no readable claims"
            );
            SessionState::Anonymous
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
