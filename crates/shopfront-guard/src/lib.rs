//! Page access decisions for Shopfront.
//!
//! Every protected page asks one question on load: "may the current
//! session see this?" The [`AccessGuard`] answers it and, when the
//! answer is no, sends the visitor somewhere sensible:
//!
//! - no session at all → the login page
//! - wrong role → that role's *own* home (an admin wandering onto the
//!   seller panel goes back to the admin panel, not to an error page)
//!
//! Redirect targets are fixed by role. There is deliberately no "come
//! back to the page you wanted after logging in" flow.
//!
//! The actual navigation is behind the [`Navigator`] trait — pages
//! provide whatever "go to this path" means in their world, and tests
//! provide a recorder.

use std::sync::Arc;

use shopfront_api::AuthApi;
use shopfront_protocol::Role;
use shopfront_session::{SessionManager, SessionState};
use shopfront_store::TokenStore;

/// Performs a redirect to a relative path.
///
/// The guard decides *where*; implementors decide *how* — a browser
/// shell sets `location`, a demo prints, a test records.
pub trait Navigator {
    fn redirect(&self, path: &str);
}

/// Gate for a page that only some roles may view.
///
/// Holds the session manager it consults (shared, since the page also
/// uses it for rendering) and the navigator it redirects through.
pub struct AccessGuard<S: TokenStore, A: AuthApi, N: Navigator> {
    session: Arc<SessionManager<S, A>>,
    navigator: N,
}

impl<S: TokenStore, A: AuthApi, N: Navigator> AccessGuard<S, A, N> {
    pub fn new(session: Arc<SessionManager<S, A>>, navigator: N) -> Self {
        Self { session, navigator }
    }

    /// Decides whether the current session may view a page restricted
    /// to `allowed`.
    ///
    /// Returns `true` with no side effect when the session's role is in
    /// the set. Returns `false` after redirecting otherwise. Never
    /// mutates storage, so repeated calls are idempotent: an allowed
    /// visitor sees nothing happen twice, a rejected one is redirected
    /// to the same place twice.
    pub fn authorize(&self, allowed: &[Role]) -> bool {
        let targets = self.session.targets();

        match self.session.query_state() {
            SessionState::Anonymous => {
                tracing::info!(
                    ?allowed,
                    "no session, redirecting to login"
                );
                self.navigator.redirect(&targets.login);
                false
            }
            SessionState::Authenticated { role, .. } => {
                if allowed.contains(&role) {
                    true
                } else {
                    tracing::info!(
                        %role,
                        ?allowed,
                        "role not permitted here, redirecting home"
                    );
                    self.navigator.redirect(targets.home_for(role));
                    false
                }
            }
        }
    }
}
