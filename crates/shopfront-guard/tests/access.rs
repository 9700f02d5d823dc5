//! Integration tests for the access guard.
//!
//! The guard only ever *reads*: these tests seed the token store
//! directly with minted tokens and assert on the redirect recorder and
//! on the store staying byte-identical afterwards.

use std::sync::{Arc, Mutex};

use shopfront_api::{ApiError, AuthApi};
use shopfront_guard::{AccessGuard, Navigator};
use shopfront_protocol::{
    ApiUser, Credentials, LoginResponse, LogoutResponse, Role,
    TokenClaims, UserProfile,
};
use shopfront_session::{PageTargets, SessionManager};
use shopfront_store::{MemoryStore, StoredSession, TokenStore};

// =========================================================================
// Stubs
// =========================================================================

/// An API the guard must never reach — authorization is a local read.
#[derive(Clone)]
struct UnreachableApi;

impl AuthApi for UnreachableApi {
    async fn login(
        &self,
        _credentials: &Credentials,
    ) -> Result<LoginResponse, ApiError> {
        panic!("guard must not call the backend");
    }

    async fn logout(
        &self,
        _token: &str,
    ) -> Result<LogoutResponse, ApiError> {
        panic!("guard must not call the backend");
    }

    async fn fetch_profile(
        &self,
        _token: &str,
    ) -> Result<ApiUser, ApiError> {
        panic!("guard must not call the backend");
    }
}

/// Records every redirect instead of performing one.
#[derive(Clone, Default)]
struct RecordingNavigator {
    paths: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    fn recorded(&self) -> Vec<String> {
        self.paths.lock().expect("lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.paths.lock().expect("lock").push(path.to_string());
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn token_for(role: Role) -> String {
    TokenClaims {
        sub: "ada@shop.test".into(),
        role: Some(role),
        iat: None,
        exp: None,
    }
    .encode_unsigned()
    .expect("claims encode")
}

fn signed_in_store(role: Role) -> MemoryStore {
    let store = MemoryStore::new();
    store.save(&StoredSession::new(
        token_for(role),
        UserProfile {
            name: "Ada".into(),
            email: "ada@shop.test".into(),
        },
    ));
    store
}

fn guard_over(
    store: MemoryStore,
) -> (
    AccessGuard<MemoryStore, UnreachableApi, RecordingNavigator>,
    RecordingNavigator,
) {
    let session = Arc::new(SessionManager::new(
        store,
        UnreachableApi,
        PageTargets::default(),
    ));
    let nav = RecordingNavigator::default();
    (AccessGuard::new(session, nav.clone()), nav)
}

// =========================================================================
// Anonymous visitors
// =========================================================================

#[test]
fn test_authorize_anonymous_redirects_to_login() {
    let store = MemoryStore::new();
    let (guard, nav) = guard_over(store.clone());

    let allowed = guard.authorize(&[Role::Admin]);

    assert!(!allowed);
    assert_eq!(nav.recorded(), vec!["/login.html"]);
    assert_eq!(store.load(), None, "no storage mutation");
}

#[test]
fn test_authorize_opaque_token_counts_as_anonymous() {
    // An unreadable token proves nothing; the visitor goes to login.
    let store = MemoryStore::new();
    store.save(&StoredSession::new("T1", UserProfile::default()));
    let (guard, nav) = guard_over(store.clone());

    let allowed = guard.authorize(&[Role::User]);

    assert!(!allowed);
    assert_eq!(nav.recorded(), vec!["/login.html"]);
    // The unreadable record is left in place — guards never clean up.
    assert_eq!(store.load().unwrap().token, "T1");
}

// =========================================================================
// Role in the allowed set
// =========================================================================

#[test]
fn test_authorize_matching_role_passes_without_redirect() {
    let (guard, nav) = guard_over(signed_in_store(Role::Admin));

    assert!(guard.authorize(&[Role::Admin]));
    assert!(nav.recorded().is_empty(), "no side effect on success");
}

#[test]
fn test_authorize_is_idempotent() {
    let (guard, nav) = guard_over(signed_in_store(Role::Seller));

    assert!(guard.authorize(&[Role::Seller]));
    assert!(guard.authorize(&[Role::Seller]));
    assert!(guard.authorize(&[Role::Seller]));

    assert!(nav.recorded().is_empty());
}

#[test]
fn test_authorize_accepts_any_role_in_the_set() {
    // A page open to both back-office tiers.
    let (guard, nav) = guard_over(signed_in_store(Role::Seller));

    assert!(guard.authorize(&[Role::Admin, Role::Seller]));
    assert!(nav.recorded().is_empty());
}

// =========================================================================
// Role outside the allowed set
// =========================================================================

#[test]
fn test_authorize_user_on_admin_page_goes_to_storefront_home() {
    let (guard, nav) = guard_over(signed_in_store(Role::User));

    let allowed = guard.authorize(&[Role::Admin]);

    assert!(!allowed);
    assert_eq!(nav.recorded(), vec!["/index.html"]);
}

#[test]
fn test_authorize_seller_on_admin_page_goes_to_seller_home() {
    let (guard, nav) = guard_over(signed_in_store(Role::Seller));

    let allowed = guard.authorize(&[Role::Admin]);

    assert!(!allowed);
    assert_eq!(nav.recorded(), vec!["/seller/dashboard.html"]);
}

#[test]
fn test_authorize_admin_on_seller_page_goes_to_admin_home() {
    let (guard, nav) = guard_over(signed_in_store(Role::Admin));

    let allowed = guard.authorize(&[Role::Seller]);

    assert!(!allowed);
    assert_eq!(nav.recorded(), vec!["/admin/dashboard.html"]);
}

#[test]
fn test_authorize_rejected_repeatedly_redirects_to_the_same_place() {
    let (guard, nav) = guard_over(signed_in_store(Role::User));

    guard.authorize(&[Role::Admin]);
    guard.authorize(&[Role::Admin]);

    assert_eq!(
        nav.recorded(),
        vec!["/index.html", "/index.html"],
        "same fixed target every time"
    );
}

#[test]
fn test_authorize_rejection_leaves_session_intact() {
    // Being on the wrong page is not a reason to lose the session.
    let store = signed_in_store(Role::User);
    let before = store.load();
    let (guard, _nav) = guard_over(store.clone());

    guard.authorize(&[Role::Admin]);

    assert_eq!(store.load(), before);
}
