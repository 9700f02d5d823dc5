//! Full-stack integration tests: builder → login → guard → logout,
//! against a real in-process stub backend and a real session file.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};

use shopfront::prelude::*;

// =========================================================================
// Stub backend
// =========================================================================

fn admin_token() -> String {
    TokenClaims {
        sub: "root@shop.test".into(),
        role: Some(Role::Admin),
        iat: Some(1_700_000_000),
        exp: Some(1_700_086_400),
    }
    .encode_unsigned()
    .expect("stub token encodes")
}

async fn stub_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "root@shop.test" && body["password"] == "correct" {
        (
            StatusCode::OK,
            Json(json!({
                "token": admin_token(),
                "user": {
                    "name": "Root",
                    "email": "root@shop.test",
                    "role": "admin",
                },
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "invalid credentials" })),
        )
    }
}

async fn stub_logout(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let authed = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    if authed {
        (StatusCode::OK, Json(json!({ "success": true })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "missing token" })),
        )
    }
}

async fn start_stub() -> String {
    let app = axum::Router::new()
        .route("/api/auth/login", post(stub_login))
        .route("/api/auth/logout", post(stub_logout));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().expect("should have local addr");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}")
}

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
// Tests
// =========================================================================

#[tokio::test]
async fn test_full_flow_login_guard_logout() {
    let base = start_stub().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let shop = Shopfront::builder()
        .base_url(base.as_str())
        .session_file(dir.path().join("session.json"))
        .build()
        .expect("kit should build");

    // 1. Anonymous visitor bounces off the admin panel.
    let nav = RecordingNavigator::default();
    let guard = shop.guard(nav.clone());
    assert!(!guard.authorize(&[Role::Admin]));
    assert_eq!(nav.recorded(), vec!["/login.html"]);

    // 2. Login as the admin.
    let outcome = shop
        .session()
        .login(Credentials::new("root@shop.test", "correct"))
        .await
        .expect("login should succeed");
    assert_eq!(outcome.role, Role::Admin);
    assert_eq!(outcome.redirect, "/admin/dashboard.html");

    // 3. The admin panel now opens without a redirect.
    let nav = RecordingNavigator::default();
    let guard = shop.guard(nav.clone());
    assert!(guard.authorize(&[Role::Admin]));
    assert!(nav.recorded().is_empty());

    // 4. Logout lands back on the storefront home, signed out.
    let destination = shop.session().logout().await;
    assert_eq!(destination, "/index.html");
    assert_eq!(shop.session().query_state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_session_survives_kit_rebuild() {
    // The same session file across two kit instances models a page
    // reload: the second instance sees the session the first created.
    let base = start_stub().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("session.json");

    let first = Shopfront::builder()
        .base_url(base.as_str())
        .session_file(&file)
        .build()
        .expect("kit should build");
    first
        .session()
        .login(Credentials::new("root@shop.test", "correct"))
        .await
        .expect("login");

    let reloaded = Shopfront::builder()
        .base_url(base.as_str())
        .session_file(&file)
        .build()
        .expect("kit should build");

    assert_eq!(
        reloaded.session().query_state().role(),
        Some(Role::Admin)
    );
}

#[tokio::test]
async fn test_rejected_login_surfaces_backend_message() {
    let base = start_stub().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let shop = Shopfront::builder()
        .base_url(base.as_str())
        .session_file(dir.path().join("session.json"))
        .build()
        .expect("kit should build");

    let err = shop
        .session()
        .login(Credentials::new("root@shop.test", "wrong"))
        .await
        .expect_err("bad password");

    match err {
        SessionError::Api(api) => {
            assert_eq!(api.status(), Some(401));
            assert_eq!(api.message(), Some("invalid credentials"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(shop.session().query_state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_builder_rejects_bad_base_url() {
    let result = Shopfront::builder().base_url("not a url").build();
    assert!(matches!(result, Err(ShopfrontError::Api(_))));
}
