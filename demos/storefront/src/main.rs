//! Terminal demo of the Shopfront session kit.
//!
//! Drives the same flows a storefront page would, against a real
//! backend:
//!
//! ```text
//! storefront login <email> <password>   sign in, print the landing page
//! storefront status                     show the current session
//! storefront open <storefront|admin|seller>   gate a page by role
//! storefront logout                     sign out (locally, always)
//! ```
//!
//! Environment:
//! - `SHOPFRONT_API`     — backend origin (default http://127.0.0.1:4000)
//! - `SHOPFRONT_SESSION` — session file (default .shopfront-session.json)

use std::time::{SystemTime, UNIX_EPOCH};

use shopfront::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// A terminal "browser": redirects are printed, not followed.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn redirect(&self, path: &str) {
        println!("→ redirecting to {path}");
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn cmd_login(shop: &Shopfront, email: &str, password: &str) {
    match shop.session().login(Credentials::new(email, password)).await {
        Ok(outcome) => {
            println!("signed in as {}", outcome.role);
            println!("→ redirecting to {}", outcome.redirect);
        }
        Err(SessionError::Validation(field)) => {
            eprintln!("please fill in your {field}");
        }
        Err(SessionError::Api(api)) => match api.message() {
            Some(message) => eprintln!("login failed: {message}"),
            None => eprintln!("login failed: {api}"),
        },
    }
}

fn cmd_status(shop: &Shopfront, session_file: &str) {
    match shop.session().query_state() {
        SessionState::Anonymous => println!("not signed in"),
        SessionState::Authenticated { role, profile } => {
            println!("signed in as {} <{}>", profile.name, profile.email);
            println!("role: {role}");
            print_token_details(session_file);
        }
    }
}

/// Reads the raw record to show token claims — the kind of detail a
/// status page surfaces but session logic never acts on.
fn print_token_details(session_file: &str) {
    let Some(record) = FileStore::new(session_file).load() else {
        return;
    };
    let Ok(claims) = TokenClaims::decode(&record.token) else {
        println!("token: opaque (no readable claims)");
        return;
    };

    println!("subject: {}", claims.sub);
    if let Some(exp) = claims.exp {
        println!("token expiry: {exp} (unix)");
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if claims.is_expired_at(now) {
            println!("note: nominally expired — the backend may reject it");
        }
    }
}

fn cmd_open(shop: &Shopfront, page: &str) -> bool {
    let allowed: &[Role] = match page {
        "storefront" => &[Role::User, Role::Seller, Role::Admin],
        "admin" => &[Role::Admin],
        "seller" => &[Role::Seller],
        other => {
            eprintln!("unknown page {other:?}");
            return false;
        }
    };

    let guard = shop.guard(PrintNavigator);
    if guard.authorize(allowed) {
        println!("✓ {page} page opens");
        true
    } else {
        false
    }
}

async fn cmd_logout(shop: &Shopfront) {
    let destination = shop.session().logout().await;
    println!("signed out");
    println!("→ redirecting to {destination}");
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!(
        "usage: storefront <login <email> <password> | status | open <page> | logout>"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = std::env::var("SHOPFRONT_API")
        .unwrap_or_else(|_| "http://127.0.0.1:4000".to_string());
    let session_file = std::env::var("SHOPFRONT_SESSION")
        .unwrap_or_else(|_| ".shopfront-session.json".to_string());

    tracing::debug!(%base_url, %session_file, "storefront demo starting");

    let shop = match Shopfront::builder()
        .base_url(base_url.as_str())
        .session_file(&session_file)
        .build()
    {
        Ok(shop) => shop,
        Err(e) => {
            eprintln!("failed to set up: {e}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>()[..] {
        ["login", email, password] => {
            cmd_login(&shop, email, password).await;
        }
        ["status"] => cmd_status(&shop, &session_file),
        ["open", page] => {
            cmd_open(&shop, page);
        }
        ["logout"] => cmd_logout(&shop).await,
        _ => usage(),
    }
}
