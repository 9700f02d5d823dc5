//! The production [`AuthApi`] implementation over HTTP.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use shopfront_protocol::{
    ApiFailure, ApiUser, Credentials, LoginResponse, LogoutResponse,
};

use crate::{ApiError, AuthApi};

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin of the remote REST API, e.g. `https://shop.example.com`.
    /// Request paths are absolute and joined onto this.
    pub base_url: String,

    /// Optional whole-request timeout. `None` leaves timeouts to the
    /// transport, which is how the browser client behaved.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4000".to_string(),
            timeout: None,
        }
    }
}

// ---------------------------------------------------------------------------
// HttpAuthApi
// ---------------------------------------------------------------------------

/// [`AuthApi`] over HTTP with JSON bodies.
///
/// Cheap to clone — the underlying `reqwest::Client` is an `Arc` around
/// a connection pool.
#[derive(Clone)]
pub struct HttpAuthApi {
    base: Url,
    client: reqwest::Client,
}

impl HttpAuthApi {
    /// Builds a client against the configured base URL.
    ///
    /// # Errors
    /// [`ApiError::InvalidBaseUrl`] when the base URL doesn't parse;
    /// [`ApiError::Network`] when the TLS/connection stack fails to
    /// initialize.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            ApiError::InvalidBaseUrl(format!("{}: {e}", config.base_url))
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Network)?;

        Ok(Self { base, client })
    }

    /// One normalized request: JSON content type always, bearer when the
    /// caller passes a token, non-2xx mapped to [`ApiError::Http`] with
    /// the error body's `message` extracted.
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.base.join(path).map_err(|e| {
            ApiError::InvalidBaseUrl(format!("{path}: {e}"))
        })?;

        let mut req = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            // Error bodies are JSON with an optional `message`; anything
            // unparseable just means no message to show.
            let failure =
                resp.json::<ApiFailure>().await.unwrap_or_default();
            tracing::debug!(
                %method,
                path,
                status = status.as_u16(),
                message = failure.message.as_deref(),
                "backend rejected request"
            );
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: failure.message,
            });
        }

        resp.json::<T>().await.map_err(ApiError::Network)
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<LoginResponse, ApiError> {
        self.request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(credentials),
        )
        .await
    }

    async fn logout(
        &self,
        token: &str,
    ) -> Result<LogoutResponse, ApiError> {
        self.request(
            Method::POST,
            "/api/auth/logout",
            Some(token),
            None::<&()>,
        )
        .await
    }

    async fn fetch_profile(
        &self,
        token: &str,
    ) -> Result<ApiUser, ApiError> {
        self.request(
            Method::GET,
            "/api/auth/me",
            Some(token),
            None::<&()>,
        )
        .await
    }
}
