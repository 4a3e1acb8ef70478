//! Low-level HTTP client: `AdminHttp`.
//!
//! Builds requests against one base URL, injects the bearer token and maps
//! non-success statuses to [`HttpError`]. Returns wire types; conversion to
//! domain types happens in the sub-clients. No retries: every failure goes
//! straight back to the caller.

use crate::error::HttpError;

use async_lock::RwLock;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Low-level HTTP client for the admin REST API.
pub struct AdminHttp {
    base_url: String,
    client: Client,
    /// Session token. NEVER exposed publicly and never logged.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl AdminHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        Self::with_token(base_url, timeout, None)
    }

    /// Build a client that starts with an already-issued session token.
    pub fn with_token(
        base_url: &str,
        timeout: Duration,
        token: Option<String>,
    ) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            auth_token: Arc::new(RwLock::new(token)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    pub(crate) async fn clear_auth_token(&self) {
        *self.auth_token.write().await = None;
    }

    pub(crate) async fn has_auth_token(&self) -> bool {
        self.auth_token.read().await.is_some()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Request helpers ──────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let url = self.url(path);
        let req = self.client.get(&url).query(query);
        self.send(Method::GET, &url, req).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let url = self.url(path);
        let req = self.client.post(&url).json(body);
        self.send(Method::POST, &url, req).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let url = self.url(path);
        let req = self.client.post(&url).form(body);
        self.send(Method::POST, &url, req).await
    }

    /// POST with no body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let url = self.url(path);
        let req = self.client.post(&url);
        self.send(Method::POST, &url, req).await
    }

    pub async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let url = self.url(path);
        let req = self.client.patch(&url).json(body);
        self.send(Method::PATCH, &url, req).await
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        mut req: RequestBuilder,
    ) -> Result<T, HttpError> {
        let token = self.auth_token.read().await.clone();
        tracing::debug!(
            method = %method,
            url = %url,
            authenticated = token.is_some(),
            "sending request"
        );
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let bytes = resp.bytes().await?;
            // Some endpoints (logout) answer with an empty body.
            let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes[..] };
            return serde_json::from_slice(body).map_err(HttpError::Decode);
        }

        let body_text = resp.text().await?;
        tracing::debug!(status = status.as_u16(), url = %url, "request rejected");
        Err(HttpError::from_status(status.as_u16(), body_text))
    }
}

impl Clone for AdminHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}
