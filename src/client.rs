//! High-level client: `AdminClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client (`auth/client.rs`,
//! `domain/<name>/client.rs`). This module keeps the builder, the shared
//! session and cache state, and the accessor methods.

use crate::auth::client::Auth;
use crate::domain::user::client::Users;
use crate::domain::user::UserDetail;
use crate::error::{SdkError, SessionError};
use crate::http::AdminHttp;
use crate::session::{MemorySessionStore, SessionStore};
use crate::shared::Username;

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::user::client::Users as UsersClient;

/// The primary entry point for the admin API.
///
/// Provides nested sub-client accessors: `client.auth()`, `client.users()`.
/// Cloning is cheap; clones share the token, session store and cache.
pub struct AdminClient {
    pub(crate) http: AdminHttp,
    pub(crate) session: Arc<dyn SessionStore>,
    /// User detail cache: username → (detail, fetched_at)
    pub(crate) user_cache: Arc<RwLock<HashMap<Username, (UserDetail, Instant)>>>,
    /// Cache TTL for user details. Zero disables cached reads.
    pub(crate) user_cache_ttl: Duration,
}

impl AdminClient {
    pub fn builder() -> AdminClientBuilder {
        AdminClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn users(&self) -> Users<'_> {
        Users { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// The store the session token is persisted in.
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        self.session.clone()
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.user_cache.write().await.clear();
    }
}

impl Clone for AdminClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            session: self.session.clone(),
            user_cache: self.user_cache.clone(),
            user_cache_ttl: self.user_cache_ttl,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct AdminClientBuilder {
    base_url: String,
    timeout: Duration,
    user_cache_ttl: Duration,
    session: Option<Arc<dyn SessionStore>>,
}

impl Default for AdminClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(crate::network::DEFAULT_TIMEOUT_SECS),
            user_cache_ttl: Duration::from_secs(30),
            session: None,
        }
    }
}

impl AdminClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_cache_ttl(mut self, ttl: Duration) -> Self {
        self.user_cache_ttl = ttl;
        self
    }

    /// Where the session token is persisted. Defaults to an in-memory store.
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Build the client, picking up any token already in the session store.
    pub fn build(self) -> Result<AdminClient, SdkError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SdkError::Validation(format!(
                "base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }

        let session: Arc<dyn SessionStore> = self
            .session
            .unwrap_or_else(|| Arc::new(MemorySessionStore::new()));
        // A corrupt store holds no usable token; login or logout rewrites it.
        let token = match session.load() {
            Ok(token) => token,
            Err(SessionError::Corrupt(e)) => {
                tracing::warn!(error = %e, "session store is corrupt, starting without a token");
                None
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(restored = token.is_some(), "session hydrated");

        Ok(AdminClient {
            http: AdminHttp::with_token(&self.base_url, self.timeout, token)?,
            session,
            user_cache: Arc::new(RwLock::new(HashMap::new())),
            user_cache_ttl: self.user_cache_ttl,
        })
    }
}
