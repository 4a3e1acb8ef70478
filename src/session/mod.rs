//! Session persistence: where the bearer token lives between runs.
//!
//! A session is nothing more than the presence or absence of one opaque
//! token string, kept under the fixed key [`SESSION_KEY`]. Stores never log
//! the token value.
//!
//! Presence of a token is used for client-side route gating only. It is not
//! verified with the server and must never be treated as access control.

mod file;

pub use file::FileSessionStore;

use crate::error::SessionError;
use std::sync::Mutex;

/// Key the token is stored under.
pub const SESSION_KEY: &str = "token";

/// Storage for the single session token.
pub trait SessionStore: Send + Sync {
    /// Load the stored token, if any.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Persist a newly issued token, replacing any previous one.
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Forget the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;

    /// Whether a token is present. Read failures count as "absent".
    fn has_token(&self) -> bool {
        match self.load() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session store");
                false
            }
        }
    }
}

/// Process-local store. Used by tests and by callers that manage
/// persistence themselves.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}
