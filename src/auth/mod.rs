//! Authentication: login, signup, logout, session presence.
//!
//! ## Security Model
//!
//! - The backend issues an opaque bearer token from `POST /token`.
//! - The SDK keeps it in a private field of the HTTP client and persists it
//!   through the configured [`SessionStore`](crate::session::SessionStore).
//!   There is no public `.token()` accessor and the value is never logged;
//!   request logs only record whether a token was attached.
//! - **Logout**: calls `POST /logout`, then clears the in-memory token, the
//!   persisted token and the user cache whether or not the server call
//!   succeeded.
//! - There is no refresh and no expiry tracking: a token is valid until the
//!   backend rejects it.

#[cfg(feature = "http")]
pub mod client;

use serde::{Deserialize, Serialize};

/// Form body for `POST /token`.
#[derive(Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response from `POST /token`.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// JSON body for `POST /users`.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
