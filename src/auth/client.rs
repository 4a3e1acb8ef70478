//! Auth sub-client: login, signup, logout.

use crate::auth::{LoginForm, SignupRequest, TokenResponse};
use crate::client::AdminClient;
use crate::error::{AuthError, SdkError};

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a AdminClient,
}

impl<'a> Auth<'a> {
    /// Exchange credentials for a session token.
    ///
    /// Sends `username`/`password` form-encoded to `POST /token`. On success
    /// the token is attached to every later request and persisted through
    /// the session store. On failure nothing is stored and the backend error
    /// is returned unchanged (see [`SdkError::detail`]).
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, SdkError> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: TokenResponse = self.client.http.post_form("/token", &form).await?;

        if resp.access_token.is_empty() {
            return Err(AuthError::LoginFailed("backend returned an empty access token".into()).into());
        }

        self.client.session.save(&resp.access_token)?;
        self.client
            .http
            .set_auth_token(Some(resp.access_token.clone()))
            .await;

        tracing::info!(username = %username, "logged in");
        Ok(resp)
    }

    /// Create an account. The response body is returned as-is.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<serde_json::Value, SdkError> {
        let body = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let created = self.client.http.post_json("/users", &body).await?;
        tracing::info!(username = %username, "account created");
        Ok(created)
    }

    /// Logout: calls `POST /logout`, then clears the in-memory token, the
    /// persisted token and the user cache.
    ///
    /// Local state is cleared even when the server call fails; the server
    /// error is still returned so the caller can report it.
    pub async fn logout(&self) -> Result<(), SdkError> {
        let server = self
            .client
            .http
            .post_empty::<serde_json::Value>("/logout")
            .await;

        self.client.http.clear_auth_token().await;
        self.client.clear_all_caches().await;
        let local = self.client.session.clear();

        if let Err(e) = &server {
            tracing::warn!(error = %e, "server-side logout failed; local session cleared");
        }
        server?;
        local?;
        Ok(())
    }

    /// Whether a session token is currently attached to requests.
    ///
    /// This is presence only; the backend is the sole judge of validity.
    pub async fn is_authenticated(&self) -> bool {
        self.client.http.has_auth_token().await
    }
}
