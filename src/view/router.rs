//! Routes and the session gate.
//!
//! The gate only redirects: a missing token sends protected routes to the
//! login screen. It never verifies the token with the backend and is not an
//! access-control boundary; the backend enforces authorization.

use super::Notice;
use crate::client::AdminClient;
use crate::session::SessionStore;
use crate::shared::Username;
use std::sync::Arc;

/// A screen the operator can be on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    UserDetail(Username),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::UserDetail(u) => format!("/users/{}", u.path_segment()),
        }
    }

    /// Routes reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

pub struct Router {
    current: Route,
    session: Arc<dyn SessionStore>,
}

impl Router {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self {
            current: Route::Login,
            session,
        }
    }

    /// A router gated on the client's own session store.
    pub fn for_client(client: &AdminClient) -> Self {
        Self::new(client.session_store())
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Whether a token is stored. Re-read on every call.
    pub fn is_logged_in(&self) -> bool {
        self.session.has_token()
    }

    /// Move to `route`, redirecting to [`Route::Login`] when it needs a
    /// session and none is stored. Returns the route actually entered.
    pub fn navigate(&mut self, route: Route) -> &Route {
        if !route.is_public() && !self.is_logged_in() {
            tracing::info!(requested = %route, "no session, redirecting to login");
            self.current = Route::Login;
        } else {
            self.current = route;
        }
        &self.current
    }

    /// Log out and land on the login screen.
    ///
    /// The local session is always cleared. Returns a notice when the
    /// server-side logout failed.
    pub async fn logout(&mut self, client: &AdminClient) -> Option<Notice> {
        let result = client.auth().logout().await;
        self.current = Route::Login;
        match result {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(error = %e, "logout failed");
                Some(Notice::failure(
                    "Logout failed",
                    e.detail().unwrap_or_else(|| e.to_string()),
                ))
            }
        }
    }
}
