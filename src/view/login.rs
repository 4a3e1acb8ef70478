//! Login screen.

use super::{FormOutcome, Notice, Route};
use crate::client::AdminClient;

const FALLBACK_MESSAGE: &str = "Please check your credentials and try again.";

#[derive(Debug, Default)]
pub struct LoginScreen {
    pub username: String,
    pub password: String,
    is_loading: bool,
}

impl LoginScreen {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            is_loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Submit the form.
    ///
    /// Success persists the token (via the client) and routes to the
    /// dashboard. Failure persists nothing, stays on the login screen and
    /// shows the backend's message verbatim when it sent one.
    pub async fn submit(&mut self, client: &AdminClient) -> FormOutcome {
        if self.username.is_empty() || self.password.is_empty() {
            return FormOutcome {
                route: Route::Login,
                notice: Notice::failure("Login failed", "Username and password are required."),
            };
        }

        self.is_loading = true;
        let result = client.auth().login(&self.username, &self.password).await;
        self.is_loading = false;

        match result {
            Ok(_) => FormOutcome {
                route: Route::Dashboard,
                notice: Notice::success("Login successful", "You have successfully logged in."),
            },
            Err(e) => {
                tracing::error!(error = %e, "login failed");
                FormOutcome {
                    route: Route::Login,
                    notice: Notice::failure(
                        "Login failed",
                        e.detail().unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
                    ),
                }
            }
        }
    }
}
