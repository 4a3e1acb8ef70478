//! Signup screen.

use super::{FormOutcome, Notice, Route};
use crate::client::AdminClient;

const FALLBACK_MESSAGE: &str = "Please check your information and try again.";

#[derive(Debug, Default)]
pub struct SignupScreen {
    pub username: String,
    pub email: String,
    pub password: String,
    is_loading: bool,
}

impl SignupScreen {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            is_loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Submit the form. Success routes to the login screen; signing up does
    /// not log the new account in.
    pub async fn submit(&mut self, client: &AdminClient) -> FormOutcome {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return FormOutcome {
                route: Route::Signup,
                notice: Notice::failure(
                    "Signup failed",
                    "Username, email and password are required.",
                ),
            };
        }

        self.is_loading = true;
        let result = client
            .auth()
            .signup(&self.username, &self.email, &self.password)
            .await;
        self.is_loading = false;

        match result {
            Ok(_) => FormOutcome {
                route: Route::Login,
                notice: Notice::success(
                    "Signup successful",
                    "Your account has been created. Please log in.",
                ),
            },
            Err(e) => {
                tracing::error!(error = %e, "signup failed");
                FormOutcome {
                    route: Route::Signup,
                    notice: Notice::failure(
                        "Signup failed",
                        e.detail().unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
                    ),
                }
            }
        }
    }
}
