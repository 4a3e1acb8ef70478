//! Unified SDK error types.

use serde::Deserialize;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    /// The backend-provided error message, if the failure carried one.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Http(e) => e.detail(),
            _ => None,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Response decode failed: {0}")]
    Decode(serde_json::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },
}

impl HttpError {
    /// Map a non-success status and its body text to an error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Unauthorized(body),
            403 => Self::Forbidden(body),
            404 => Self::NotFound(body),
            400..=499 => Self::BadRequest(body),
            _ => Self::ServerError { status, body },
        }
    }

    /// Raw response body for status-bearing errors.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(b) | Self::Forbidden(b) | Self::NotFound(b) | Self::BadRequest(b) => {
                Some(b)
            }
            Self::ServerError { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The backend's `detail` message extracted from the response body.
    pub fn detail(&self) -> Option<String> {
        let body = self.body()?;
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|r| r.message())
    }
}

/// Error body returned by the backend: `{"detail": ...}`.
///
/// `detail` is either a plain string or, for request validation failures, a
/// list of `{loc, msg, type}` objects.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string),
            _ => None,
        }
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    LoginFailed(String),
}

/// Session persistence errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("No data directory available for session storage")]
    NoDataDir,
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse failed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No data directory available")]
    NoDataDir,

    #[error("Invalid config: {0}")]
    Invalid(String),
}
