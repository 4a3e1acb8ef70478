//! # Custody Admin
//!
//! Operator-side client for the custodial trading backend's admin API, plus
//! the screen state machines an admin front end drives.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Newtypes, domain models, wire types, errors (always available)
//! 2. **Session**: Where the bearer token is persisted between runs
//! 3. **HTTP API**: `AdminHttp`, bearer injection and status mapping
//! 4. **High-Level Client**: `AdminClient` with nested sub-clients and caching
//! 5. **Screens**: Login, signup, dashboard and user detail, plus the route gate
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use custody_admin::prelude::*;
//!
//! let client = AdminClient::builder()
//!     .base_url("http://localhost:8000")
//!     .session_store(Arc::new(FileSessionStore::default_location()?))
//!     .build()?;
//!
//! client.auth().login("operator", "hunter2").await?;
//! let page = client.users().list(1, 10).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Backend URL and timeout defaults.
pub mod network;

/// Operator configuration file.
pub mod config;

// ── Layer 2: Session + Auth ──────────────────────────────────────────────────

/// Token persistence.
pub mod session;

/// Authentication: login form, signup, logout.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with bearer injection.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `AdminClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Screens ─────────────────────────────────────────────────────────

/// Per-route screen state.
#[cfg(feature = "http")]
pub mod view;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Page, Username, CURRENCY};

    // Domain types
    pub use crate::domain::user::{
        Balance, LedgerEntry, LedgerKind, UserDetail, UserSummary,
    };

    // Errors
    pub use crate::error::{AuthError, ConfigError, HttpError, SdkError, SessionError};

    // Network + config
    pub use crate::config::AdminConfig;
    pub use crate::network::DEFAULT_API_URL;

    // Session
    pub use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};

    // Auth types
    pub use crate::auth::{SignupRequest, TokenResponse};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{AdminClient, AdminClientBuilder, AuthClient, UsersClient};

    // Screens
    #[cfg(feature = "http")]
    pub use crate::view::{
        DashboardScreen, FormOutcome, LoginScreen, Notice, NoticeVariant, Route, Router,
        SignupScreen, UserDetailScreen, ViewState,
    };

    pub use std::sync::Arc;
}
