//! Screens: one independent state machine per route.
//!
//! Each screen owns its transient state and re-fetches from the
//! [`AdminClient`](crate::client::AdminClient) on load or on user action.
//! Nothing is shared between screens; re-entering a screen starts from
//! scratch.

pub mod dashboard;
pub mod login;
pub mod router;
pub mod signup;
pub mod user_detail;

pub use dashboard::{DashboardScreen, DEFAULT_PAGE_LIMIT};
pub use login::LoginScreen;
pub use router::{Route, Router};
pub use signup::SignupScreen;
pub use user_detail::UserDetailScreen;

/// Fetch state of a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    /// Display-only message; the screen does not retry.
    Error(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Visual weight of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// A transient, user-facing message (the dashboard's toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

/// Result of submitting a form screen: where to go next and what to tell
/// the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
    pub route: Route,
    pub notice: Notice,
}

impl FormOutcome {
    pub fn succeeded(&self) -> bool {
        !self.notice.is_failure()
    }
}
