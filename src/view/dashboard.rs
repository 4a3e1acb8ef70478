//! Dashboard: the paginated user list.

use super::ViewState;
use crate::client::AdminClient;
use crate::domain::user::UserSummary;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Page counter plus the rows of the current page.
///
/// "Next" is enabled while the last fetch came back full, so an exactly-full
/// last page leaves it enabled until the following (empty) page is loaded.
/// It stays disabled until the first fetch completes.
#[derive(Debug)]
pub struct DashboardScreen {
    page: u32,
    limit: u32,
    has_more: bool,
    state: ViewState<Vec<UserSummary>>,
}

impl DashboardScreen {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            has_more: false,
            state: ViewState::Loading,
        }
    }

    /// Start on a page other than the first.
    pub fn starting_at(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn state(&self) -> &ViewState<Vec<UserSummary>> {
        &self.state
    }

    pub fn can_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.has_more
    }

    /// Fetch the current page.
    pub async fn load(&mut self, client: &AdminClient) {
        self.state = ViewState::Loading;
        match client.users().list(self.page, self.limit).await {
            Ok(page) => {
                self.has_more = page.has_next();
                self.state = ViewState::Ready(page.items);
            }
            Err(e) => {
                tracing::error!(error = %e, page = self.page, "failed to fetch users");
                self.has_more = false;
                self.state = ViewState::Error(e.to_string());
            }
        }
    }

    /// Advance one page and re-fetch. Returns false when "next" is disabled.
    pub async fn next(&mut self, client: &AdminClient) -> bool {
        if !self.can_next() {
            return false;
        }
        self.page += 1;
        self.load(client).await;
        true
    }

    /// Go back one page and re-fetch. Returns false on the first page.
    pub async fn previous(&mut self, client: &AdminClient) -> bool {
        if !self.can_previous() {
            return false;
        }
        self.page -= 1;
        self.load(client).await;
        true
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}
