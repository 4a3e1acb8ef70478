//! User detail screen: profile, balance, ledgers, auto-withdraw toggle.

use super::{Notice, ViewState};
use crate::client::AdminClient;
use crate::domain::user::{Balance, LedgerEntry, UserDetail};
use crate::error::SdkError;
use crate::shared::Username;

#[derive(Debug)]
pub struct UserDetailScreen {
    username: Username,
    state: ViewState<UserDetail>,
    charge_history: Vec<LedgerEntry>,
    withdraw_history: Vec<LedgerEntry>,
    balance: Option<Balance>,
}

impl UserDetailScreen {
    pub fn new(username: Username) -> Self {
        Self {
            username,
            state: ViewState::Loading,
            charge_history: Vec::new(),
            withdraw_history: Vec::new(),
            balance: None,
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn state(&self) -> &ViewState<UserDetail> {
        &self.state
    }

    pub fn charge_history(&self) -> &[LedgerEntry] {
        &self.charge_history
    }

    pub fn withdraw_history(&self) -> &[LedgerEntry] {
        &self.withdraw_history
    }

    pub fn balance(&self) -> Option<&Balance> {
        self.balance.as_ref()
    }

    /// Fetch everything, one request after another: detail, charge history,
    /// withdraw history, balance.
    ///
    /// Only the detail fetch decides the screen state. The other three are
    /// best-effort: a failure is logged and leaves that section empty.
    pub async fn load(&mut self, client: &AdminClient) {
        self.state = ViewState::Loading;
        self.charge_history.clear();
        self.withdraw_history.clear();
        self.balance = None;
        let users = client.users();

        match users.get(&self.username).await {
            Ok(detail) => self.state = ViewState::Ready(detail),
            Err(e) => {
                tracing::error!(error = %e, username = %self.username, "failed to fetch user");
                self.state = ViewState::Error(e.to_string());
                return;
            }
        }

        match users.charge_history(&self.username).await {
            Ok(entries) => self.charge_history = entries,
            Err(e) => {
                tracing::warn!(error = %e, username = %self.username, "failed to fetch charge history")
            }
        }

        match users.withdraw_history(&self.username).await {
            Ok(entries) => self.withdraw_history = entries,
            Err(e) => {
                tracing::warn!(error = %e, username = %self.username, "failed to fetch withdraw history")
            }
        }

        match users.balance(&self.username).await {
            Ok(balance) => self.balance = Some(balance),
            Err(e) => {
                tracing::warn!(error = %e, username = %self.username, "failed to fetch balance")
            }
        }
    }

    /// Flip auto-withdraw on the backend, then locally.
    ///
    /// Local state changes only after the update call succeeds; on failure
    /// it is left as it was and the error is returned.
    pub async fn toggle_auto_withdraw(&mut self, client: &AdminClient) -> Result<Notice, SdkError> {
        let current = self
            .state
            .ready()
            .map(|d| d.auto_withdraw)
            .ok_or_else(|| SdkError::Validation("user detail is not loaded".into()))?;

        if let Err(e) = client
            .users()
            .set_auto_withdraw(&self.username, !current)
            .await
        {
            tracing::error!(error = %e, username = %self.username, "failed to update auto withdraw");
            return Err(e);
        }

        if let Some(detail) = self.state.ready_mut() {
            detail.auto_withdraw = !current;
        }
        Ok(Notice::success(
            "Auto withdraw updated",
            "Your account has been updated.",
        ))
    }
}
