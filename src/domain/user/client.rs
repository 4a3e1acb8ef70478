//! Users sub-client: list, detail, balance, ledgers, auto-withdraw.

use crate::client::AdminClient;
use crate::domain::user::wire::{
    AutoWithdrawRequest, BalanceResponse, ChargeHistoryResponse, UserResponse,
    UserSummaryResponse, WithdrawHistoryResponse,
};
use crate::domain::user::{Balance, LedgerEntry, UserDetail, UserSummary};
use crate::error::SdkError;
use crate::shared::{Page, Username};
use std::time::Instant;

/// Sub-client for user operations.
///
/// Every read is its own request: nothing is batched and no consistency is
/// implied between, say, a balance and the ledger fetched right after it.
pub struct Users<'a> {
    pub(crate) client: &'a AdminClient,
}

impl<'a> Users<'a> {
    /// Fetch one page of users. `page` is 1-based.
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<UserSummary>, SdkError> {
        if page == 0 {
            return Err(SdkError::Validation("page must be >= 1".into()));
        }
        if limit == 0 {
            return Err(SdkError::Validation("limit must be >= 1".into()));
        }

        let rows: Vec<UserSummaryResponse> = self
            .client
            .http
            .get(
                "/users",
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        Ok(Page::new(
            page,
            limit,
            rows.into_iter().map(UserSummary::from).collect(),
        ))
    }

    /// Fetch a user's detail. Always hits the backend and refreshes the cache.
    pub async fn get(&self, username: &Username) -> Result<UserDetail, SdkError> {
        let path = format!("/users/{}", username.path_segment());
        let resp: UserResponse = self.client.http.get(&path, &[]).await?;
        let detail = UserDetail::from(resp);
        self.cache_user(username, &detail).await;
        Ok(detail)
    }

    /// Fetch a user's detail, serving it from cache when fresher than the TTL.
    pub async fn get_cached(&self, username: &Username) -> Result<UserDetail, SdkError> {
        {
            let cache = self.client.user_cache.read().await;
            if let Some((detail, fetched_at)) = cache.get(username) {
                if fetched_at.elapsed() < self.client.user_cache_ttl {
                    return Ok(detail.clone());
                }
            }
        }
        self.get(username).await
    }

    pub async fn balance(&self, username: &Username) -> Result<Balance, SdkError> {
        let path = format!("/users/{}/balance", username.path_segment());
        let resp: BalanceResponse = self.client.http.get(&path, &[]).await?;
        Ok(resp.into())
    }

    pub async fn charge_history(&self, username: &Username) -> Result<Vec<LedgerEntry>, SdkError> {
        let path = format!("/users/{}/charge_history", username.path_segment());
        let resp: ChargeHistoryResponse = self.client.http.get(&path, &[]).await?;
        Ok(resp.charge_history.into_iter().map(LedgerEntry::from).collect())
    }

    pub async fn withdraw_history(
        &self,
        username: &Username,
    ) -> Result<Vec<LedgerEntry>, SdkError> {
        let path = format!("/users/{}/withdraw_history", username.path_segment());
        let resp: WithdrawHistoryResponse = self.client.http.get(&path, &[]).await?;
        Ok(resp
            .withdraw_history
            .into_iter()
            .map(LedgerEntry::from)
            .collect())
    }

    /// Set a user's auto-withdraw flag.
    ///
    /// The backend's response is returned as-is and not checked against the
    /// requested value. The cached detail for this user is invalidated.
    pub async fn set_auto_withdraw(
        &self,
        username: &Username,
        enabled: bool,
    ) -> Result<serde_json::Value, SdkError> {
        // Singular `/user/` is the backend's route, unlike the read endpoints.
        let path = format!("/user/{}/auto_withdraw", username.path_segment());
        let body = AutoWithdrawRequest {
            auto_withdraw: enabled,
        };
        let result = self.client.http.patch_json(&path, &body).await;
        self.invalidate(username).await;
        Ok(result?)
    }

    /// Drop a cached user detail.
    pub async fn invalidate(&self, username: &Username) {
        self.client.user_cache.write().await.remove(username);
    }

    /// Whether a detail for `username` is currently cached (fresh or stale).
    pub async fn is_cached(&self, username: &Username) -> bool {
        self.client.user_cache.read().await.contains_key(username)
    }

    async fn cache_user(&self, username: &Username, detail: &UserDetail) {
        self.client
            .user_cache
            .write()
            .await
            .insert(username.clone(), (detail.clone(), Instant::now()));
    }
}
