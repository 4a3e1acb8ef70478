//! Wire types for user, balance and ledger responses (REST).

use crate::shared::serde_util::flexible_timestamp;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of `GET /users?page=&limit=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummaryResponse {
    pub username: String,
}

/// Response from `GET /users/{username}`.
///
/// Fields other than `username` and `auto_withdraw` vary by backend version
/// and are kept verbatim in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub username: String,
    #[serde(default)]
    pub auto_withdraw: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response from `GET /users/{username}/balance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// A single charge or withdraw record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntryResponse {
    #[serde(with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub from: String,
    pub to: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Response from `GET /users/{username}/charge_history`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChargeHistoryResponse {
    #[serde(default)]
    pub charge_history: Vec<LedgerEntryResponse>,
}

/// Response from `GET /users/{username}/withdraw_history`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WithdrawHistoryResponse {
    #[serde(default)]
    pub withdraw_history: Vec<LedgerEntryResponse>,
}

/// Request body for `PATCH /user/{username}/auto_withdraw`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoWithdrawRequest {
    pub auto_withdraw: bool,
}
