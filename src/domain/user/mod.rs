//! User domain: user list rows, user detail, balance and ledger history.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{Username, CURRENCY};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the paginated user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: Username,
}

/// A single user as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    pub username: Username,
    pub auto_withdraw: bool,
    /// Backend fields this crate does not model.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A user's balance, denominated in [`CURRENCY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: Decimal,
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, CURRENCY)
    }
}

/// Which of the two per-user ledgers an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    Charge,
    Withdraw,
}

impl LedgerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charge => "charge",
            Self::Withdraw => "withdraw",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Charge => "Charge History",
            Self::Withdraw => "Withdraw History",
        }
    }
}

impl std::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A charge or withdraw record. Order is whatever the backend returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub destination: String,
    pub amount: Decimal,
}
