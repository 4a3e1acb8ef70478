//! Conversions from wire types to domain types for users.

use super::wire::{BalanceResponse, LedgerEntryResponse, UserResponse, UserSummaryResponse};
use super::{Balance, LedgerEntry, UserDetail, UserSummary};
use crate::shared::Username;

impl From<UserSummaryResponse> for UserSummary {
    fn from(u: UserSummaryResponse) -> Self {
        Self {
            username: Username::from(u.username),
        }
    }
}

impl From<UserResponse> for UserDetail {
    fn from(u: UserResponse) -> Self {
        Self {
            username: Username::from(u.username),
            auto_withdraw: u.auto_withdraw,
            extra: u.extra,
        }
    }
}

impl From<BalanceResponse> for Balance {
    fn from(b: BalanceResponse) -> Self {
        Self { amount: b.balance }
    }
}

impl From<LedgerEntryResponse> for LedgerEntry {
    fn from(e: LedgerEntryResponse) -> Self {
        Self {
            timestamp: e.timestamp,
            source: e.from,
            destination: e.to,
            amount: e.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    #[test]
    fn test_ledger_entry_conversion() {
        let wire = LedgerEntryResponse {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            from: "TRX_source".to_string(),
            to: "TRX_dest".to_string(),
            amount: Decimal::new(1250, 2),
        };
        let entry: LedgerEntry = wire.into();
        assert_eq!(entry.source, "TRX_source");
        assert_eq!(entry.destination, "TRX_dest");
        assert_eq!(entry.amount, Decimal::new(1250, 2));
    }

    #[test]
    fn test_user_detail_conversion() {
        let wire: UserResponse =
            serde_json::from_str(r#"{"username":"carol","auto_withdraw":true,"tier":"gold"}"#)
                .unwrap();
        let detail: UserDetail = wire.into();
        assert_eq!(detail.username.as_str(), "carol");
        assert!(detail.auto_withdraw);
        assert_eq!(detail.extra.get("tier").unwrap(), "gold");
    }

    #[test]
    fn test_balance_display() {
        let balance: Balance = BalanceResponse {
            balance: Decimal::new(9900, 2),
        }
        .into();
        assert_eq!(balance.to_string(), "99.00 USDT");
    }
}
