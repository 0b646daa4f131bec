//! Ledger data models.

use crate::errors::LedgerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User ID type
pub type UserId = i64;

/// Ledger entry model (append-only)
///
/// An immutable record of a single balance-affecting event. Entries are
/// never updated or deleted; a user's balance is the signed sum over their
/// entries, grouped by type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub user_id: UserId,
    pub entry_type: EntryType,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Ledger entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// External funds added to a user's balance
    Deposit,
    /// Stake debited when a wager is placed
    BetDebit,
    /// Payout credited when a wager settles as a win
    BetCredit,
}

impl EntryType {
    /// Whether entries of this type add to the balance
    pub fn is_credit(self) -> bool {
        matches!(self, EntryType::Deposit | EntryType::BetCredit)
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::Deposit => write!(f, "DEPOSIT"),
            EntryType::BetDebit => write!(f, "BET_DEBIT"),
            EntryType::BetCredit => write!(f, "BET_CREDIT"),
        }
    }
}

impl FromStr for EntryType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(EntryType::Deposit),
            "BET_DEBIT" => Ok(EntryType::BetDebit),
            "BET_CREDIT" => Ok(EntryType::BetCredit),
            other => Err(LedgerError::CorruptEnum {
                column: "entry_type",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_round_trip() {
        for entry_type in [EntryType::Deposit, EntryType::BetDebit, EntryType::BetCredit] {
            let parsed: EntryType = entry_type.to_string().parse().unwrap();
            assert_eq!(parsed, entry_type);
        }
    }

    #[test]
    fn test_entry_type_rejects_unknown() {
        let result = "WITHDRAWAL".parse::<EntryType>();
        assert!(matches!(
            result,
            Err(LedgerError::CorruptEnum {
                column: "entry_type",
                ..
            })
        ));
    }

    #[test]
    fn test_entry_type_sign() {
        assert!(EntryType::Deposit.is_credit());
        assert!(EntryType::BetCredit.is_credit());
        assert!(!EntryType::BetDebit.is_credit());
    }

    #[test]
    fn test_entry_serializes_with_wire_names() {
        let json = serde_json::to_string(&EntryType::BetDebit).unwrap();
        assert_eq!(json, "\"BET_DEBIT\"");
    }
}
