//! Wager data models.

use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::models::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::str::FromStr;

/// Wager ID type
pub type WagerId = i64;

/// Winning payout multiplier applied to the stake
pub const WIN_PAYOUT_MULTIPLIER: i64 = 2;

/// Wager model
///
/// Progresses from `PLACED` to `SETTLED` exactly once; `result` is present
/// iff the wager is settled, and `payout_amount` is `2 × amount` on a win,
/// 0 otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wager {
    pub id: WagerId,
    pub user_id: UserId,
    pub amount: i64,
    pub status: WagerStatus,
    pub result: Option<WagerOutcome>,
    pub payout_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl Wager {
    /// Map a `wagers` row into a model
    pub(crate) fn from_row(row: &PgRow) -> LedgerResult<Self> {
        let result = match row.get::<Option<String>, _>("result") {
            Some(value) => Some(value.parse::<WagerOutcome>().map_err(|_| {
                LedgerError::CorruptEnum {
                    column: "result",
                    value,
                }
            })?),
            None => None,
        };

        Ok(Wager {
            id: row.get("id"),
            user_id: row.get("user_id"),
            amount: row.get("amount"),
            status: row.get::<String, _>("status").parse()?,
            result,
            payout_amount: row.get("payout_amount"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        })
    }
}

/// Wager status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WagerStatus {
    Placed,
    Settled,
}

impl std::fmt::Display for WagerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WagerStatus::Placed => write!(f, "PLACED"),
            WagerStatus::Settled => write!(f, "SETTLED"),
        }
    }
}

impl FromStr for WagerStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLACED" => Ok(WagerStatus::Placed),
            "SETTLED" => Ok(WagerStatus::Settled),
            other => Err(LedgerError::CorruptEnum {
                column: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Wager outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WagerOutcome {
    Win,
    Lose,
}

impl WagerOutcome {
    /// Payout for a stake under this outcome: `2 × amount` on a win, 0 on
    /// a loss. Overflow is an error rather than a wrap.
    pub fn payout_for(self, amount: i64) -> LedgerResult<i64> {
        match self {
            WagerOutcome::Win => amount
                .checked_mul(WIN_PAYOUT_MULTIPLIER)
                .ok_or(LedgerError::AmountOverflow),
            WagerOutcome::Lose => Ok(0),
        }
    }
}

impl std::fmt::Display for WagerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WagerOutcome::Win => write!(f, "WIN"),
            WagerOutcome::Lose => write!(f, "LOSE"),
        }
    }
}

impl FromStr for WagerOutcome {
    type Err = LedgerError;

    /// Parses exactly `WIN` or `LOSE` (case-sensitive); anything else is a
    /// validation failure before any state is touched.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WIN" => Ok(WagerOutcome::Win),
            "LOSE" => Ok(WagerOutcome::Lose),
            other => Err(LedgerError::UnknownOutcome(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_parsing() {
        assert_eq!("WIN".parse::<WagerOutcome>().unwrap(), WagerOutcome::Win);
        assert_eq!("LOSE".parse::<WagerOutcome>().unwrap(), WagerOutcome::Lose);

        for bad in ["win", "Draw", "VOID", ""] {
            assert!(matches!(
                bad.parse::<WagerOutcome>(),
                Err(LedgerError::UnknownOutcome(_))
            ));
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [WagerStatus::Placed, WagerStatus::Settled] {
            assert_eq!(status.to_string().parse::<WagerStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_payout_amounts() {
        assert_eq!(WagerOutcome::Win.payout_for(40).unwrap(), 80);
        assert_eq!(WagerOutcome::Lose.payout_for(40).unwrap(), 0);
    }

    #[test]
    fn test_payout_overflow_is_error() {
        assert!(matches!(
            WagerOutcome::Win.payout_for(i64::MAX),
            Err(LedgerError::AmountOverflow)
        ));
        // A losing stake never multiplies, so it cannot overflow.
        assert_eq!(WagerOutcome::Lose.payout_for(i64::MAX).unwrap(), 0);
    }

    #[test]
    fn test_wager_serializes_with_wire_names() {
        let json = serde_json::to_string(&WagerStatus::Settled).unwrap();
        assert_eq!(json, "\"SETTLED\"");
        let json = serde_json::to_string(&Some(WagerOutcome::Win)).unwrap();
        assert_eq!(json, "\"WIN\"");
    }
}
