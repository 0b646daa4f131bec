//! Shared error types for ledger and wager operations.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by ledger, balance, and wager operations
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid amount (must be a positive integer)
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Unknown wager outcome supplied by the caller
    #[error("Unknown wager outcome: {0}")]
    UnknownOutcome(String),

    /// User not found
    #[error("User {0} not found")]
    UserNotFound(i64),

    /// Wager not found
    #[error("Wager {0} not found")]
    WagerNotFound(i64),

    /// Insufficient balance
    #[error("Insufficient balance for user {user_id}: available {available}, required {required}")]
    InsufficientBalance {
        user_id: i64,
        available: i64,
        required: i64,
    },

    /// Wager has already been settled
    #[error("Wager {0} already settled")]
    AlreadySettled(i64),

    /// A debit left the derived balance negative inside an uncommitted
    /// transaction. Unreachable when the pre-debit check and row locking
    /// hold; never retried.
    #[error("Negative balance guard tripped for user {user_id}: balance {balance}")]
    NegativeBalanceGuard { user_id: i64, balance: i64 },

    /// Payout arithmetic overflowed i64
    #[error("Amount overflow")]
    AmountOverflow,

    /// A stored enum column held a value outside its domain
    #[error("Corrupt {column} value in stored row: {value}")]
    CorruptEnum {
        column: &'static str,
        value: String,
    },

    /// Operation timed out before commit
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Coarse classification used by callers to map errors onto responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input; no state touched
    Validation,
    /// Referenced user or wager does not exist
    NotFound,
    /// Valid request rejected by current state
    Conflict,
    /// Internal defect or infrastructure failure
    Internal,
}

impl LedgerError {
    /// Classify this error into the caller-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidAmount(_) | LedgerError::UnknownOutcome(_) => ErrorKind::Validation,
            LedgerError::UserNotFound(_) | LedgerError::WagerNotFound(_) => ErrorKind::NotFound,
            LedgerError::InsufficientBalance { .. } | LedgerError::AlreadySettled(_) => {
                ErrorKind::Conflict
            }
            LedgerError::Database(_)
            | LedgerError::NegativeBalanceGuard { .. }
            | LedgerError::AmountOverflow
            | LedgerError::CorruptEnum { .. }
            | LedgerError::Timeout(_) => ErrorKind::Internal,
        }
    }

    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database and invariant errors are sanitized to avoid disclosing
    /// internal structure, and user IDs are redacted from not-found messages.
    pub fn client_message(&self) -> String {
        match self {
            LedgerError::Database(_) | LedgerError::Timeout(_) => {
                "Internal server error".to_string()
            }
            LedgerError::NegativeBalanceGuard { .. } => {
                "Balance invariant violation detected".to_string()
            }
            LedgerError::CorruptEnum { .. } => "Internal server error".to_string(),
            LedgerError::UserNotFound(_) => "User not found".to_string(),
            LedgerError::WagerNotFound(_) => "Wager not found".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(LedgerError::InvalidAmount(0).kind(), ErrorKind::Validation);
        assert_eq!(
            LedgerError::UnknownOutcome("DRAW".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(LedgerError::UserNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(LedgerError::WagerNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(
            LedgerError::InsufficientBalance {
                user_id: 1,
                available: 10,
                required: 20
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(LedgerError::AlreadySettled(1).kind(), ErrorKind::Conflict);
        assert_eq!(
            LedgerError::NegativeBalanceGuard {
                user_id: 1,
                balance: -5
            }
            .kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_client_message_redacts_ids() {
        let err = LedgerError::UserNotFound(42);
        assert_eq!(err.client_message(), "User not found");
        assert!(!err.client_message().contains("42"));

        let err = LedgerError::NegativeBalanceGuard {
            user_id: 42,
            balance: -100,
        };
        assert!(!err.client_message().contains("42"));
    }

    #[test]
    fn test_conflict_messages_keep_detail() {
        let err = LedgerError::InsufficientBalance {
            user_id: 1,
            available: 60,
            required: 100,
        };
        assert!(err.client_message().contains("60"));
        assert!(err.client_message().contains("100"));
    }
}
