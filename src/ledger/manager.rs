//! Ledger manager implementation: deposits, balance reads, entry history.

use super::models::{EntryType, LedgerEntry, UserId};
use crate::balance;
use crate::errors::{LedgerError, LedgerResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// Ledger manager
///
/// Owns the append path into `ledger_entries` and the user-checked read
/// operations over it. All writes are appends; nothing here mutates or
/// deletes an existing entry.
#[derive(Clone)]
pub struct LedgerManager {
    pool: Arc<PgPool>,
}

impl LedgerManager {
    /// Create a new ledger manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Deposit funds for a user
    ///
    /// Appends one `DEPOSIT` entry. Deposits carry no balance check and
    /// always succeed for an existing user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID
    /// * `amount` - Amount to credit (positive integer)
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidAmount` - Non-positive amount
    /// * `LedgerError::UserNotFound` - User does not exist
    pub async fn deposit(&self, user_id: UserId, amount: i64) -> LedgerResult<LedgerEntry> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let user = sqlx::query("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        if user.is_none() {
            return Err(LedgerError::UserNotFound(user_id));
        }

        let row = sqlx::query(
            "INSERT INTO ledger_entries (user_id, entry_type, amount)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, entry_type, amount, created_at",
        )
        .bind(user_id)
        .bind(EntryType::Deposit.to_string())
        .bind(amount)
        .fetch_one(self.pool.as_ref())
        .await?;

        log::debug!("deposit recorded: user {user_id} amount {amount}");

        entry_from_row(&row)
    }

    /// Get the current derived balance for a user
    ///
    /// # Errors
    ///
    /// * `LedgerError::UserNotFound` - User does not exist
    pub async fn balance(&self, user_id: UserId) -> LedgerResult<i64> {
        let user = sqlx::query("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        if user.is_none() {
            return Err(LedgerError::UserNotFound(user_id));
        }

        balance::balance_of(self.pool.as_ref(), user_id).await
    }

    /// Get ledger entries for a user, newest first
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID
    /// * `limit` - Maximum number of entries to return
    pub async fn entries_for_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> LedgerResult<Vec<LedgerEntry>> {
        let rows = sqlx::query(
            "SELECT id, user_id, entry_type, amount, created_at
             FROM ledger_entries
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(entry_from_row).collect()
    }
}

/// Map a `ledger_entries` row into a model
pub(crate) fn entry_from_row(row: &PgRow) -> LedgerResult<LedgerEntry> {
    Ok(LedgerEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        entry_type: row.get::<String, _>("entry_type").parse()?,
        amount: row.get("amount"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    })
}
