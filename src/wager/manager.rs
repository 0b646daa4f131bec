//! Wager lifecycle manager: placing and settling wagers atomically.

use super::models::{Wager, WagerId, WagerOutcome, WagerStatus};
use crate::balance;
use crate::db::timeouts::{with_timeout, DEFAULT_TRANSACTION_TIMEOUT};
use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::models::{EntryType, UserId};
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// Wager manager
///
/// Each operation runs inside exactly one database transaction; every
/// failure path returns before commit, so dropping the transaction rolls
/// back all of its writes. The manager holds no in-process locks — mutual
/// exclusion is delegated to the row locks and conditional updates below.
#[derive(Clone)]
pub struct WagerManager {
    pool: Arc<PgPool>,
}

impl WagerManager {
    /// Create a new wager manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Place a wager, debiting the user's balance
    ///
    /// Atomically: lock the user row, check the derived balance covers the
    /// stake, create the `PLACED` wager, append a `BET_DEBIT` entry, and
    /// re-check the balance before commit. Either the wager and its debit
    /// both commit, or neither does.
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID
    /// * `amount` - Stake (positive integer)
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidAmount` - Non-positive stake
    /// * `LedgerError::UserNotFound` - User does not exist
    /// * `LedgerError::InsufficientBalance` - Stake exceeds current balance
    /// * `LedgerError::NegativeBalanceGuard` - Post-debit invariant tripped
    pub async fn place(&self, user_id: UserId, amount: i64) -> LedgerResult<Wager> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        with_timeout(DEFAULT_TRANSACTION_TIMEOUT, self.place_in_tx(user_id, amount)).await
    }

    async fn place_in_tx(&self, user_id: UserId, amount: i64) -> LedgerResult<Wager> {
        let mut tx = self.pool.begin().await?;

        // Row lock on the user serializes concurrent placements for this
        // user, so the sufficiency check below cannot race another debit
        // committing in between.
        let user = sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        if user.is_none() {
            return Err(LedgerError::UserNotFound(user_id));
        }

        let available = balance::balance_of(&mut *tx, user_id).await?;
        if amount > available {
            log::debug!(
                "wager rejected: user {user_id} stake {amount} exceeds balance {available}"
            );
            return Err(LedgerError::InsufficientBalance {
                user_id,
                available,
                required: amount,
            });
        }

        let row = sqlx::query(
            "INSERT INTO wagers (user_id, amount, status)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, amount, status, result, payout_amount, created_at",
        )
        .bind(user_id)
        .bind(amount)
        .bind(WagerStatus::Placed.to_string())
        .fetch_one(&mut *tx)
        .await?;

        let wager = Wager::from_row(&row)?;

        sqlx::query(
            "INSERT INTO ledger_entries (user_id, entry_type, amount)
             VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(EntryType::BetDebit.to_string())
        .bind(amount)
        .execute(&mut *tx)
        .await?;

        // Re-derive inside the same transaction after the debit. Unreachable
        // while the pre-check and the user row lock hold; a trip signals an
        // isolation regression, not a caller mistake.
        let after = balance::balance_of(&mut *tx, user_id).await?;
        if after < 0 {
            log::error!("negative balance guard tripped: user {user_id} balance {after}");
            return Err(LedgerError::NegativeBalanceGuard {
                user_id,
                balance: after,
            });
        }

        tx.commit().await?;

        log::debug!("wager {} placed: user {user_id} stake {amount}", wager.id);

        Ok(wager)
    }

    /// Settle a wager with the given outcome
    ///
    /// Atomically: load the wager, reject if already settled, transition
    /// `PLACED → SETTLED` via a conditional update on the status column, and
    /// append a `BET_CREDIT` of the payout on a win. The conditional update
    /// is what makes settlement exactly-once: of N concurrent settlers, one
    /// affects the row and the rest observe `AlreadySettled`.
    ///
    /// # Arguments
    ///
    /// * `wager_id` - Wager ID
    /// * `outcome` - `WagerOutcome::Win` or `WagerOutcome::Lose`
    ///
    /// # Errors
    ///
    /// * `LedgerError::WagerNotFound` - Wager does not exist
    /// * `LedgerError::AlreadySettled` - Wager was settled before this call
    pub async fn settle(&self, wager_id: WagerId, outcome: WagerOutcome) -> LedgerResult<Wager> {
        with_timeout(
            DEFAULT_TRANSACTION_TIMEOUT,
            self.settle_in_tx(wager_id, outcome),
        )
        .await
    }

    async fn settle_in_tx(&self, wager_id: WagerId, outcome: WagerOutcome) -> LedgerResult<Wager> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT id, user_id, amount, status FROM wagers WHERE id = $1")
            .bind(wager_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LedgerError::WagerNotFound(wager_id))?;

        let status: WagerStatus = row.get::<String, _>("status").parse()?;
        if status != WagerStatus::Placed {
            return Err(LedgerError::AlreadySettled(wager_id));
        }

        let user_id: UserId = row.get("user_id");
        let amount: i64 = row.get("amount");
        let payout = outcome.payout_for(amount)?;

        // Conditional transition: only takes effect if the row is still
        // PLACED at write time. A concurrent settler that lost the race
        // affects zero rows here even though its read above saw PLACED.
        let updated = sqlx::query(
            "UPDATE wagers
             SET status = $1, result = $2, payout_amount = $3
             WHERE id = $4 AND status = $5",
        )
        .bind(WagerStatus::Settled.to_string())
        .bind(outcome.to_string())
        .bind(payout)
        .bind(wager_id)
        .bind(WagerStatus::Placed.to_string())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() != 1 {
            log::debug!("settlement lost race on wager {wager_id}");
            return Err(LedgerError::AlreadySettled(wager_id));
        }

        if payout > 0 {
            sqlx::query(
                "INSERT INTO ledger_entries (user_id, entry_type, amount)
                 VALUES ($1, $2, $3)",
            )
            .bind(user_id)
            .bind(EntryType::BetCredit.to_string())
            .bind(payout)
            .execute(&mut *tx)
            .await?;
        }

        // Return exactly what is about to commit.
        let row = sqlx::query(
            "SELECT id, user_id, amount, status, result, payout_amount, created_at
             FROM wagers
             WHERE id = $1",
        )
        .bind(wager_id)
        .fetch_one(&mut *tx)
        .await?;

        let wager = Wager::from_row(&row)?;

        tx.commit().await?;

        log::debug!("wager {wager_id} settled: {outcome} payout {payout}");

        Ok(wager)
    }

    /// Get wagers for a user, newest first
    ///
    /// # Errors
    ///
    /// * `LedgerError::UserNotFound` - User does not exist
    pub async fn wagers_for_user(&self, user_id: UserId) -> LedgerResult<Vec<Wager>> {
        let user = sqlx::query("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        if user.is_none() {
            return Err(LedgerError::UserNotFound(user_id));
        }

        let rows = sqlx::query(
            "SELECT id, user_id, amount, status, result, payout_amount, created_at
             FROM wagers
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(Wager::from_row).collect()
    }
}
