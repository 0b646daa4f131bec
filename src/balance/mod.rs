//! Derived balance computation.
//!
//! Balance is never stored. It is recomputed on demand as
//! `Σ DEPOSIT + Σ BET_CREDIT − Σ BET_DEBIT` over a user's ledger entries,
//! which rules out balance/ledger drift by construction.
//!
//! Both functions are generic over [`sqlx::PgExecutor`] so they run against
//! the pool for plain reads, or against an open transaction (`&mut *tx`)
//! inside a compound operation, where they observe that transaction's own
//! uncommitted writes.

use crate::errors::LedgerResult;
use crate::ledger::models::{EntryType, UserId};
use sqlx::Row;
use std::collections::HashMap;

/// Fold per-type totals into a signed balance
pub(crate) fn net_of<I>(totals: I) -> i64
where
    I: IntoIterator<Item = (EntryType, i64)>,
{
    totals.into_iter().fold(0, |balance, (entry_type, total)| {
        if entry_type.is_credit() {
            balance + total
        } else {
            balance - total
        }
    })
}

/// Compute the current balance for a single user
///
/// Returns 0 for a user with no ledger entries.
///
/// # Arguments
///
/// * `executor` - Pool or open transaction to read through
/// * `user_id` - User ID
pub async fn balance_of<'e, E>(executor: E, user_id: UserId) -> LedgerResult<i64>
where
    E: sqlx::PgExecutor<'e>,
{
    // SUM(BIGINT) widens to NUMERIC in Postgres; cast back down.
    let rows = sqlx::query(
        "SELECT entry_type, COALESCE(SUM(amount), 0)::BIGINT AS total
         FROM ledger_entries
         WHERE user_id = $1
         GROUP BY entry_type",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    let mut totals = Vec::with_capacity(rows.len());
    for row in rows {
        let entry_type: EntryType = row.get::<String, _>("entry_type").parse()?;
        totals.push((entry_type, row.get::<i64, _>("total")));
    }

    Ok(net_of(totals))
}

/// Compute current balances for a set of users
///
/// Every requested ID is present in the result, mapped to 0 when the user
/// has no ledger entries. An empty input yields an empty map without
/// issuing a query.
///
/// # Arguments
///
/// * `executor` - Pool or open transaction to read through
/// * `user_ids` - User IDs to resolve
pub async fn balances_of<'e, E>(
    executor: E,
    user_ids: &[UserId],
) -> LedgerResult<HashMap<UserId, i64>>
where
    E: sqlx::PgExecutor<'e>,
{
    let mut balances: HashMap<UserId, i64> =
        user_ids.iter().map(|&user_id| (user_id, 0)).collect();

    if user_ids.is_empty() {
        return Ok(balances);
    }

    let rows = sqlx::query(
        "SELECT user_id, entry_type, COALESCE(SUM(amount), 0)::BIGINT AS total
         FROM ledger_entries
         WHERE user_id = ANY($1)
         GROUP BY user_id, entry_type",
    )
    .bind(user_ids)
    .fetch_all(executor)
    .await?;

    for row in rows {
        let user_id: UserId = row.get("user_id");
        let entry_type: EntryType = row.get::<String, _>("entry_type").parse()?;
        let total: i64 = row.get("total");

        let balance = balances.entry(user_id).or_insert(0);
        if entry_type.is_credit() {
            *balance += total;
        } else {
            *balance -= total;
        }
    }

    Ok(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_net_of_empty_is_zero() {
        assert_eq!(net_of([]), 0);
    }

    #[test]
    fn test_net_of_mixed_entries() {
        let totals = [
            (EntryType::Deposit, 100),
            (EntryType::BetDebit, 40),
            (EntryType::BetCredit, 80),
        ];
        assert_eq!(net_of(totals), 140);
    }

    proptest! {
        #[test]
        fn prop_net_matches_signed_sum(
            deposits in 0i64..1_000_000,
            debits in 0i64..1_000_000,
            credits in 0i64..1_000_000,
        ) {
            let totals = [
                (EntryType::Deposit, deposits),
                (EntryType::BetDebit, debits),
                (EntryType::BetCredit, credits),
            ];
            prop_assert_eq!(net_of(totals), deposits + credits - debits);
        }

        #[test]
        fn prop_net_is_order_independent(
            mut totals in proptest::collection::vec(
                (
                    prop_oneof![
                        Just(EntryType::Deposit),
                        Just(EntryType::BetDebit),
                        Just(EntryType::BetCredit),
                    ],
                    0i64..10_000,
                ),
                0..32,
            )
        ) {
            let forward = net_of(totals.clone());
            totals.reverse();
            prop_assert_eq!(net_of(totals), forward);
        }
    }
}
