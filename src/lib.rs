//! # Wager Ledger
//!
//! A ledger-based balance accounting library with atomic, race-safe state
//! transitions for placing and settling wagers.
//!
//! A user's balance is never stored: it is always derived from an
//! append-only ledger (`Σ DEPOSIT + Σ BET_CREDIT − Σ BET_DEBIT`), which
//! makes balance/ledger drift impossible by construction. Wagers move from
//! `PLACED` to `SETTLED` exactly once, enforced by a status-guarded
//! conditional update rather than in-process locking.
//!
//! ## Core guarantees
//!
//! - **Atomicity**: placing a wager commits the wager row and its
//!   `BET_DEBIT` entry together, or not at all; settlement commits the
//!   status transition and any `BET_CREDIT` together, or not at all.
//! - **Exactly-once settlement**: of N concurrent settlers on one wager,
//!   exactly one succeeds; the rest fail with `AlreadySettled`.
//! - **No negative balances**: placement locks the user row while checking
//!   sufficiency, and a defensive post-debit recheck backstops it.
//!
//! ## Core Modules
//!
//! - [`db`]: PostgreSQL pool, configuration, and timeout helpers
//! - [`users`]: user identity lookup, listing, and demo seeding
//! - [`ledger`]: append-only ledger entries and deposits
//! - [`balance`]: derived balance computation (single and batch)
//! - [`wager`]: wager placement and exactly-once settlement
//!
//! ## Example
//!
//! ```no_run
//! use wager_ledger::db::Database;
//! use wager_ledger::ledger::LedgerManager;
//! use wager_ledger::wager::{WagerManager, WagerOutcome};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let pool = Arc::new(db.pool().clone());
//!
//!     let ledger = LedgerManager::new(pool.clone());
//!     let wagers = WagerManager::new(pool);
//!
//!     ledger.deposit(1, 100).await?;
//!     let wager = wagers.place(1, 40).await?;
//!     let settled = wagers.settle(wager.id, WagerOutcome::Win).await?;
//!     assert_eq!(settled.payout_amount, 80);
//!     Ok(())
//! }
//! ```

/// Derived balance computation over the ledger.
pub mod balance;

/// Database connection pooling, configuration, and timeouts.
pub mod db;

/// Shared error taxonomy.
pub mod errors;

/// Append-only ledger entries and deposits.
pub mod ledger;

/// User identity and listing.
pub mod users;

/// Wager placement and settlement.
pub mod wager;

pub use balance::{balance_of, balances_of};
pub use errors::{ErrorKind, LedgerError, LedgerResult};
pub use ledger::{EntryType, LedgerEntry, LedgerManager, UserId};
pub use users::{User, UserBalance, UserStore};
pub use wager::{Wager, WagerId, WagerManager, WagerOutcome, WagerStatus};
