//! Ledger module: append-only record of balance-affecting events.
//!
//! This module implements:
//! - Append-only `ledger_entries` as the single source of truth for balance
//! - Deposits (pure append, no balance check)
//! - User-checked balance reads and entry history
//!
//! ## Example
//!
//! ```no_run
//! use wager_ledger::db::Database;
//! use wager_ledger::ledger::LedgerManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let ledger = LedgerManager::new(Arc::new(db.pool().clone()));
//!
//!     let entry = ledger.deposit(1, 50).await?;
//!     println!("Deposited {} for user {}", entry.amount, entry.user_id);
//!
//!     let balance = ledger.balance(1).await?;
//!     println!("Balance is now {balance}");
//!     Ok(())
//! }
//! ```

pub mod manager;
pub mod models;

pub use manager::LedgerManager;
pub use models::{EntryType, LedgerEntry, UserId};
