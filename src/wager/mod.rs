//! Wager module: placing and settling wagers against the ledger.
//!
//! This module implements:
//! - Atomic wager placement (balance check + `BET_DEBIT` in one transaction)
//! - Exactly-once settlement via a status-guarded conditional update
//! - Per-user wager listing
//!
//! ## Example
//!
//! ```no_run
//! use wager_ledger::db::Database;
//! use wager_ledger::wager::{WagerManager, WagerOutcome};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let wagers = WagerManager::new(Arc::new(db.pool().clone()));
//!
//!     let wager = wagers.place(1, 40).await?;
//!     let settled = wagers.settle(wager.id, WagerOutcome::Win).await?;
//!     println!("Payout: {}", settled.payout_amount);
//!     Ok(())
//! }
//! ```

pub mod manager;
pub mod models;

pub use manager::WagerManager;
pub use models::{Wager, WagerId, WagerOutcome, WagerStatus, WIN_PAYOUT_MULTIPLIER};
