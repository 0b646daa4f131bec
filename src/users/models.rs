//! User data models.

use crate::ledger::models::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User model
///
/// Identity only; balance is never stored on the user and is always derived
/// from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// A user paired with their current derived balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBalance {
    #[serde(flatten)]
    pub user: User,
    pub balance: i64,
}
