//! User store implementation.

use super::models::{User, UserBalance};
use crate::balance;
use crate::errors::LedgerResult;
use crate::ledger::models::UserId;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// User store
///
/// Users are created externally to the accounting core and are immutable for
/// its purposes; this store only creates, looks up, and lists them.
#[derive(Clone)]
pub struct UserStore {
    pool: Arc<PgPool>,
}

impl UserStore {
    /// Create a new user store
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create a user
    pub async fn create(&self, email: &str, display_name: &str) -> LedgerResult<User> {
        let row = sqlx::query(
            "INSERT INTO users (email, display_name)
             VALUES ($1, $2)
             RETURNING id, email, display_name, created_at",
        )
        .bind(email)
        .bind(display_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user_from_row(&row))
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, user_id: UserId) -> LedgerResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, display_name, created_at
             FROM users
             WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| user_from_row(&r)))
    }

    /// List all users, oldest first
    pub async fn list(&self) -> LedgerResult<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, email, display_name, created_at
             FROM users
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// List all users with their current derived balances, oldest first
    ///
    /// Users without ledger entries appear with balance 0.
    pub async fn users_with_balances(&self) -> LedgerResult<Vec<UserBalance>> {
        let users = self.list().await?;
        let ids: Vec<UserId> = users.iter().map(|user| user.id).collect();
        let balances = balance::balances_of(self.pool.as_ref(), &ids).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let balance = balances.get(&user.id).copied().unwrap_or(0);
                UserBalance { user, balance }
            })
            .collect())
    }

    /// Seed demo users `user1@example.com` .. `userN@example.com`
    ///
    /// Upserts by email, so reseeding is safe and never duplicates users.
    pub async fn seed_demo_users(&self, count: usize) -> LedgerResult<Vec<User>> {
        let mut users = Vec::with_capacity(count);

        for number in 1..=count {
            let email = format!("user{number}@example.com");
            let display_name = format!("User {number}");

            let row = sqlx::query(
                "INSERT INTO users (email, display_name)
                 VALUES ($1, $2)
                 ON CONFLICT (email)
                 DO UPDATE SET display_name = EXCLUDED.display_name
                 RETURNING id, email, display_name, created_at",
            )
            .bind(&email)
            .bind(&display_name)
            .fetch_one(self.pool.as_ref())
            .await?;

            users.push(user_from_row(&row));
        }

        log::debug!("seeded {count} demo users");

        Ok(users)
    }
}

/// Map a `users` row into a model
fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        display_name: row.get("display_name"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}
