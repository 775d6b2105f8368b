//! Repository for the `subscriptions` table.

use sqlx::PgPool;

use cookbook_core::types::DbId;

use crate::models::subscription::Subscription;
use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, author_id, created_at";

/// Column list for joined author rows, qualified for the `users` alias.
const AUTHOR_COLUMNS: &str = "u.id, u.email, u.username, u.first_name, u.last_name, \
    u.password_hash, u.avatar, u.is_staff, u.is_active, u.last_login_at, \
    u.created_at, u.updated_at";

/// Provides operations for user-to-author subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Insert a subscription, returning the created row.
    ///
    /// Duplicate pairs fail on `uq_subscriptions_user_author`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        author_id: DbId,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (user_id, author_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    /// Delete a subscription. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM subscriptions WHERE user_id = $1 AND author_id = $2")
                .bind(user_id)
                .bind(author_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether `user_id` follows `author_id`.
    pub async fn exists(
        pool: &PgPool,
        user_id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM subscriptions WHERE user_id = $1 AND author_id = $2)",
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_one(pool)
        .await
    }

    /// List the authors a user follows, oldest subscription first.
    pub async fn list_authors(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {AUTHOR_COLUMNS}
             FROM subscriptions s
             JOIN users u ON u.id = s.author_id
             WHERE s.user_id = $1
             ORDER BY s.created_at ASC, s.id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of authors a user follows.
    pub async fn count_authors(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
