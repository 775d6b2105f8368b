//! Repository for the `favorites` table.

use sqlx::PgPool;

use cookbook_core::types::DbId;

use crate::models::favorite::Favorite;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, recipe_id, created_at";

/// Provides operations for user favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a favorite, returning the created row.
    ///
    /// Duplicate pairs fail on `uq_favorites_user_recipe`.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (user_id, recipe_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(recipe_id)
            .fetch_one(pool)
            .await
    }

    /// Remove a favorite. Returns `true` if a row was removed.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the user has favorited the recipe.
    pub async fn exists(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND recipe_id = $2)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(pool)
        .await
    }
}
