//! Repository for the `shopping_cart_items` table.

use sqlx::PgPool;

use cookbook_core::types::DbId;

use crate::models::shopping_cart::{ShoppingCartItem, ShoppingListRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, recipe_id, created_at";

/// Provides operations for the shopping cart and its aggregated list.
pub struct ShoppingCartRepo;

impl ShoppingCartRepo {
    /// Insert a cart item, returning the created row.
    ///
    /// Duplicate pairs fail on `uq_cart_user_recipe`.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<ShoppingCartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO shopping_cart_items (user_id, recipe_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShoppingCartItem>(&query)
            .bind(user_id)
            .bind(recipe_id)
            .fetch_one(pool)
            .await
    }

    /// Remove a cart item. Returns `true` if a row was removed.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM shopping_cart_items WHERE user_id = $1 AND recipe_id = $2")
                .bind(user_id)
                .bind(recipe_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the recipe is in the user's cart.
    pub async fn exists(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM shopping_cart_items WHERE user_id = $1 AND recipe_id = $2)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(pool)
        .await
    }

    /// Aggregate the user's cart into one row per ingredient with summed
    /// amounts, ordered by ingredient name.
    pub async fn shopping_list(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ShoppingListRow>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingListRow>(
            "SELECT i.name, i.measurement_unit, SUM(ri.amount)::BIGINT AS total_amount
             FROM shopping_cart_items c
             JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id
             JOIN ingredients i ON i.id = ri.ingredient_id
             WHERE c.user_id = $1
             GROUP BY i.name, i.measurement_unit
             ORDER BY i.name ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
