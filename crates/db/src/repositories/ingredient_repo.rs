//! Repository for the `ingredients` table.

use sqlx::PgPool;

use cookbook_core::types::DbId;

use crate::models::ingredient::{CreateIngredient, Ingredient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, measurement_unit, created_at, updated_at";

/// Provides CRUD operations for ingredient reference data.
pub struct IngredientRepo;

impl IngredientRepo {
    /// Insert a new ingredient, returning the created row.
    ///
    /// Duplicate names fail on `uq_ingredients_name`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateIngredient,
    ) -> Result<Ingredient, sqlx::Error> {
        let query = format!(
            "INSERT INTO ingredients (name, measurement_unit)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(&input.name)
            .bind(&input.measurement_unit)
            .fetch_one(pool)
            .await
    }

    /// Find an ingredient by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ingredients WHERE id = $1");
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List ingredients ordered by name, optionally filtered by a
    /// case-insensitive name prefix.
    ///
    /// The prefix is matched literally: `%`, `_`, and `\` in the input are
    /// escaped so they do not act as ILIKE wildcards.
    ///
    /// This endpoint is unpaginated: the reference set is small and the
    /// frontend autocomplete consumes it whole.
    pub async fn list(
        pool: &PgPool,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, sqlx::Error> {
        let escaped = name_prefix.map(escape_like_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM ingredients
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 || '%')
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(escaped)
            .fetch_all(pool)
            .await
    }

    /// How many of the given ingredient ids exist.
    ///
    /// Used to reject recipe payloads referencing unknown ingredients with
    /// a 400 instead of a foreign-key failure.
    pub async fn count_existing(pool: &PgPool, ids: &[DbId]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM ingredients WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(pool)
            .await
    }
}

/// Escape ILIKE metacharacters so a user-supplied prefix matches literally.
fn escape_like_pattern(prefix: &str) -> String {
    prefix
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
