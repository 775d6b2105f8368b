//! Repository for the `recipes` and `recipe_ingredients` tables.

use sqlx::PgPool;

use cookbook_core::types::DbId;
use cookbook_core::validation::IngredientRef;

use crate::models::recipe::{NewRecipe, Recipe, RecipeChanges, RecipeFilters, RecipeIngredient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author_id, name, image, text, cooking_time, short_link, \
                        created_at, updated_at";

/// Column list qualified for the `recipes` alias used in filtered queries.
const QUALIFIED_COLUMNS: &str = "r.id, r.author_id, r.name, r.image, r.text, \
    r.cooking_time, r.short_link, r.created_at, r.updated_at";

/// Filter clause shared by `list` and `count`.
///
/// Bind order: $1 author, $2 is_favorited, $3 viewer, $4 is_in_shopping_cart.
/// An anonymous viewer binds NULL for $3, which makes the EXISTS subqueries
/// false, so `is_favorited=true` matches nothing while `=false` matches all.
const FILTER_CLAUSE: &str = "($1::BIGINT IS NULL OR r.author_id = $1)
       AND ($2::BOOLEAN IS NULL OR EXISTS(
                SELECT 1 FROM favorites f
                WHERE f.recipe_id = r.id AND f.user_id = $3
            ) = $2)
       AND ($4::BOOLEAN IS NULL OR EXISTS(
                SELECT 1 FROM shopping_cart_items c
                WHERE c.recipe_id = r.id AND c.user_id = $3
            ) = $4)";

/// Provides CRUD operations for recipes and their ingredient rows.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a recipe together with its ingredient rows in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &NewRecipe,
        ingredients: &[IngredientRef],
    ) -> Result<Recipe, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO recipes (author_id, name, image, text, cooking_time, short_link)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(input.author_id)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.text)
            .bind(input.cooking_time)
            .bind(&input.short_link)
            .fetch_one(&mut *tx)
            .await?;

        for ingredient in ingredients {
            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
                 VALUES ($1, $2, $3)",
            )
            .bind(recipe.id)
            .bind(ingredient.id)
            .bind(ingredient.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(recipe)
    }

    /// Update a recipe and replace its ingredient set in one transaction.
    ///
    /// Only non-`None` scalar fields are applied. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &RecipeChanges,
        ingredients: &[IngredientRef],
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE recipes SET
                name = COALESCE($2, name),
                image = COALESCE($3, image),
                text = COALESCE($4, text),
                cooking_time = COALESCE($5, cooking_time)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.image)
            .bind(&changes.text)
            .bind(changes.cooking_time)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(recipe) = recipe else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for ingredient in ingredients {
            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(ingredient.id)
            .bind(ingredient.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(recipe))
    }

    /// Find a recipe by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a recipe by its short-link code.
    pub async fn find_by_short_link(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE short_link = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Delete a recipe (ingredient rows cascade). Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List recipes newest first, applying viewer-relative filters.
    pub async fn list(
        pool: &PgPool,
        viewer: Option<DbId>,
        filters: &RecipeFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM recipes r
             WHERE {FILTER_CLAUSE}
             ORDER BY r.id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(filters.author)
            .bind(filters.is_favorited)
            .bind(viewer)
            .bind(filters.is_in_shopping_cart)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count recipes matching the same filters as [`RecipeRepo::list`].
    pub async fn count(
        pool: &PgPool,
        viewer: Option<DbId>,
        filters: &RecipeFilters,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM recipes r WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar(&query)
            .bind(filters.author)
            .bind(filters.is_favorited)
            .bind(viewer)
            .bind(filters.is_in_shopping_cart)
            .fetch_one(pool)
            .await
    }

    /// List an author's recipes newest first, capped at `limit`.
    ///
    /// Used for the recipe preview embedded in subscription payloads.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
        limit: i64,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipes
             WHERE author_id = $1
             ORDER BY id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(author_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Number of recipes published by an author.
    pub async fn count_by_author(pool: &PgPool, author_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    /// The ingredient lines of a recipe with joined reference data,
    /// ordered by ingredient name.
    pub async fn ingredients_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<RecipeIngredient>, sqlx::Error> {
        sqlx::query_as::<_, RecipeIngredient>(
            "SELECT i.id, i.name, i.measurement_unit, ri.amount
             FROM recipe_ingredients ri
             JOIN ingredients i ON i.id = ri.ingredient_id
             WHERE ri.recipe_id = $1
             ORDER BY i.name ASC",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }
}
