//! Recipe entity model and DTOs.

use serde::Deserialize;
use sqlx::FromRow;

use cookbook_core::types::{DbId, Timestamp};

/// A recipe row from the `recipes` table.
#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: DbId,
    pub author_id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    /// Minutes, constrained to 1..=32000.
    pub cooking_time: i32,
    pub short_link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO for a recipe row. The ingredient list travels separately so
/// the repository can write both inside one transaction.
pub struct NewRecipe {
    pub author_id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i32,
    pub short_link: String,
}

/// Update DTO for a recipe row. All fields are optional except the
/// ingredient set, which is always replaced wholesale on update.
pub struct RecipeChanges {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

/// One ingredient of a recipe with its joined reference data.
///
/// `id` is the ingredient id, not the join-row id; this is the shape the
/// API exposes inside recipe payloads.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeIngredient {
    pub id: DbId,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Viewer-relative filters for `GET /recipes`.
///
/// `is_favorited` / `is_in_shopping_cart` are evaluated against the viewer;
/// for an anonymous viewer a `true` filter matches nothing.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeFilters {
    pub author: Option<DbId>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}
