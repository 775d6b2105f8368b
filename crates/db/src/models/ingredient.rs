//! Ingredient reference-data model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cookbook_core::types::{DbId, Timestamp};

/// An ingredient row from the `ingredients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ingredient {
    pub id: DbId,
    pub name: String,
    pub measurement_unit: String,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// DTO for creating a new ingredient (staff only).
#[derive(Debug, Deserialize)]
pub struct CreateIngredient {
    pub name: String,
    pub measurement_unit: String,
}

/// Query parameters for `GET /ingredients` (`?name=` prefix filter).
#[derive(Debug, Deserialize)]
pub struct IngredientListParams {
    pub name: Option<String>,
}
