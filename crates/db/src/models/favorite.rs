//! Favorite (user -> recipe) model.

use sqlx::FromRow;

use cookbook_core::types::{DbId, Timestamp};

/// A favorite row from the `favorites` table. The (user, recipe) pair is
/// unique.
#[derive(Debug, Clone, FromRow)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub recipe_id: DbId,
    pub created_at: Timestamp,
}
