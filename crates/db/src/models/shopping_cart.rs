//! Shopping cart model and aggregated shopping-list row.

use sqlx::FromRow;

use cookbook_core::types::{DbId, Timestamp};

/// A cart row from the `shopping_cart_items` table. The (user, recipe)
/// pair is unique.
#[derive(Debug, Clone, FromRow)]
pub struct ShoppingCartItem {
    pub id: DbId,
    pub user_id: DbId,
    pub recipe_id: DbId,
    pub created_at: Timestamp,
}

/// One aggregated ingredient line of a user's shopping list: summed amount
/// across every recipe in the cart.
#[derive(Debug, Clone, FromRow)]
pub struct ShoppingListRow {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}
