//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod favorite_repo;
pub mod ingredient_repo;
pub mod recipe_repo;
pub mod session_repo;
pub mod shopping_cart_repo;
pub mod subscription_repo;
pub mod user_repo;

pub use favorite_repo::FavoriteRepo;
pub use ingredient_repo::IngredientRepo;
pub use recipe_repo::RecipeRepo;
pub use session_repo::SessionRepo;
pub use shopping_cart_repo::ShoppingCartRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
