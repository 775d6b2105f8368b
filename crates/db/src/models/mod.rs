//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create DTOs for inserts
//! - Query parameter structs where a resource supports filtering

pub mod favorite;
pub mod ingredient;
pub mod recipe;
pub mod session;
pub mod shopping_cart;
pub mod subscription;
pub mod user;
