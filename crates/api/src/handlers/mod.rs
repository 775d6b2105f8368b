pub mod auth;
pub mod favorites;
pub mod ingredients;
pub mod recipes;
pub mod shopping_cart;
pub mod short_link;
pub mod subscriptions;
pub mod users;
