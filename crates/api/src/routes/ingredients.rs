//! Route definitions for the `/ingredients` reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::ingredients;
use crate::state::AppState;

/// Routes mounted at `/ingredients`.
///
/// ```text
/// GET  /      -> list_ingredients (public, ?name= prefix filter)
/// POST /      -> create_ingredient (staff only)
/// GET  /{id}  -> get_ingredient (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ingredients::list_ingredients).post(ingredients::create_ingredient),
        )
        .route("/{id}", get(ingredients::get_ingredient))
}
