//! Route definition for the public short-link redirect.

use axum::routing::get;
use axum::Router;

use crate::handlers::short_link;
use crate::state::AppState;

/// Routes mounted at the root level.
///
/// ```text
/// GET /s/{code} -> resolve (302 redirect to the recipe page)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/s/{code}", get(short_link::resolve))
}
