//! Route definitions for the `/users` resource, including subscriptions.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{subscriptions, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                   -> list_users (public)
/// GET    /me                 -> me
/// PUT    /me/avatar          -> set_avatar
/// DELETE /me/avatar          -> delete_avatar
/// POST   /set_password       -> set_password
/// GET    /subscriptions      -> list_subscriptions
/// GET    /{id}               -> get_user (public)
/// POST   /{id}/subscribe     -> subscribe
/// DELETE /{id}/subscribe     -> unsubscribe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/me", get(users::me))
        .route(
            "/me/avatar",
            put(users::set_avatar).delete(users::delete_avatar),
        )
        .route("/set_password", post(users::set_password))
        .route("/subscriptions", get(subscriptions::list_subscriptions))
        .route("/{id}", get(users::get_user))
        .route(
            "/{id}/subscribe",
            post(subscriptions::subscribe).delete(subscriptions::unsubscribe),
        )
}
