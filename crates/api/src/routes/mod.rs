pub mod auth;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod short_link;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
///
/// /users                                 list (public, paginated)
/// /users/me                              own profile (requires auth)
/// /users/me/avatar                       set / remove avatar (PUT, DELETE)
/// /users/set_password                    change password (POST)
/// /users/subscriptions                   followed authors (requires auth)
/// /users/{id}                            public profile
/// /users/{id}/subscribe                  follow / unfollow (POST, DELETE)
///
/// /ingredients                           list (public), create (staff only)
/// /ingredients/{id}                      get (public)
///
/// /recipes                               list (public, filtered), create
/// /recipes/download_shopping_cart        aggregated CSV export (GET)
/// /recipes/{id}                          get, update, delete (author only)
/// /recipes/{id}/get-link                 shareable short link (GET)
/// /recipes/{id}/favorite                 favorite / unfavorite (POST, DELETE)
/// /recipes/{id}/shopping_cart            cart add / remove (POST, DELETE)
/// ```
///
/// `/health` and the `/s/{code}` redirect are mounted at the root level,
/// outside this tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/ingredients", ingredients::router())
        .nest("/recipes", recipes::router())
}
