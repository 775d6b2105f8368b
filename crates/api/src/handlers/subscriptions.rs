//! Handlers for user-to-author subscriptions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_core::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use cookbook_core::error::CoreError;
use cookbook_core::pagination::{clamp_limit, clamp_offset};
use cookbook_core::types::DbId;
use cookbook_db::models::user::User;
use cookbook_db::repositories::{RecipeRepo, SubscriptionRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::recipes::RecipeSummary;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// How many of an author's recipes are embedded in a subscription payload
/// when the client does not ask for a specific `recipes_limit`.
const DEFAULT_RECIPES_LIMIT: i64 = 3;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for subscription listings.
#[derive(Debug, Deserialize)]
pub struct SubscriptionListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Cap on the embedded recipe preview per author.
    pub recipes_limit: Option<i64>,
}

/// An author the viewer follows, with a preview of their recipes.
#[derive(Debug, Serialize)]
pub struct SubscribedAuthor {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: i64,
}

/// Build a [`SubscribedAuthor`] payload with its embedded recipe preview.
async fn author_payload(
    pool: &PgPool,
    author: User,
    recipes_limit: i64,
) -> AppResult<SubscribedAuthor> {
    let recipes = RecipeRepo::list_by_author(pool, author.id, recipes_limit).await?;
    let recipes_count = RecipeRepo::count_by_author(pool, author.id).await?;

    Ok(SubscribedAuthor {
        id: author.id,
        email: author.email,
        username: author.username,
        first_name: author.first_name,
        last_name: author.last_name,
        avatar: author.avatar,
        is_subscribed: true,
        recipes: recipes.into_iter().map(RecipeSummary::from).collect(),
        recipes_count,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users/subscriptions
///
/// Paginated list of the authors the viewer follows, oldest subscription
/// first, each with a recipe preview.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<SubscriptionListParams>,
) -> AppResult<Json<PageResponse<SubscribedAuthor>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let recipes_limit = clamp_limit(params.recipes_limit, DEFAULT_RECIPES_LIMIT, MAX_PAGE_LIMIT);

    let authors =
        SubscriptionRepo::list_authors(&state.pool, auth_user.user_id, limit, offset).await?;
    let total = SubscriptionRepo::count_authors(&state.pool, auth_user.user_id).await?;

    let mut data = Vec::with_capacity(authors.len());
    for author in authors {
        data.push(author_payload(&state.pool, author, recipes_limit).await?);
    }

    Ok(Json(PageResponse {
        data,
        total,
        limit,
        offset,
    }))
}

/// POST /api/v1/users/{id}/subscribe
///
/// Follow an author. Self-subscription is a validation error; duplicates
/// surface as 409 via the unique constraint.
pub async fn subscribe(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<SubscriptionListParams>,
) -> AppResult<(StatusCode, Json<DataResponse<SubscribedAuthor>>)> {
    if id == auth_user.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot subscribe to yourself".into(),
        )));
    }

    let author = crate::handlers::users::require_user(&state.pool, id).await?;

    SubscriptionRepo::create(&state.pool, auth_user.user_id, author.id).await?;
    tracing::info!(user_id = auth_user.user_id, author_id = author.id, "Subscribed");

    let recipes_limit = clamp_limit(params.recipes_limit, DEFAULT_RECIPES_LIMIT, MAX_PAGE_LIMIT);
    let data = author_payload(&state.pool, author, recipes_limit).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// DELETE /api/v1/users/{id}/subscribe
///
/// Unfollow an author. Returns 204; unfollowing someone the viewer does not
/// follow is a validation error.
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    crate::handlers::users::require_user(&state.pool, id).await?;

    let removed = SubscriptionRepo::delete(&state.pool, auth_user.user_id, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::Validation(
            "Not subscribed to this author".into(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
