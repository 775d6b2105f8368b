//! Handlers for the `/users` resource (listing, profiles, avatar, password).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_core::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use cookbook_core::error::CoreError;
use cookbook_core::pagination::{clamp_limit, clamp_offset};
use cookbook_core::types::DbId;
use cookbook_core::validation::validate_password;
use cookbook_db::models::user::User;
use cookbook_db::repositories::{SubscriptionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Public user profile as exposed by the API.
///
/// `is_subscribed` is viewer-relative: whether the requesting user follows
/// this profile. Always `false` for anonymous viewers.
#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub is_subscribed: bool,
}

/// Request body for `PUT /users/me/avatar`.
#[derive(Debug, Deserialize)]
pub struct SetAvatarRequest {
    /// Base64 data URL of the image; stored as an opaque string.
    pub avatar: String,
}

/// Request body for `POST /users/set_password`.
#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl UserPayload {
    fn from_user(user: User, is_subscribed: bool) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
            is_subscribed,
        }
    }
}

/// Build a [`UserPayload`] for `user` as seen by `viewer`.
pub(crate) async fn user_payload(
    pool: &PgPool,
    user: User,
    viewer: Option<DbId>,
) -> AppResult<UserPayload> {
    let is_subscribed = match viewer {
        Some(viewer_id) if viewer_id != user.id => {
            SubscriptionRepo::exists(pool, viewer_id, user.id).await?
        }
        _ => false,
    };
    Ok(UserPayload::from_user(user, is_subscribed))
}

/// Fetch a user row or map its absence to a 404.
pub(crate) async fn require_user(pool: &PgPool, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "User", id }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// Public paginated list of registered users, oldest first.
pub async fn list_users(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<UserPayload>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let users = UserRepo::list(&state.pool, limit, offset).await?;
    let total = UserRepo::count(&state.pool).await?;

    let mut data = Vec::with_capacity(users.len());
    for user in users {
        data.push(user_payload(&state.pool, user, viewer).await?);
    }

    Ok(Json(PageResponse {
        data,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/users/{id}
///
/// Public profile of a single user.
pub async fn get_user(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserPayload>>> {
    let user = require_user(&state.pool, id).await?;
    let data = user_payload(&state.pool, user, viewer).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/me
///
/// Profile of the authenticated user.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserPayload>>> {
    let user = require_user(&state.pool, auth_user.user_id).await?;
    let data = user_payload(&state.pool, user, Some(auth_user.user_id)).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/users/me/avatar
///
/// Set the authenticated user's avatar. The payload is stored verbatim.
pub async fn set_avatar(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SetAvatarRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    if input.avatar.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Avatar must not be empty".into(),
        )));
    }

    let user = UserRepo::set_avatar(&state.pool, auth_user.user_id, &input.avatar)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth_user.user_id,
            })
        })?;

    Ok(Json(DataResponse {
        data: serde_json::json!({ "avatar": user.avatar }),
    }))
}

/// DELETE /api/v1/users/me/avatar
///
/// Remove the authenticated user's avatar. Returns 204.
pub async fn delete_avatar(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<StatusCode> {
    UserRepo::clear_avatar(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/set_password
///
/// Change the authenticated user's password after verifying the current one.
/// A wrong current password is a validation error (400), not an auth failure.
pub async fn set_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SetPasswordRequest>,
) -> AppResult<StatusCode> {
    let user = require_user(&state.pool, auth_user.user_id).await?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Current password is incorrect".into(),
        )));
    }

    validate_password(&input.new_password).map_err(AppError::Core)?;

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &new_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}
