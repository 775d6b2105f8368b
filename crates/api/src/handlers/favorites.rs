//! Handlers for marking recipes as favorites.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_core::error::CoreError;
use cookbook_core::types::DbId;
use cookbook_db::repositories::FavoriteRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::recipes::{require_recipe, RecipeSummary};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/recipes/{id}/favorite
///
/// Add a recipe to the viewer's favorites. Returns 201 with a compact
/// recipe payload; duplicates surface as 409.
pub async fn add_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<RecipeSummary>>)> {
    let recipe = require_recipe(&state.pool, id).await?;

    FavoriteRepo::add(&state.pool, auth_user.user_id, recipe.id).await?;
    tracing::debug!(user_id = auth_user.user_id, recipe_id = id, "Recipe favorited");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RecipeSummary::from(recipe),
        }),
    ))
}

/// DELETE /api/v1/recipes/{id}/favorite
///
/// Remove a recipe from the viewer's favorites. Returns 204; removing a
/// recipe that was never favorited is a validation error.
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_recipe(&state.pool, id).await?;

    let removed = FavoriteRepo::remove(&state.pool, auth_user.user_id, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::Validation(
            "Recipe is not in favorites".into(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
