//! Handlers for the `/ingredients` reference data.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_core::constants::{MAX_INGREDIENT_NAME_LEN, MAX_MEASUREMENT_UNIT_LEN};
use cookbook_core::error::CoreError;
use cookbook_core::types::DbId;
use cookbook_db::models::ingredient::{CreateIngredient, Ingredient, IngredientListParams};
use cookbook_db::repositories::IngredientRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/ingredients
///
/// Public, unpaginated listing with an optional `?name=` prefix filter.
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(params): Query<IngredientListParams>,
) -> AppResult<Json<DataResponse<Vec<Ingredient>>>> {
    let data = IngredientRepo::list(&state.pool, params.name.as_deref()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/ingredients/{id}
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Ingredient>>> {
    let data = IngredientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Ingredient",
                id,
            })
        })?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/ingredients
///
/// Add a new ingredient to the reference set. Staff only; duplicates
/// surface as 409 via `uq_ingredients_name`.
pub async fn create_ingredient(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateIngredient>,
) -> AppResult<(StatusCode, Json<DataResponse<Ingredient>>)> {
    let user = crate::handlers::users::require_user(&state.pool, auth_user.user_id).await?;
    if !user.is_staff {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only staff can manage ingredients".into(),
        )));
    }

    if input.name.trim().is_empty() || input.name.len() > MAX_INGREDIENT_NAME_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Ingredient name must be non-empty and at most {MAX_INGREDIENT_NAME_LEN} characters"
        ))));
    }
    if input.measurement_unit.trim().is_empty()
        || input.measurement_unit.len() > MAX_MEASUREMENT_UNIT_LEN
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Measurement unit must be non-empty and at most {MAX_MEASUREMENT_UNIT_LEN} characters"
        ))));
    }

    let data = IngredientRepo::create(&state.pool, &input).await?;
    tracing::info!(ingredient_id = data.id, "Ingredient created");

    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}
