//! Handlers for the shopping cart and the aggregated CSV export.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use cookbook_core::error::CoreError;
use cookbook_core::shopping_list::{render_csv, ShoppingListEntry};
use cookbook_core::types::DbId;
use cookbook_db::repositories::ShoppingCartRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::recipes::{require_recipe, RecipeSummary};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/recipes/{id}/shopping_cart
///
/// Add a recipe to the viewer's cart. Returns 201 with a compact recipe
/// payload; duplicates surface as 409.
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<RecipeSummary>>)> {
    let recipe = require_recipe(&state.pool, id).await?;

    ShoppingCartRepo::add(&state.pool, auth_user.user_id, recipe.id).await?;
    tracing::debug!(user_id = auth_user.user_id, recipe_id = id, "Recipe added to cart");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RecipeSummary::from(recipe),
        }),
    ))
}

/// DELETE /api/v1/recipes/{id}/shopping_cart
///
/// Remove a recipe from the viewer's cart. Returns 204; removing a recipe
/// that is not in the cart is a validation error.
pub async fn remove_from_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_recipe(&state.pool, id).await?;

    let removed = ShoppingCartRepo::remove(&state.pool, auth_user.user_id, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::Validation(
            "Recipe is not in the shopping cart".into(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/recipes/download_shopping_cart
///
/// Aggregate the viewer's cart into one line per ingredient (amounts summed
/// across recipes) and return it as a CSV attachment.
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Response> {
    let rows = ShoppingCartRepo::shopping_list(&state.pool, auth_user.user_id).await?;

    let entries: Vec<ShoppingListEntry> = rows
        .into_iter()
        .map(|row| ShoppingListEntry {
            name: row.name,
            measurement_unit: row.measurement_unit,
            total_amount: row.total_amount,
        })
        .collect();
    let csv = render_csv(&entries);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"shopping_list.csv\"",
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::InternalError(format!("Response build error: {e}")))
}
