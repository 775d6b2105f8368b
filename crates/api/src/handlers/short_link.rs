//! Handler for the public short-link redirect.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cookbook_core::short_link::is_valid_code;
use cookbook_db::repositories::RecipeRepo;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /s/{code}
///
/// Resolve a short-link code and redirect (302) to the recipe page.
/// Malformed codes get the same 404 as unknown ones.
pub async fn resolve(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Response> {
    if !is_valid_code(&code) {
        return Ok(not_found());
    }

    let Some(recipe) = RecipeRepo::find_by_short_link(&state.pool, &code).await? else {
        return Ok(not_found());
    };

    let location = format!("/recipes/{}", recipe.id);
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location)
        .body(axum::body::Body::empty())
        .map_err(|e| AppError::InternalError(format!("Response build error: {e}")))
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Short link not found", "code": "NOT_FOUND" })),
    )
        .into_response()
}
