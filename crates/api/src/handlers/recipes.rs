//! Handlers for the `/recipes` resource (CRUD, filtering, short links).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_core::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use cookbook_core::error::CoreError;
use cookbook_core::pagination::{clamp_limit, clamp_offset};
use cookbook_core::short_link::generate_short_link;
use cookbook_core::types::{DbId, Timestamp};
use cookbook_core::validation::{
    validate_ingredient_list, validate_positive_value, validate_recipe_name, IngredientRef,
};
use cookbook_db::models::recipe::{NewRecipe, Recipe, RecipeChanges, RecipeFilters};
use cookbook_db::repositories::{FavoriteRepo, IngredientRepo, RecipeRepo, ShoppingCartRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::users::{require_user, user_payload, UserPayload};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Attempts at inserting a recipe before giving up on short-link collisions.
/// Codes are 6 hex chars, so collisions are rare but possible.
const SHORT_LINK_ATTEMPTS: usize = 5;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One `{ "id": ..., "amount": ... }` entry in a recipe payload.
#[derive(Debug, Deserialize)]
pub struct IngredientAmount {
    pub id: DbId,
    pub amount: i32,
}

/// Request body for `POST /recipes`.
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientAmount>,
}

/// Request body for `PATCH /recipes/{id}`.
///
/// Scalar fields are optional; the ingredient list is mandatory because the
/// ingredient set is always replaced wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub ingredients: Option<Vec<IngredientAmount>>,
}

/// Query parameters for `GET /recipes`.
#[derive(Debug, Deserialize)]
pub struct RecipeListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub author: Option<DbId>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

/// Full recipe payload with author, ingredients, and viewer-relative flags.
#[derive(Debug, Serialize)]
pub struct RecipePayload {
    pub id: DbId,
    pub author: UserPayload,
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i32,
    pub ingredients: Vec<RecipeIngredientPayload>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub created_at: Timestamp,
}

/// One ingredient line within [`RecipePayload`].
#[derive(Debug, Serialize)]
pub struct RecipeIngredientPayload {
    pub id: DbId,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Compact recipe form used in favorites, cart responses, and subscription
/// previews.
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i32,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload assembly
// ---------------------------------------------------------------------------

/// Build the full [`RecipePayload`] for `recipe` as seen by `viewer`.
pub(crate) async fn recipe_payload(
    pool: &PgPool,
    recipe: Recipe,
    viewer: Option<DbId>,
) -> AppResult<RecipePayload> {
    let author = require_user(pool, recipe.author_id).await?;
    let author = user_payload(pool, author, viewer).await?;

    let ingredients = RecipeRepo::ingredients_for_recipe(pool, recipe.id)
        .await?
        .into_iter()
        .map(|line| RecipeIngredientPayload {
            id: line.id,
            name: line.name,
            measurement_unit: line.measurement_unit,
            amount: line.amount,
        })
        .collect();

    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(viewer_id) => (
            FavoriteRepo::exists(pool, viewer_id, recipe.id).await?,
            ShoppingCartRepo::exists(pool, viewer_id, recipe.id).await?,
        ),
        None => (false, false),
    };

    Ok(RecipePayload {
        id: recipe.id,
        author,
        name: recipe.name,
        image: recipe.image,
        text: recipe.text,
        cooking_time: recipe.cooking_time,
        ingredients,
        is_favorited,
        is_in_shopping_cart,
        created_at: recipe.created_at,
    })
}

/// Fetch a recipe row or map its absence to a 404.
pub(crate) async fn require_recipe(pool: &PgPool, id: DbId) -> AppResult<Recipe> {
    RecipeRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Recipe", id }))
}

/// Validate an incoming ingredient list and check that every id exists.
async fn validate_ingredients(
    pool: &PgPool,
    ingredients: &[IngredientAmount],
) -> AppResult<Vec<IngredientRef>> {
    let refs: Vec<IngredientRef> = ingredients
        .iter()
        .map(|i| IngredientRef {
            id: i.id,
            amount: i.amount,
        })
        .collect();

    validate_ingredient_list(&refs).map_err(AppError::Core)?;

    let ids: Vec<DbId> = refs.iter().map(|r| r.id).collect();
    let existing = IngredientRepo::count_existing(pool, &ids).await?;
    if existing != ids.len() as i64 {
        return Err(AppError::Core(CoreError::Validation(
            "Recipe references unknown ingredients".into(),
        )));
    }

    Ok(refs)
}

/// Whether a sqlx error is a unique violation on the short-link constraint.
fn is_short_link_collision(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_recipes_short_link")
    )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/recipes
///
/// Public paginated list, newest first, with viewer-relative filters.
pub async fn list_recipes(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Query(params): Query<RecipeListParams>,
) -> AppResult<Json<PageResponse<RecipePayload>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let filters = RecipeFilters {
        author: params.author,
        is_favorited: params.is_favorited,
        is_in_shopping_cart: params.is_in_shopping_cart,
    };

    let recipes = RecipeRepo::list(&state.pool, viewer, &filters, limit, offset).await?;
    let total = RecipeRepo::count(&state.pool, viewer, &filters).await?;

    let mut data = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        data.push(recipe_payload(&state.pool, recipe, viewer).await?);
    }

    Ok(Json(PageResponse {
        data,
        total,
        limit,
        offset,
    }))
}

/// POST /api/v1/recipes
///
/// Publish a recipe. Returns 201 with the full payload.
pub async fn create_recipe(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RecipePayload>>)> {
    validate_recipe_name(&input.name).map_err(AppError::Core)?;
    validate_positive_value(input.cooking_time, "Cooking time").map_err(AppError::Core)?;
    if input.text.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Recipe text must not be empty".into(),
        )));
    }
    let refs = validate_ingredients(&state.pool, &input.ingredients).await?;

    // Each attempt draws a fresh code; the unique constraint arbitrates races.
    let mut created = None;
    for attempt in 0..SHORT_LINK_ATTEMPTS {
        let new_recipe = NewRecipe {
            author_id: auth_user.user_id,
            name: input.name.clone(),
            image: input.image.clone(),
            text: input.text.clone(),
            cooking_time: input.cooking_time,
            short_link: generate_short_link(),
        };
        match RecipeRepo::create(&state.pool, &new_recipe, &refs).await {
            Ok(recipe) => {
                created = Some(recipe);
                break;
            }
            Err(err) if is_short_link_collision(&err) => {
                tracing::warn!(attempt, "Short-link collision, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }
    let recipe = created.ok_or_else(|| {
        AppError::InternalError("Could not allocate a unique short link".into())
    })?;

    tracing::info!(recipe_id = recipe.id, author_id = auth_user.user_id, "Recipe created");

    let data = recipe_payload(&state.pool, recipe, Some(auth_user.user_id)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/v1/recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RecipePayload>>> {
    let recipe = require_recipe(&state.pool, id).await?;
    let data = recipe_payload(&state.pool, recipe, viewer).await?;
    Ok(Json(DataResponse { data }))
}

/// PATCH /api/v1/recipes/{id}
///
/// Author-only partial update. The ingredient list must be supplied and
/// replaces the existing set.
pub async fn update_recipe(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRecipeRequest>,
) -> AppResult<Json<DataResponse<RecipePayload>>> {
    let recipe = require_recipe(&state.pool, id).await?;
    if recipe.author_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can edit this recipe".into(),
        )));
    }

    if let Some(name) = &input.name {
        validate_recipe_name(name).map_err(AppError::Core)?;
    }
    if let Some(cooking_time) = input.cooking_time {
        validate_positive_value(cooking_time, "Cooking time").map_err(AppError::Core)?;
    }
    if let Some(text) = &input.text {
        if text.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Recipe text must not be empty".into(),
            )));
        }
    }
    let Some(ingredients) = &input.ingredients else {
        return Err(AppError::Core(CoreError::Validation(
            "Recipe update must include the ingredient list".into(),
        )));
    };
    let refs = validate_ingredients(&state.pool, ingredients).await?;

    let changes = RecipeChanges {
        name: input.name,
        image: input.image,
        text: input.text,
        cooking_time: input.cooking_time,
    };
    let updated = RecipeRepo::update(&state.pool, id, &changes, &refs)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Recipe", id }))?;

    let data = recipe_payload(&state.pool, updated, Some(auth_user.user_id)).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/recipes/{id}
///
/// Author-only. Returns 204; ingredient rows, favorites, and cart entries
/// cascade in the database.
pub async fn delete_recipe(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let recipe = require_recipe(&state.pool, id).await?;
    if recipe.author_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can delete this recipe".into(),
        )));
    }

    RecipeRepo::delete(&state.pool, id).await?;
    tracing::info!(recipe_id = id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/recipes/{id}/get-link
///
/// Return the public shareable short link for a recipe.
pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let recipe = require_recipe(&state.pool, id).await?;
    let url = format!("{}/s/{}", state.config.public_base_url, recipe.short_link);
    Ok(Json(DataResponse {
        data: serde_json::json!({ "short_link": url }),
    }))
}
