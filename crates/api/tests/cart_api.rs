//! HTTP-level integration tests for favorites, the shopping cart, and the
//! aggregated CSV export.

mod common;

use axum::http::{header, StatusCode};
use common::{body_text, delete_auth, get_auth, post_json_auth};
use cookbook_db::models::ingredient::CreateIngredient;
use cookbook_db::repositories::IngredientRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_ingredient(pool: &PgPool, name: &str, unit: &str) -> i64 {
    IngredientRepo::create(
        pool,
        &CreateIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

/// Create a recipe via the API, returning its id.
async fn create_recipe(
    pool: &PgPool,
    token: &str,
    name: &str,
    ingredients: serde_json::Value,
) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": name,
        "text": "Cook it.",
        "cooking_time": 20,
        "ingredients": ingredients
    });
    let response = post_json_auth(app, "/api/v1/recipes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    common::body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// Favorite add / duplicate / remove flow.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_favorite_flow(pool: PgPool) {
    common::create_test_user(&pool, "fan").await;
    let flour = seed_ingredient(&pool, "flour", "g").await;
    let token = common::login_token(&pool, "fan@test.com").await;
    let recipe_id = create_recipe(
        &pool,
        &token,
        "Pie",
        serde_json::json!([{ "id": flour, "amount": 100 }]),
    )
    .await;
    let uri = format!("/api/v1/recipes/{recipe_id}/favorite");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["id"], recipe_id);
    assert_eq!(json["data"]["name"], "Pie");

    // Favoriting twice conflicts.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Removal succeeds once, then is a validation error.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Favoriting a missing recipe returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_favorite_missing_recipe(pool: PgPool) {
    common::create_test_user(&pool, "fan").await;
    let token = common::login_token(&pool, "fan@test.com").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/recipes/999999/favorite",
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Shopping cart + CSV export
// ---------------------------------------------------------------------------

/// Cart add / remove flow mirrors favorites.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cart_flow(pool: PgPool) {
    common::create_test_user(&pool, "shopper").await;
    let flour = seed_ingredient(&pool, "flour", "g").await;
    let token = common::login_token(&pool, "shopper@test.com").await;
    let recipe_id = create_recipe(
        &pool,
        &token,
        "Stew",
        serde_json::json!([{ "id": flour, "amount": 100 }]),
    )
    .await;
    let uri = format!("/api/v1/recipes/{recipe_id}/shopping_cart");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The CSV export aggregates amounts across the recipes in the cart.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_download_shopping_cart_csv(pool: PgPool) {
    common::create_test_user(&pool, "exporter").await;
    let flour = seed_ingredient(&pool, "flour", "g").await;
    let milk = seed_ingredient(&pool, "milk", "ml").await;
    let token = common::login_token(&pool, "exporter@test.com").await;

    let bread = create_recipe(
        &pool,
        &token,
        "Bread",
        serde_json::json!([
            { "id": flour, "amount": 500 },
            { "id": milk, "amount": 200 }
        ]),
    )
    .await;
    let cake = create_recipe(
        &pool,
        &token,
        "Cake",
        serde_json::json!([{ "id": flour, "amount": 300 }]),
    )
    .await;

    for id in [bread, cake] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/recipes/{id}/shopping_cart"),
            serde_json::json!({}),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/recipes/download_shopping_cart", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("shopping_list.csv"));

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "name,measurement_unit,total_amount");
    // Ordered by ingredient name with summed amounts.
    assert_eq!(lines[1], "flour,g,800");
    assert_eq!(lines[2], "milk,ml,200");
}

/// An empty cart still downloads a header-only CSV.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_download_empty_cart(pool: PgPool) {
    common::create_test_user(&pool, "minimalist").await;
    let token = common::login_token(&pool, "minimalist@test.com").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/recipes/download_shopping_cart", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let csv = body_text(response).await;
    assert_eq!(csv.trim_end(), "name,measurement_unit,total_amount");
}
