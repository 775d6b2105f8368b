//! HTTP-level integration tests for author subscriptions.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth};
use cookbook_core::validation::IngredientRef;
use cookbook_db::models::ingredient::CreateIngredient;
use cookbook_db::models::recipe::NewRecipe;
use cookbook_db::repositories::{IngredientRepo, RecipeRepo};
use sqlx::PgPool;

/// Seed one recipe for an author so subscription previews have content.
async fn seed_recipe(pool: &PgPool, author_id: i64, name: &str, short_link: &str) {
    let salt = match IngredientRepo::list(pool, Some("salt")).await.unwrap().first() {
        Some(existing) => existing.clone(),
        None => IngredientRepo::create(
            pool,
            &CreateIngredient {
                name: "salt".to_string(),
                measurement_unit: "g".to_string(),
            },
        )
        .await
        .unwrap(),
    };

    RecipeRepo::create(
        pool,
        &NewRecipe {
            author_id,
            name: name.to_string(),
            image: None,
            text: "Cook it.".to_string(),
            cooking_time: 10,
            short_link: short_link.to_string(),
        },
        &[IngredientRef { id: salt.id, amount: 5 }],
    )
    .await
    .unwrap();
}

/// Subscribing returns 201 with the author's recipe preview and count.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_returns_author_payload(pool: PgPool) {
    common::create_test_user(&pool, "follower").await;
    let author = common::create_test_user(&pool, "cheffy").await;
    seed_recipe(&pool, author.id, "Soup", "aaa111").await;
    seed_recipe(&pool, author.id, "Stew", "bbb222").await;
    let token = common::login_token(&pool, "follower@test.com").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/users/{}/subscribe", author.id),
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], author.id);
    assert_eq!(json["data"]["is_subscribed"], true);
    assert_eq!(json["data"]["recipes_count"], 2);
    let recipes = json["data"]["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 2);
    // Newest first in the preview.
    assert_eq!(recipes[0]["name"], "Stew");
}

/// Subscribing to yourself returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_to_self_rejected(pool: PgPool) {
    let user = common::create_test_user(&pool, "narcissus").await;
    let token = common::login_token(&pool, "narcissus@test.com").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/users/{}/subscribe", user.id),
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Subscribing twice to the same author returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_subscribe_conflict(pool: PgPool) {
    common::create_test_user(&pool, "eager").await;
    let author = common::create_test_user(&pool, "popular").await;
    let token = common::login_token(&pool, "eager@test.com").await;

    let uri = format!("/api/v1/users/{}/subscribe", author.id);
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Subscribing to a missing author returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_unknown_author(pool: PgPool) {
    common::create_test_user(&pool, "lost").await;
    let token = common::login_token(&pool, "lost@test.com").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/users/999999/subscribe",
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Unsubscribing removes the link; unsubscribing again is a 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unsubscribe(pool: PgPool) {
    common::create_test_user(&pool, "fickle").await;
    let author = common::create_test_user(&pool, "dropped").await;
    let token = common::login_token(&pool, "fickle@test.com").await;

    let uri = format!("/api/v1/users/{}/subscribe", author.id);
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The subscription list honors `recipes_limit` and pagination.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_subscriptions(pool: PgPool) {
    common::create_test_user(&pool, "reader").await;
    let writer = common::create_test_user(&pool, "writer").await;
    for i in 0..4 {
        seed_recipe(&pool, writer.id, &format!("Dish {i}"), &format!("cc{i:04}")).await;
    }
    let token = common::login_token(&pool, "reader@test.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/users/{}/subscribe", writer.id),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/subscriptions?recipes_limit=2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    let authors = json["data"].as_array().unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0]["recipes_count"], 4);
    assert_eq!(authors[0]["recipes"].as_array().unwrap().len(), 2);
}

/// The subscription list requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_subscriptions_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/subscriptions").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
