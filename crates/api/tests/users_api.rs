//! HTTP-level integration tests for user profiles, avatars, and passwords.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth, TEST_PASSWORD,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Listing and profiles
// ---------------------------------------------------------------------------

/// The user list is public and paginated with a total count.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users_public(pool: PgPool) {
    common::create_test_user(&pool, "alpha").await;
    common::create_test_user(&pool, "bravo").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users?limit=1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["limit"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["username"], "alpha");
    assert_eq!(json["data"][0]["is_subscribed"], false);
}

/// A single profile is public; unknown ids return 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_user_profile(pool: PgPool) {
    let user = common::create_test_user(&pool, "profiled").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/users/{}", user.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "profiled");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// `is_subscribed` reflects the viewer's subscriptions.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_is_subscribed_flag(pool: PgPool) {
    common::create_test_user(&pool, "viewer").await;
    let author = common::create_test_user(&pool, "author").await;
    let token = common::login_token(&pool, "viewer@test.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/users/{}/subscribe", author.id),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/users/{}", author.id), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_subscribed"], true);
}

/// `/users/me` requires a token and returns the caller's own profile.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me(pool: PgPool) {
    let user = common::create_test_user(&pool, "selfuser").await;
    let token = common::login_token(&pool, "selfuser@test.com").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Avatar
// ---------------------------------------------------------------------------

/// Avatar can be set and removed; an empty payload is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_avatar_roundtrip(pool: PgPool) {
    common::create_test_user(&pool, "avataruser").await;
    let token = common::login_token(&pool, "avataruser@test.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "avatar": "data:image/png;base64,AAAA" });
    let response = put_json_auth(app, "/api/v1/users/me/avatar", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["avatar"], "data:image/png;base64,AAAA");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "avatar": "" });
    let response = put_json_auth(app, "/api/v1/users/me/avatar", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/users/me/avatar", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Password change
// ---------------------------------------------------------------------------

/// Changing the password requires the current one and takes effect at login.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_password(pool: PgPool) {
    common::create_test_user(&pool, "pwchanger").await;
    let token = common::login_token(&pool, "pwchanger@test.com").await;

    // Wrong current password is a validation error, not an auth failure.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "current_password": "definitely-wrong",
        "new_password": "another_strong_pw_456"
    });
    let response = post_json_auth(app, "/api/v1/users/set_password", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Correct current password succeeds.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "current_password": TEST_PASSWORD,
        "new_password": "another_strong_pw_456"
    });
    let response = post_json_auth(app, "/api/v1/users/set_password", body, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The old password no longer works, the new one does.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "pwchanger@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let body =
        serde_json::json!({ "email": "pwchanger@test.com", "password": "another_strong_pw_456" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A too-short new password is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_password_too_short(pool: PgPool) {
    common::create_test_user(&pool, "shortpw").await;
    let token = common::login_token(&pool, "shortpw@test.com").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "current_password": TEST_PASSWORD,
        "new_password": "tiny"
    });
    let response = post_json_auth(app, "/api/v1/users/set_password", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
