mod common;

use autodose_backend::entities::prelude::Profiles;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use sea_orm::EntityTrait;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn profile_defaults_to_empty_before_first_save() {
    let test_app = spawn_app().await;
    let (user_id, token) = register_and_login(&test_app.app, "fan@example.com").await;

    let response = get(&test_app.app, "/profiles/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["id"], user_id.as_str());
    assert!(profile["display_name"].is_null());
    assert!(profile["bio"].is_null());

    // No row was created by the read
    let rows = Profiles::find().all(&test_app.db).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn profile_upsert_is_idempotent_per_user() {
    let test_app = spawn_app().await;
    let (user_id, token) = register_and_login(&test_app.app, "fan@example.com").await;

    let response = put_json(
        &test_app.app,
        "/profiles/me",
        Some(&token),
        json!({ "display_name": "Kenji", "bio": "JDM photographer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(
        &test_app.app,
        "/profiles/me",
        Some(&token),
        json!({ "display_name": "Kenji Sato" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Exactly one row, latest display_name, untouched bio preserved
    let rows = Profiles::find().all(&test_app.db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, user_id);
    assert_eq!(rows[0].display_name.as_deref(), Some("Kenji Sato"));
    assert_eq!(rows[0].bio.as_deref(), Some("JDM photographer"));
}

#[tokio::test]
async fn avatar_upload_overwrites_and_updates_profile() {
    let test_app = spawn_app().await;
    let (user_id, token) = register_and_login(&test_app.app, "fan@example.com").await;

    let response = post_multipart(
        &test_app.app,
        "/profiles/me/avatar",
        &token,
        MultipartBuilder::new().file("file", "me.png", b"pngbytes"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let url = body_json(response).await["url"].as_str().unwrap().to_string();
    let expected_key = format!("{}/avatar.png", user_id);
    assert_eq!(
        url,
        format!("http://storage.test/photos/{}", expected_key)
    );
    assert!(test_app.storage.has_object("photos", &expected_key));

    // Second upload with the same extension reuses the key
    let response = post_multipart(
        &test_app.app,
        "/profiles/me/avatar",
        &token,
        MultipartBuilder::new().file("file", "newer.png", b"pngbytes2"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(test_app.storage.object_count(), 1);

    let response = get(&test_app.app, "/profiles/me", Some(&token)).await;
    let profile = body_json(response).await;
    assert_eq!(profile["avatar_url"].as_str().unwrap(), url);
}

#[tokio::test]
async fn session_endpoint_reflects_the_bearer_token() {
    let test_app = spawn_app().await;
    let (user_id, token) = register_and_login(&test_app.app, "fan@example.com").await;

    let response = get(&test_app.app, "/auth/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let session = body_json(response).await;
    assert_eq!(session["user_id"], user_id.as_str());
    assert_eq!(session["email"], "fan@example.com");

    let response = get(&test_app.app, "/auth/session", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&test_app.app, "/auth/session", Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn truncated_avatar_upload_is_a_bad_request() {
    let test_app = spawn_app().await;
    let (_user_id, token) = register_and_login(&test_app.app, "fan@example.com").await;

    // Body ends mid-field, before any closing boundary
    let request = Request::builder()
        .method("POST")
        .uri("/profiles/me/avatar")
        .header("content-type", "multipart/form-data; boundary=cut")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::from(
            "--cut\r\nContent-Disposition: form-data; name=\"file\"; filename=\"me.png\"\r\n\r\npartial",
        ))
        .unwrap();
    let response = test_app.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test_app.storage.object_count(), 0);
}

#[tokio::test]
async fn password_change_requires_the_current_password() {
    let test_app = spawn_app().await;
    let (_user_id, token) = register_and_login(&test_app.app, "fan@example.com").await;

    let response = put_json(
        &test_app.app,
        "/auth/password",
        Some(&token),
        json!({ "current_password": "not-my-password", "new_password": "a-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Too-short replacement is rejected before anything changes
    let response = put_json(
        &test_app.app,
        "/auth/password",
        Some(&token),
        json!({ "current_password": "hunter2hunter2", "new_password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        &test_app.app,
        "/auth/password",
        Some(&token),
        json!({ "current_password": "hunter2hunter2", "new_password": "a-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old credentials stop working, the new ones log in
    let response = post_json(
        &test_app.app,
        "/auth/login",
        None,
        json!({ "email": "fan@example.com", "password": "hunter2hunter2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        &test_app.app,
        "/auth/login",
        None,
        json!({ "email": "fan@example.com", "password": "a-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn account_deletion_removes_the_user_and_their_rows() {
    let test_app = spawn_app().await;
    let (id_a, token_a) = register_and_login(&test_app.app, "a@example.com").await;
    let (id_b, _token_b) = register_and_login(&test_app.app, "b@example.com").await;
    seed_photo(&test_app.db, "p-1", &id_b).await;

    // A has a profile and a comment on B's photo
    let response = put_json(
        &test_app.app,
        "/profiles/me",
        Some(&token_a),
        json!({ "display_name": "Kenji" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post_json(
        &test_app.app,
        "/comments",
        Some(&token_a),
        json!({ "photo_id": "p-1", "content": "clean shot" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete(&test_app.app, "/auth/account", Some(&token_a)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The outstanding token dies at the session gate
    let response = get(&test_app.app, "/auth/session", Some(&token_a)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // And the credentials are gone for good
    let response = post_json(
        &test_app.app,
        "/auth/login",
        None,
        json!({ "email": "a@example.com", "password": "hunter2hunter2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Profile and comment rows went with the account
    let profile = Profiles::find_by_id(&id_a).one(&test_app.db).await.unwrap();
    assert!(profile.is_none());
    let response = get(&test_app.app, "/comments?photo_id=p-1", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn account_deletion_cascades_engagement_on_owned_content() {
    let test_app = spawn_app().await;
    let (id_a, token_a) = register_and_login(&test_app.app, "a@example.com").await;
    let (_id_b, token_b) = register_and_login(&test_app.app, "b@example.com").await;
    seed_photo(&test_app.db, "p-1", &id_a).await;

    // Someone else commented on A's photo
    let response = post_json(
        &test_app.app,
        "/comments",
        Some(&token_b),
        json!({ "photo_id": "p-1", "content": "so clean" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete(&test_app.app, "/auth/account", Some(&token_a)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The photo left the gallery and took its comments with it
    let response = get(&test_app.app, "/photos", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
    let response = get(&test_app.app, "/comments?photo_id=p-1", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let test_app = spawn_app().await;
    register_and_login(&test_app.app, "fan@example.com").await;

    let response = post_json(
        &test_app.app,
        "/auth/register",
        None,
        json!({ "email": "fan@example.com", "password": "hunter2hunter2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let test_app = spawn_app().await;
    register_and_login(&test_app.app, "fan@example.com").await;

    let response = post_json(
        &test_app.app,
        "/auth/login",
        None,
        json!({ "email": "fan@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
