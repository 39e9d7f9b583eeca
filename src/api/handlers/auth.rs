use crate::api::error::AppError;
use crate::entities::{comments, likes, photos, prelude::*, user_roles, users, videos};
use crate::utils::auth::{create_jwt, Claims};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
pub struct AuthRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = AuthRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(payload): Json<AuthRequest>,
) -> Result<StatusCode, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .to_string();

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(payload.email.to_lowercase()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now()),
    };

    user.insert(&state.db)
        .await
        .map_err(|_| AppError::Validation("Email already registered".to_string()))?;

    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = Users::find()
        .filter(users::Column::Email.eq(payload.email.to_lowercase()))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::AuthRequired("Invalid credentials".to_string()))?;

    let argon2 = Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    argon2
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::AuthRequired("Invalid credentials".to_string()))?;

    let token = create_jwt(
        &user.id,
        &state.config.jwt_secret,
        state.config.session_ttl_hours,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(AuthResponse { token }))
}

#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "No active session")
    ),
    security(("jwt" = [])),
    tag = "auth"
)]
pub async fn session(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<SessionResponse>, AppError> {
    let user = Users::find_by_id(&claims.sub)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::AuthRequired("No active session".to_string()))?;

    Ok(Json(SessionResponse {
        user_id: user.id,
        email: user.email,
    }))
}

#[utoipa::path(
    put,
    path = "/auth/password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 204, description = "Password updated"),
        (status = 400, description = "New password too short"),
        (status = 401, description = "Current password incorrect")
    ),
    security(("jwt" = [])),
    tag = "auth"
)]
pub async fn update_password(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<StatusCode, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = Users::find_by_id(&claims.sub)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::AuthRequired("No active session".to_string()))?;

    // Holding a token is not enough to rotate the credential
    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Argon2::default()
        .verify_password(payload.current_password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::AuthRequired("Current password is incorrect".to_string()))?;

    let salt = SaltString::generate(&mut OsRng);
    let new_hash = Argon2::default()
        .hash_password(payload.new_password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .to_string();

    let mut active: users::ActiveModel = user.into();
    active.password_hash = Set(new_hash);
    active.update(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Removes the account and every row keyed to it. Content blobs stay
/// behind, the same accepted orphan as a failed blob removal. Outstanding
/// tokens die at the session gate once the user row is gone.
#[utoipa::path(
    delete,
    path = "/auth/account",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Authentication required")
    ),
    security(("jwt" = [])),
    tag = "auth"
)]
pub async fn delete_account(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<StatusCode, AppError> {
    let user = Users::find_by_id(&claims.sub)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::AuthRequired("No active session".to_string()))?;

    // Engagement on this user's content goes first, then the content rows,
    // so no foreign key is left dangling.
    let photo_ids: Vec<String> = Photos::find()
        .filter(photos::Column::UserId.eq(&claims.sub))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    let video_ids: Vec<String> = Videos::find()
        .filter(videos::Column::UserId.eq(&claims.sub))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|v| v.id)
        .collect();

    if !photo_ids.is_empty() {
        Comments::delete_many()
            .filter(comments::Column::PhotoId.is_in(photo_ids.clone()))
            .exec(&state.db)
            .await?;
        Likes::delete_many()
            .filter(likes::Column::PhotoId.is_in(photo_ids))
            .exec(&state.db)
            .await?;
    }
    if !video_ids.is_empty() {
        Comments::delete_many()
            .filter(comments::Column::VideoId.is_in(video_ids.clone()))
            .exec(&state.db)
            .await?;
        Likes::delete_many()
            .filter(likes::Column::VideoId.is_in(video_ids))
            .exec(&state.db)
            .await?;
    }

    Comments::delete_many()
        .filter(comments::Column::UserId.eq(&claims.sub))
        .exec(&state.db)
        .await?;
    Likes::delete_many()
        .filter(likes::Column::UserId.eq(&claims.sub))
        .exec(&state.db)
        .await?;
    UserRoles::delete_many()
        .filter(user_roles::Column::UserId.eq(&claims.sub))
        .exec(&state.db)
        .await?;
    Photos::delete_many()
        .filter(photos::Column::UserId.eq(&claims.sub))
        .exec(&state.db)
        .await?;
    Videos::delete_many()
        .filter(videos::Column::UserId.eq(&claims.sub))
        .exec(&state.db)
        .await?;
    Profiles::delete_by_id(&claims.sub).exec(&state.db).await?;

    user.delete(&state.db).await?;

    tracing::info!("🗑️ Account {} deleted", claims.sub);

    Ok(StatusCode::NO_CONTENT)
}
