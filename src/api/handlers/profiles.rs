use crate::api::error::AppError;
use crate::services::content::UploadFile;
use crate::services::profile::ProfileUpdate;
use crate::services::upload::{self, stage_object};
use crate::utils::auth::Claims;
use crate::utils::validation::validate_upload_size;
use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AvatarResponse {
    pub url: String,
}

#[utoipa::path(
    get,
    path = "/profiles/me",
    responses(
        (status = 200, description = "Profile, empty default when never saved", body = ProfileResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("jwt" = [])),
    tag = "profiles"
)]
pub async fn get_profile(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profiles.load(&claims.sub).await?;

    let response = match profile {
        Some(p) => ProfileResponse {
            id: p.id,
            display_name: p.display_name,
            bio: p.bio,
            avatar_url: p.avatar_url,
        },
        None => ProfileResponse {
            id: claims.sub.clone(),
            display_name: None,
            bio: None,
            avatar_url: None,
        },
    };

    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/profiles/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile upserted", body = ProfileResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("jwt" = [])),
    tag = "profiles"
)]
pub async fn update_profile(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let saved = state
        .profiles
        .save(
            &claims.sub,
            ProfileUpdate {
                display_name: payload.display_name,
                bio: payload.bio,
                avatar_url: None,
            },
        )
        .await?;

    Ok(Json(ProfileResponse {
        id: saved.id,
        display_name: saved.display_name,
        bio: saved.bio,
        avatar_url: saved.avatar_url,
    }))
}

#[utoipa::path(
    post,
    path = "/profiles/me/avatar",
    request_body(content = Object, description = "Avatar image file", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar uploaded", body = AvatarResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("jwt" = [])),
    tag = "profiles"
)]
pub async fn upload_avatar(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
        .ok_or_else(|| AppError::Validation("No file found in request".to_string()))?;

    let filename = field.file_name().unwrap_or("avatar.png").to_string();
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
        .to_vec();
    let file = UploadFile { filename, data };

    validate_upload_size(file.data.len(), state.config.max_upload_size)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Fixed key per user, so a new avatar overwrites the old blob
    let key = upload::avatar_key(&claims.sub, &file.filename);
    let staged = stage_object(
        state.storage.as_ref(),
        &state.config.photos_bucket,
        key,
        file.data,
    )
    .await?;

    state
        .profiles
        .save(
            &claims.sub,
            ProfileUpdate {
                avatar_url: Some(staged.url.clone()),
                ..ProfileUpdate::default()
            },
        )
        .await?;

    Ok(Json(AvatarResponse { url: staged.url }))
}
