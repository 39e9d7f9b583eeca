use crate::api::error::AppError;
use crate::api::handlers::ensure_admin;
use crate::entities::videos;
use crate::services::content::UploadFile;
use crate::utils::auth::Claims;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};

#[utoipa::path(
    get,
    path = "/videos",
    responses(
        (status = 200, description = "All videos, newest first", body = [videos::Model])
    ),
    tag = "content"
)]
pub async fn list_videos(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<videos::Model>>, AppError> {
    let videos = state.content.list_videos().await?;
    Ok(Json(videos))
}

#[utoipa::path(
    post,
    path = "/videos",
    request_body(content = Object, description = "Multipart: file, title, optional category and thumbnail", content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Video uploaded", body = videos::Model),
        (status = 400, description = "Missing file or title"),
        (status = 403, description = "Admin role required")
    ),
    security(("jwt" = [])),
    tag = "content"
)]
pub async fn upload_video(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<videos::Model>), AppError> {
    ensure_admin(&state, &claims).await?;

    let mut file: Option<UploadFile> = None;
    let mut thumbnail: Option<UploadFile> = None;
    let mut title = String::new();
    let mut category: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?
                    .to_vec();
                file = Some(UploadFile { filename, data });
            }
            "thumbnail" => {
                let filename = field.file_name().unwrap_or("thumb.jpg").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?
                    .to_vec();
                thumbnail = Some(UploadFile { filename, data });
            }
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
            }
            "category" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                if !text.trim().is_empty() {
                    category = Some(text);
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("Please provide a file".to_string()))?;

    let video = state
        .content
        .upload_video(&claims.sub, &title, category, file, thumbnail)
        .await?;

    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    delete,
    path = "/videos/{id}",
    params(("id" = String, Path, description = "Video id")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Video not found")
    ),
    security(("jwt" = [])),
    tag = "content"
)]
pub async fn delete_video(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    ensure_admin(&state, &claims).await?;

    state.content.delete_video(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
