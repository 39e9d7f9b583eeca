use crate::api::error::AppError;
use crate::api::handlers::ensure_admin;
use crate::entities::photos;
use crate::services::content::UploadFile;
use crate::utils::auth::Claims;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};

#[utoipa::path(
    get,
    path = "/photos",
    responses(
        (status = 200, description = "All photos, newest first", body = [photos::Model])
    ),
    tag = "content"
)]
pub async fn list_photos(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<photos::Model>>, AppError> {
    let photos = state.content.list_photos().await?;
    Ok(Json(photos))
}

#[utoipa::path(
    post,
    path = "/photos",
    request_body(content = Object, description = "Multipart: file, title, optional category", content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Photo uploaded", body = photos::Model),
        (status = 400, description = "Missing file or title"),
        (status = 403, description = "Admin role required")
    ),
    security(("jwt" = [])),
    tag = "content"
)]
pub async fn upload_photo(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<photos::Model>), AppError> {
    ensure_admin(&state, &claims).await?;

    let mut file: Option<UploadFile> = None;
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

    let photo = state
        .content
        .upload_photo(&claims.sub, &title, category, file)
        .await?;

    Ok((StatusCode::CREATED, Json(photo)))
}

#[utoipa::path(
    delete,
    path = "/photos/{id}",
    params(("id" = String, Path, description = "Photo id")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Photo not found")
    ),
    security(("jwt" = [])),
    tag = "content"
)]
pub async fn delete_photo(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    ensure_admin(&state, &claims).await?;

    state.content.delete_photo(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
