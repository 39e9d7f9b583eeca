use crate::api::error::AppError;
use crate::api::handlers::ensure_admin;
use crate::entities::slideshow_photos;
use crate::services::content::UploadFile;
use crate::utils::auth::Claims;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};

#[utoipa::path(
    get,
    path = "/slideshow",
    responses(
        (status = 200, description = "Active slideshow photos ordered by display_order", body = [slideshow_photos::Model])
    ),
    tag = "content"
)]
pub async fn list_slideshow(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<slideshow_photos::Model>>, AppError> {
    let photos = state.content.list_slideshow().await?;
    Ok(Json(photos))
}

#[utoipa::path(
    post,
    path = "/slideshow",
    request_body(content = Object, description = "Multipart: file, title, optional display_order", content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Slideshow photo added", body = slideshow_photos::Model),
        (status = 400, description = "Missing file or title"),
        (status = 403, description = "Admin role required")
    ),
    security(("jwt" = [])),
    tag = "content"
)]
pub async fn upload_slideshow_photo(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<slideshow_photos::Model>), AppError> {
    ensure_admin(&state, &claims).await?;

    let mut file: Option<UploadFile> = None;
    let mut title = String::new();
    let mut display_order: Option<i32> = None;

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
            "display_order" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                // Unparseable order falls back to 0, matching the old form
                display_order = Some(text.trim().parse().unwrap_or(0));
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("Please provide a file".to_string()))?;

    let entry = state
        .content
        .upload_slideshow_photo(&title, display_order, file)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    delete,
    path = "/slideshow/{id}",
    params(("id" = String, Path, description = "Slideshow photo id")),
    responses(
        (status = 204, description = "Slideshow photo deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Slideshow photo not found")
    ),
    security(("jwt" = [])),
    tag = "content"
)]
pub async fn delete_slideshow_photo(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    ensure_admin(&state, &claims).await?;

    state.content.delete_slideshow_photo(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
