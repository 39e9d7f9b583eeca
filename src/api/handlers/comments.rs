use crate::api::error::AppError;
use crate::entities::comments;
use crate::services::engagement::{CommentTarget, CommentWithAuthor};
use crate::utils::auth::Claims;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Deserialize, IntoParams)]
pub struct CommentListQuery {
    pub photo_id: Option<String>,
    pub video_id: Option<String>,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct CreateCommentRequest {
    pub photo_id: Option<String>,
    pub video_id: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,
}

#[utoipa::path(
    get,
    path = "/comments",
    params(CommentListQuery),
    responses(
        (status = 200, description = "Comments for one photo or video, newest first", body = [CommentWithAuthor]),
        (status = 400, description = "Must target exactly one of photo_id/video_id")
    ),
    tag = "engagement"
)]
pub async fn list_comments(
    State(state): State<crate::AppState>,
    Query(query): Query<CommentListQuery>,
) -> Result<Json<Vec<CommentWithAuthor>>, AppError> {
    let target = CommentTarget::from_ids(query.photo_id, query.video_id)?;
    let comments = state.engagement.list_comments(target).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment posted", body = comments::Model),
        (status = 400, description = "Invalid target or empty content"),
        (status = 401, description = "Authentication required")
    ),
    security(("jwt" = [])),
    tag = "engagement"
)]
pub async fn create_comment(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<comments::Model>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let target = CommentTarget::from_ids(payload.photo_id, payload.video_id)?;

    let comment = state
        .engagement
        .create_comment(&claims.sub, target, &payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Only the author can delete a comment"),
        (status = 404, description = "Comment not found")
    ),
    security(("jwt" = [])),
    tag = "engagement"
)]
pub async fn delete_comment(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.engagement.delete_comment(&claims.sub, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
