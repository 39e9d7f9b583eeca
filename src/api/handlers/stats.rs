use crate::api::error::AppError;
use crate::api::handlers::ensure_admin;
use crate::services::stats::{self, EngagementStats};
use crate::utils::auth::Claims;
use axum::{extract::State, Extension, Json};

#[utoipa::path(
    get,
    path = "/admin/stats",
    responses(
        (status = 200, description = "Dashboard engagement stats", body = EngagementStats),
        (status = 403, description = "Admin role required")
    ),
    security(("jwt" = [])),
    tag = "admin"
)]
pub async fn engagement_stats(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<EngagementStats>, AppError> {
    ensure_admin(&state, &claims).await?;

    let stats = stats::engagement_stats(&state.db).await?;

    Ok(Json(stats))
}
