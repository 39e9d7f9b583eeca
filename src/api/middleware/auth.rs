use crate::utils::auth::validate_jwt;
use crate::{entities::prelude::Users, AppState};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use sea_orm::EntityTrait;

/// Session gate: every request through this layer re-resolves the session
/// from the bearer token. Claims land in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    if let Some(token) = token {
        let secret = &state.config.jwt_secret;

        if let Ok(claims) = validate_jwt(token.as_str(), secret) {
            // Check if user still exists in DB
            let user_exists = Users::find_by_id(claims.sub.clone())
                .one(&state.db)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
                .is_some();

            if user_exists {
                req.extensions_mut().insert(claims);
                return Ok(next.run(req).await);
            }
        }
    }

    Err(StatusCode::UNAUTHORIZED)
}
