pub mod auth;
pub mod comments;
pub mod health;
pub mod photos;
pub mod profiles;
pub mod slideshow;
pub mod stats;
pub mod videos;

use crate::api::error::AppError;
use crate::services::roles;
use crate::utils::auth::Claims;
use crate::AppState;

/// Role gate for dashboard mutations. Non-admins (and failed lookups,
/// which report as non-admin) get a 403.
pub async fn ensure_admin(state: &AppState, claims: &Claims) -> Result<(), AppError> {
    if roles::is_admin(&state.db, &claims.sub).await {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin role required".to_string()))
    }
}
