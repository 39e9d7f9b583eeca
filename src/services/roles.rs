use crate::entities::{prelude::*, user_roles};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

pub const ADMIN_ROLE: &str = "admin";

/// The binary role gate. No row or a failed query both answer false, so a
/// broken database never grants elevated access.
pub async fn is_admin(db: &DatabaseConnection, user_id: &str) -> bool {
    let result = UserRoles::find()
        .filter(user_roles::Column::UserId.eq(user_id))
        .filter(user_roles::Column::Role.eq(ADMIN_ROLE))
        .one(db)
        .await;

    match result {
        Ok(row) => row.is_some(),
        Err(e) => {
            tracing::warn!("⚠️ Role lookup failed for {}: {}", user_id, e);
            false
        }
    }
}
