use crate::api::error::AppError;
use crate::entities::{prelude::*, profiles};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};

/// Fields a user may change about themselves. `None` leaves the stored
/// value untouched on update and empty on first insert.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

pub struct ProfileService {
    db: DatabaseConnection,
}

impl ProfileService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The stored profile, or None when the user never saved one. The
    /// handler maps None to an empty default rather than a 404.
    pub async fn load(&self, user_id: &str) -> Result<Option<profiles::Model>, AppError> {
        let profile = Profiles::find_by_id(user_id).one(&self.db).await?;
        Ok(profile)
    }

    /// Insert-or-update keyed by the user id. A missing row is created, an
    /// existing one is overwritten and updated_at refreshed. Saving twice
    /// never produces a second row.
    pub async fn save(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<profiles::Model, AppError> {
        let existing = Profiles::find_by_id(user_id).one(&self.db).await?;

        let saved = match existing {
            Some(profile) => {
                let mut active: profiles::ActiveModel = profile.into();
                if let Some(display_name) = update.display_name {
                    active.display_name = Set(Some(display_name));
                }
                if let Some(bio) = update.bio {
                    active.bio = Set(Some(bio));
                }
                if let Some(avatar_url) = update.avatar_url {
                    active.avatar_url = Set(Some(avatar_url));
                }
                active.updated_at = Set(Utc::now());
                active.update(&self.db).await?
            }
            None => {
                let active = profiles::ActiveModel {
                    id: Set(user_id.to_string()),
                    display_name: Set(update.display_name),
                    bio: Set(update.bio),
                    avatar_url: Set(update.avatar_url),
                    updated_at: Set(Utc::now()),
                };
                active.insert(&self.db).await?
            }
        };

        Ok(saved)
    }
}
