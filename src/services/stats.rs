use crate::api::error::AppError;
use crate::entities::prelude::*;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct EngagementStats {
    pub total_users: u64,
    pub total_videos: u64,
    pub total_photos: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    /// (likes + comments) per content item, as a percentage with one
    /// decimal. Zero when there is no content yet.
    pub engagement_rate: f64,
}

/// Dashboard headline numbers: five independent counts plus a derived rate.
pub async fn engagement_stats(db: &DatabaseConnection) -> Result<EngagementStats, AppError> {
    let (total_users, total_videos, total_photos, total_likes, total_comments) = tokio::try_join!(
        Profiles::find().count(db),
        Videos::find().count(db),
        Photos::find().count(db),
        Likes::find().count(db),
        Comments::find().count(db),
    )?;

    let total_content = total_videos + total_photos;
    let total_engagements = total_likes + total_comments;
    let engagement_rate = if total_content > 0 {
        let rate = total_engagements as f64 / total_content as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    } else {
        0.0
    };

    Ok(EngagementStats {
        total_users,
        total_videos,
        total_photos,
        total_likes,
        total_comments,
        engagement_rate,
    })
}
