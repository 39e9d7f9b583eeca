use crate::api::error::AppError;
use crate::entities::{comments, prelude::*, profiles};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;
use uuid::Uuid;

/// What a comment is attached to. Exactly one target, never both.
#[derive(Debug, Clone)]
pub enum CommentTarget {
    Photo(String),
    Video(String),
}

impl CommentTarget {
    /// Resolves the photo_id/video_id pair from a request, enforcing the
    /// exactly-one rule.
    pub fn from_ids(
        photo_id: Option<String>,
        video_id: Option<String>,
    ) -> Result<Self, AppError> {
        match (photo_id, video_id) {
            (Some(p), None) => Ok(CommentTarget::Photo(p)),
            (None, Some(v)) => Ok(CommentTarget::Video(v)),
            _ => Err(AppError::Validation(
                "Provide exactly one of photo_id or video_id".to_string(),
            )),
        }
    }
}

/// Author details merged onto a comment by the profile join. Absent when
/// the author never saved a profile; the client shows "Anonymous".
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CommentAuthor {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CommentWithAuthor {
    pub id: String,
    pub user_id: String,
    pub photo_id: Option<String>,
    pub video_id: Option<String>,
    pub content: String,
    pub created_at: chrono::DateTime<Utc>,
    pub author: Option<CommentAuthor>,
}

pub struct EngagementService {
    db: DatabaseConnection,
}

impl EngagementService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest-first comments for one target, enriched by a best-effort
    /// two-step join: one query for the comments, one IN query for the
    /// distinct author profiles, merged in memory.
    pub async fn list_comments(
        &self,
        target: CommentTarget,
    ) -> Result<Vec<CommentWithAuthor>, AppError> {
        let query = match &target {
            CommentTarget::Photo(id) => {
                Comments::find().filter(comments::Column::PhotoId.eq(id.clone()))
            }
            CommentTarget::Video(id) => {
                Comments::find().filter(comments::Column::VideoId.eq(id.clone()))
            }
        };

        let rows = query
            .order_by_desc(comments::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let user_ids: HashSet<String> = rows.iter().map(|c| c.user_id.clone()).collect();

        let mut authors: HashMap<String, CommentAuthor> = HashMap::new();
        if !user_ids.is_empty() {
            match Profiles::find()
                .filter(profiles::Column::Id.is_in(user_ids))
                .all(&self.db)
                .await
            {
                Ok(profile_rows) => {
                    for p in profile_rows {
                        authors.insert(
                            p.id.clone(),
                            CommentAuthor {
                                display_name: p.display_name,
                                avatar_url: p.avatar_url,
                            },
                        );
                    }
                }
                Err(e) => {
                    // Comments still render, just without attribution
                    tracing::warn!("⚠️ Profile join failed: {}", e);
                }
            }
        }

        Ok(rows
            .into_iter()
            .map(|c| {
                let author = authors.get(&c.user_id).cloned();
                CommentWithAuthor {
                    id: c.id,
                    user_id: c.user_id,
                    photo_id: c.photo_id,
                    video_id: c.video_id,
                    content: c.content,
                    created_at: c.created_at,
                    author,
                }
            })
            .collect())
    }

    pub async fn create_comment(
        &self,
        user_id: &str,
        target: CommentTarget,
        content: &str,
    ) -> Result<comments::Model, AppError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        }

        let (photo_id, video_id) = match target {
            CommentTarget::Photo(id) => (Some(id), None),
            CommentTarget::Video(id) => (None, Some(id)),
        };

        let comment = comments::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            photo_id: Set(photo_id),
            video_id: Set(video_id),
            content: Set(trimmed.to_string()),
            created_at: Set(Utc::now()),
        };

        let inserted = comment.insert(&self.db).await?;

        Ok(inserted)
    }

    /// Author-only delete. This service is the enforcement boundary: a
    /// mismatched user id is rejected here regardless of what the UI offers.
    pub async fn delete_comment(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        let comment = Comments::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        if comment.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can delete a comment".to_string(),
            ));
        }

        comment.delete(&self.db).await?;

        Ok(())
    }
}
