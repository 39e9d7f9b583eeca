use crate::api::error::AppError;
use crate::config::AppConfig;
use crate::entities::{photos, prelude::*, slideshow_photos, videos};
use crate::services::storage::ObjectStorage;
use crate::services::upload::{self, stage_object};
use crate::utils::validation::{validate_title, validate_upload_size};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

/// An incoming multipart file, already buffered.
pub struct UploadFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Repositories for photos, videos and slideshow photos. Create runs the
/// upload pipeline (blob, public URL, metadata row); delete is the two-step
/// blob-then-row removal where a failed blob delete only logs.
pub struct ContentService {
    db: DatabaseConnection,
    storage: Arc<dyn ObjectStorage>,
    config: AppConfig,
}

impl ContentService {
    pub fn new(
        db: DatabaseConnection,
        storage: Arc<dyn ObjectStorage>,
        config: AppConfig,
    ) -> Self {
        Self {
            db,
            storage,
            config,
        }
    }

    pub async fn list_photos(&self) -> Result<Vec<photos::Model>, AppError> {
        let rows = Photos::find()
            .order_by_desc(photos::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn upload_photo(
        &self,
        user_id: &str,
        title: &str,
        category: Option<String>,
        file: UploadFile,
    ) -> Result<photos::Model, AppError> {
        // Reject before touching storage so a bad form never orphans a blob
        validate_title(title).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_upload_size(file.data.len(), self.config.max_upload_size)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let key = upload::content_key(user_id, &file.filename);
        let staged = stage_object(
            self.storage.as_ref(),
            &self.config.photos_bucket,
            key,
            file.data,
        )
        .await?;

        let photo = photos::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            title: Set(title.trim().to_string()),
            category: Set(category.unwrap_or_else(|| "General".to_string())),
            file_path: Set(staged.key),
            storage_url: Set(staged.url),
            created_at: Set(Utc::now()),
        };

        let inserted = photo.insert(&self.db).await?;
        tracing::info!("📸 Photo '{}' uploaded by {}", inserted.title, user_id);

        Ok(inserted)
    }

    pub async fn delete_photo(&self, id: &str) -> Result<(), AppError> {
        let photo = Photos::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

        // Blob removal is best-effort; a failure leaves an orphaned blob
        // and the row delete still proceeds.
        if let Err(e) = self
            .storage
            .remove(&self.config.photos_bucket, &photo.file_path)
            .await
        {
            tracing::warn!(
                "⚠️ Failed to remove blob {}/{}: {}",
                self.config.photos_bucket,
                photo.file_path,
                e
            );
        }

        photo.delete(&self.db).await?;

        Ok(())
    }

    pub async fn list_videos(&self) -> Result<Vec<videos::Model>, AppError> {
        let rows = Videos::find()
            .order_by_desc(videos::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn upload_video(
        &self,
        user_id: &str,
        title: &str,
        category: Option<String>,
        file: UploadFile,
        thumbnail: Option<UploadFile>,
    ) -> Result<videos::Model, AppError> {
        validate_title(title).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_upload_size(file.data.len(), self.config.max_upload_size)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let key = upload::content_key(user_id, &file.filename);
        let staged = stage_object(
            self.storage.as_ref(),
            &self.config.videos_bucket,
            key,
            file.data,
        )
        .await?;

        // Thumbnail failure downgrades to a logged partial failure; the
        // video itself is still recorded.
        let mut thumbnail_url = None;
        if let Some(thumb) = thumbnail {
            let thumb_key = upload::thumbnail_key(user_id, &thumb.filename);
            match stage_object(
                self.storage.as_ref(),
                &self.config.videos_bucket,
                thumb_key,
                thumb.data,
            )
            .await
            {
                Ok(staged_thumb) => thumbnail_url = Some(staged_thumb.url),
                Err(e) => {
                    tracing::warn!("⚠️ Thumbnail upload failed for {}: {}", user_id, e);
                }
            }
        }

        let video = videos::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            title: Set(title.trim().to_string()),
            category: Set(category.unwrap_or_else(|| "General".to_string())),
            file_path: Set(staged.key),
            storage_url: Set(staged.url),
            thumbnail_url: Set(thumbnail_url),
            created_at: Set(Utc::now()),
        };

        let inserted = video.insert(&self.db).await?;
        tracing::info!("🎬 Video '{}' uploaded by {}", inserted.title, user_id);

        Ok(inserted)
    }

    pub async fn delete_video(&self, id: &str) -> Result<(), AppError> {
        let video = Videos::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        if let Err(e) = self
            .storage
            .remove(&self.config.videos_bucket, &video.file_path)
            .await
        {
            tracing::warn!(
                "⚠️ Failed to remove blob {}/{}: {}",
                self.config.videos_bucket,
                video.file_path,
                e
            );
        }

        video.delete(&self.db).await?;

        Ok(())
    }

    /// Active slideshow entries, display_order ascending. Ties fall back to
    /// insertion order via created_at so the sequence is stable.
    pub async fn list_slideshow(&self) -> Result<Vec<slideshow_photos::Model>, AppError> {
        let rows = SlideshowPhotos::find()
            .filter(slideshow_photos::Column::IsActive.eq(true))
            .order_by_asc(slideshow_photos::Column::DisplayOrder)
            .order_by_asc(slideshow_photos::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn upload_slideshow_photo(
        &self,
        title: &str,
        display_order: Option<i32>,
        file: UploadFile,
    ) -> Result<slideshow_photos::Model, AppError> {
        validate_title(title).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_upload_size(file.data.len(), self.config.max_upload_size)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let key = upload::slideshow_key(&file.filename);
        let staged = stage_object(
            self.storage.as_ref(),
            &self.config.photos_bucket,
            key,
            file.data,
        )
        .await?;

        let entry = slideshow_photos::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(title.trim().to_string()),
            file_path: Set(staged.key),
            storage_url: Set(staged.url),
            display_order: Set(display_order.unwrap_or(0)),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };

        let inserted = entry.insert(&self.db).await?;
        tracing::info!("🖼️ Slideshow photo '{}' added", inserted.title);

        Ok(inserted)
    }

    pub async fn delete_slideshow_photo(&self, id: &str) -> Result<(), AppError> {
        let entry = SlideshowPhotos::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Slideshow photo not found".to_string()))?;

        if let Err(e) = self
            .storage
            .remove(&self.config.photos_bucket, &entry.file_path)
            .await
        {
            tracing::warn!(
                "⚠️ Failed to remove blob {}/{}: {}",
                self.config.photos_bucket,
                entry.file_path,
                e
            );
        }

        entry.delete(&self.db).await?;

        Ok(())
    }
}
