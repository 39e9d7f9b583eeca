use crate::api::error::AppError;
use crate::services::storage::ObjectStorage;
use crate::utils::validation::file_extension;
use chrono::Utc;

/// Result of staging a blob: the storage key and its public URL.
#[derive(Debug, Clone)]
pub struct StagedObject {
    pub key: String,
    pub url: String,
}

/// Storage key for user content: `{user_id}/{unix_millis}.{ext}`.
///
/// Uniqueness relies on millisecond granularity; two uploads by the same
/// user inside the same millisecond would collide. The original site had
/// the same behavior, so it is kept rather than silently changed.
pub fn content_key(user_id: &str, filename: &str) -> String {
    format!(
        "{}/{}.{}",
        user_id,
        Utc::now().timestamp_millis(),
        file_extension(filename)
    )
}

/// Thumbnail key sits next to the video under the same user prefix.
pub fn thumbnail_key(user_id: &str, filename: &str) -> String {
    format!(
        "{}/thumb-{}.{}",
        user_id,
        Utc::now().timestamp_millis(),
        file_extension(filename)
    )
}

/// Slideshow blobs keep the original filename for easier manual curation.
pub fn slideshow_key(filename: &str) -> String {
    format!("slideshow-{}-{}", Utc::now().timestamp_millis(), filename)
}

/// Avatar key is fixed per user; re-uploading overwrites the old avatar.
pub fn avatar_key(user_id: &str, filename: &str) -> String {
    format!("{}/avatar.{}", user_id, file_extension(filename))
}

/// Steps 2 and 3 of the upload pipeline: put the blob, resolve its public
/// URL. The caller inserts the metadata row afterwards. A failure here
/// aborts the pipeline; an already-written blob is not rolled back.
pub async fn stage_object(
    storage: &dyn ObjectStorage,
    bucket: &str,
    key: String,
    data: Vec<u8>,
) -> Result<StagedObject, AppError> {
    storage
        .upload(bucket, &key, data)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to upload to {}/{}: {}", bucket, key, e)))?;

    let url = storage.public_url(bucket, &key);

    Ok(StagedObject { key, url })
}
