use crate::config::AppConfig;
use crate::services::storage::S3ObjectStorage;
use aws_sdk_s3::config::Region;
use std::env;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &AppConfig) -> Arc<S3ObjectStorage> {
    // Setup S3 client
    let endpoint_url = env::var("S3_ENDPOINT").expect("S3_ENDPOINT must be set");
    let access_key = env::var("S3_ACCESS_KEY").expect("S3_ACCESS_KEY must be set");
    let secret_key = env::var("S3_SECRET_KEY").expect("S3_SECRET_KEY must be set");

    info!(
        "☁️  S3 Storage: {} (Buckets: {}, {})",
        endpoint_url, config.photos_bucket, config.videos_bucket
    );

    let aws_config = aws_config::from_env()
        .endpoint_url(&endpoint_url)
        .region(Region::new("us-east-1"))
        .credentials_provider(aws_sdk_s3::config::Credentials::new(
            access_key, secret_key, None, None, "static",
        ))
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .build();

    let s3_client = aws_sdk_s3::Client::from_conf(s3_config);

    // Ensure buckets exist
    for bucket in [&config.photos_bucket, &config.videos_bucket] {
        match s3_client.head_bucket().bucket(bucket).send().await {
            Ok(_) => info!("✅ Bucket '{}' is ready", bucket),
            Err(_) => {
                info!("🪣 Bucket '{}' not found, creating...", bucket);
                if let Err(e) = s3_client.create_bucket().bucket(bucket).send().await {
                    tracing::error!("❌ Failed to create bucket '{}': {}", bucket, e);
                } else {
                    info!("✅ Bucket '{}' created successfully", bucket);
                }
            }
        }
    }

    Arc::new(S3ObjectStorage::new(
        s3_client,
        config.public_base_url.clone(),
    ))
}
