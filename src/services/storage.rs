use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

/// Thin facade over the object store. Buckets are named per call because the
/// site splits content across a photos bucket and a videos bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<()>;
    async fn remove(&self, bucket: &str, key: &str) -> Result<()>;
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool>;
    /// Stable, externally resolvable address for a stored object.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

pub struct S3ObjectStorage {
    client: Client,
    public_base_url: String,
}

impl S3ObjectStorage {
    pub fn new(client: Client, public_base_url: String) -> Self {
        Self {
            client,
            public_base_url,
        }
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn upload(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await?;
        Ok(())
    }

    async fn remove(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;
        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        let res = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;

        match res {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(anyhow::anyhow!(service_error))
                }
            }
        }
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, bucket, key)
    }
}
