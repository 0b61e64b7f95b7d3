use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::s3::StorageClient;
use crate::infra::config::S3Config;

pub struct S3StorageClient {
    client: Client,
    bucket: String,
    url_ttl: Duration,
}

impl S3StorageClient {
    pub fn new(config: &S3Config) -> Self {
        let credentials = Credentials::new(&config.access_key, &config.secret_key, None, None, "static");
        let s3_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            url_ttl: Duration::from_secs(config.url_ttl),
        }
    }
}

#[async_trait]
impl StorageClient for S3StorageClient {
    async fn ensure_bucket(&self) -> AppResult<()> {
        let bucket = self.bucket.as_str();
        let exists = self.client.head_bucket().bucket(bucket).send().await;

        if exists.is_ok() {
            return Ok(());
        }

        let result = self.client.create_bucket().bucket(bucket).send().await;

        match result {
            Ok(_) => {
                info!("Bucket '{}' created", bucket);
                Ok(())
            }
            Err(SdkError::ServiceError(err)) => match err.err() {
                CreateBucketError::BucketAlreadyExists(_) | CreateBucketError::BucketAlreadyOwnedByYou(_) => Ok(()),
                other => {
                    warn!("Failed to create bucket '{}': {:?}", bucket, other);
                    Err(AppError::StorageError(other.to_string()))
                }
            },
            Err(e) => Err(AppError::StorageError(e.to_string())),
        }
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                warn!("S3 upload error bucket={} key={}: {:?}", self.bucket, key, e);
                AppError::StorageError(e.to_string())
            })?;

        info!("Uploaded s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn file_url(&self, key: &str) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(self.url_ttl).map_err(|e| AppError::StorageError(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                warn!("S3 presign error bucket={} key={}: {:?}", self.bucket, key, e);
                AppError::StorageError(e.to_string())
            })?;

        Ok(request.uri().to_string())
    }
}
