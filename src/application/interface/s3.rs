use async_trait::async_trait;
use bytes::Bytes;

use crate::application::app_error::AppResult;

/// Object storage holding user uploads, addressed by key.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn ensure_bucket(&self) -> AppResult<()>;
    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;
    /// Resolves a stored key to a URL clients can fetch.
    async fn file_url(&self, key: &str) -> AppResult<String>;
}
