use std::sync::Arc;

use tracing::info;

use crate::adapter::storage::s3::S3StorageClient;
use crate::adapter::token::jwt::JwtTokenDecoder;
use crate::application::interface::s3::StorageClient;
use crate::infra::config::AppConfig;
use crate::infra::db::init_db;
use crate::infra::state::AppState;

pub mod app;
pub mod config;
pub mod db;
pub mod setup;
pub mod state;

async fn init_storage(config: &AppConfig) -> anyhow::Result<S3StorageClient> {
    let storage = S3StorageClient::new(&config.s3);
    storage.ensure_bucket().await?;
    info!(bucket = %config.s3.bucket, "Avatar storage ready");
    Ok(storage)
}

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db(config).await?;
    let storage = init_storage(config).await?;
    let token_decoder = JwtTokenDecoder::new(&config.jwt)?;

    Ok(AppState {
        pool,
        storage: Arc::new(storage),
        token_decoder: Arc::new(token_decoder),
    })
}
