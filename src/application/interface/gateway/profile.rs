use async_trait::async_trait;

use crate::{
    application::app_error::AppResult,
    domain::entities::{
        id::Id,
        profile::{NewProfile, Profile},
    },
};

#[async_trait]
pub trait ProfileWriter: Send + Sync {
    /// Fails with `AppError::ProfileConflict` when the user already owns a profile row.
    async fn insert(&self, profile: NewProfile) -> AppResult<Id<Profile>>;
}
