use async_trait::async_trait;

use crate::{
    application::app_error::AppResult,
    domain::entities::{
        id::Id,
        user::{User, UserWithProfile},
    },
};

#[async_trait]
pub trait UserReader: Send + Sync {
    async fn find_with_group(&self, user_id: &Id<User>) -> AppResult<Option<User>>;
    async fn find_with_profile(&self, user_id: &Id<User>) -> AppResult<Option<UserWithProfile>>;
}
