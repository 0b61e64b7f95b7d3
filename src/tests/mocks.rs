use async_trait::async_trait;
use bytes::Bytes;
use mockall::mock;

use crate::application::app_error::AppResult;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::ProfileWriter;
use crate::application::interface::gateway::user::UserReader;
use crate::application::interface::s3::StorageClient;
use crate::application::interface::token::{TokenDecoder, TokenPayload};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{NewProfile, Profile};
use crate::domain::entities::user::{User, UserWithProfile};

mock! {
    pub DBSessionMock {}

    #[async_trait]
    impl DBSession for DBSessionMock {
        async fn commit(&self) -> AppResult<()>;
        async fn rollback(&self) -> AppResult<()>;
    }
}

mock! {
    pub TokenDecoderMock {}

    impl TokenDecoder for TokenDecoderMock {
        fn decode_access_token(&self, token: &str) -> AppResult<TokenPayload>;
    }
}

mock! {
    pub UserReaderMock {}

    #[async_trait]
    impl UserReader for UserReaderMock {
        async fn find_with_group(&self, user_id: &Id<User>) -> AppResult<Option<User>>;
        async fn find_with_profile(&self, user_id: &Id<User>) -> AppResult<Option<UserWithProfile>>;
    }
}

mock! {
    pub ProfileWriterMock {}

    #[async_trait]
    impl ProfileWriter for ProfileWriterMock {
        async fn insert(&self, profile: NewProfile) -> AppResult<Id<Profile>>;
    }
}

mock! {
    pub StorageClientMock {}

    #[async_trait]
    impl StorageClient for StorageClientMock {
        async fn ensure_bucket(&self) -> AppResult<()>;
        async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;
        async fn file_url(&self, key: &str) -> AppResult<String>;
    }
}
