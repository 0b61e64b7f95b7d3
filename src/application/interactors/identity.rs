use std::sync::Arc;

use tracing::debug;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::user::CurrentUserDTO;
use crate::application::interface::gateway::user::UserReader;
use crate::application::interface::token::TokenDecoder;
use crate::domain::entities::id::Id;

#[derive(Clone)]
pub struct ResolveCurrentUserInteractor {
    token_decoder: Arc<dyn TokenDecoder>,
    user_reader: Arc<dyn UserReader>,
}

impl ResolveCurrentUserInteractor {
    pub fn new(token_decoder: Arc<dyn TokenDecoder>, user_reader: Arc<dyn UserReader>) -> Self {
        Self {
            token_decoder,
            user_reader,
        }
    }

    pub async fn execute(&self, token: &str) -> AppResult<CurrentUserDTO> {
        let payload = self.token_decoder.decode_access_token(token)?;
        let user_id = payload.user_id.ok_or(AppError::InvalidToken)?;

        let user = self
            .user_reader
            .find_with_group(&Id::new(user_id))
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| {
                debug!(user_id, "token subject is missing or inactive");
                AppError::InactiveUser
            })?;

        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use crate::application::app_error::{AppError, AppResult};
    use crate::application::interactors::identity::ResolveCurrentUserInteractor;
    use crate::application::interface::token::TokenPayload;
    use crate::domain::entities::id::Id;
    use crate::domain::entities::user::{User, UserGroup};
    use crate::tests::mocks::{MockTokenDecoderMock, MockUserReaderMock};

    fn user(id: i64, is_active: bool, group: UserGroup) -> User {
        User {
            id: Id::new(id),
            is_active,
            group,
        }
    }

    fn decoder_returning(result: fn() -> AppResult<TokenPayload>) -> MockTokenDecoderMock {
        let mut decoder = MockTokenDecoderMock::new();
        decoder.expect_decode_access_token().returning(move |_| result());
        decoder
    }

    fn make_interactor(decoder: MockTokenDecoderMock, reader: MockUserReaderMock) -> ResolveCurrentUserInteractor {
        ResolveCurrentUserInteractor::new(Arc::new(decoder), Arc::new(reader))
    }

    #[tokio::test]
    async fn test_resolve_active_user() {
        let decoder = decoder_returning(|| Ok(TokenPayload { user_id: Some(1) }));
        let mut reader = MockUserReaderMock::new();
        reader
            .expect_find_with_group()
            .withf(|id| id.value == 1)
            .times(1)
            .returning(|_| Ok(Some(user(1, true, UserGroup::Admin))));

        let current = make_interactor(decoder, reader).execute("token").await.unwrap();

        assert_eq!(current.id, 1);
        assert_eq!(current.group, UserGroup::Admin);
    }

    #[tokio::test]
    async fn test_expired_token_skips_lookup() {
        let decoder = decoder_returning(|| Err(AppError::TokenExpired));
        let mut reader = MockUserReaderMock::new();
        reader.expect_find_with_group().never();

        let result = make_interactor(decoder, reader).execute("token").await;

        assert!(matches!(result.unwrap_err(), AppError::TokenExpired));
    }

    #[tokio::test]
    async fn test_invalid_token_skips_lookup() {
        let decoder = decoder_returning(|| Err(AppError::InvalidToken));
        let mut reader = MockUserReaderMock::new();
        reader.expect_find_with_group().never();

        let result = make_interactor(decoder, reader).execute("token").await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidToken));
    }

    #[tokio::test]
    async fn test_token_without_subject_is_invalid() {
        let decoder = decoder_returning(|| Ok(TokenPayload { user_id: None }));
        let mut reader = MockUserReaderMock::new();
        reader.expect_find_with_group().never();

        let result = make_interactor(decoder, reader).execute("token").await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidToken));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(false))]
    #[tokio::test]
    async fn test_unknown_or_inactive_user(#[case] active: Option<bool>) {
        let decoder = decoder_returning(|| Ok(TokenPayload { user_id: Some(9) }));
        let mut reader = MockUserReaderMock::new();
        reader
            .expect_find_with_group()
            .returning(move |_| Ok(active.map(|is_active| user(9, is_active, UserGroup::User))));

        let result = make_interactor(decoder, reader).execute("token").await;

        assert!(matches!(result.unwrap_err(), AppError::InactiveUser));
    }
}
