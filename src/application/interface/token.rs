use crate::application::app_error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub user_id: Option<i64>,
}

pub trait TokenDecoder: Send + Sync {
    /// Fails with `AppError::TokenExpired` or `AppError::InvalidToken`.
    fn decode_access_token(&self, token: &str) -> AppResult<TokenPayload>;
}
