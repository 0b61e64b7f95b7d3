use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::user::CurrentUserDTO;
use crate::domain::entities::user::UserGroup;

/// Caller identity placed into request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub group: UserGroup,
}

impl From<CurrentUserDTO> for CurrentUser {
    fn from(dto: CurrentUserDTO) -> Self {
        Self {
            id: dto.id,
            group: dto.group,
        }
    }
}

impl From<CurrentUser> for CurrentUserDTO {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id,
            group: user.group,
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        match parts.extensions.get::<CurrentUser>().cloned() {
            Some(user) => Ok(user),
            None => Err(AppError::InvalidToken),
        }
    }
}
