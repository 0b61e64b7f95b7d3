use crate::domain::entities::user::{User, UserGroup};

/// Identity resolved from the bearer token for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUserDTO {
    pub id: i64,
    pub group: UserGroup,
}

impl From<User> for CurrentUserDTO {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value,
            group: user.group,
        }
    }
}
