use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserGroup {
    User,
    Moderator,
    Admin,
}

impl UserGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserGroup::User => "USER",
            UserGroup::Moderator => "MODERATOR",
            UserGroup::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown user group `{0}`")]
pub struct UnknownUserGroup(pub String);

impl FromStr for UserGroup {
    type Err = UnknownUserGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(UserGroup::User),
            "MODERATOR" => Ok(UserGroup::Moderator),
            "ADMIN" => Ok(UserGroup::Admin),
            other => Err(UnknownUserGroup(other.to_string())),
        }
    }
}

/// Account a profile can be attached to. Owned by the accounts subsystem,
/// this service only reads it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Id<User>,
    pub is_active: bool,
    pub group: UserGroup,
}

/// Self-service, or an admin acting on anyone's behalf.
pub fn may_manage_profile(actor: &Id<User>, actor_group: UserGroup, target: &Id<User>) -> bool {
    actor == target || actor_group == UserGroup::Admin
}

/// A user loaded together with its (optional) one-to-one profile.
#[derive(Debug, Clone)]
pub struct UserWithProfile {
    pub user: User,
    pub profile: Option<Profile>,
}
