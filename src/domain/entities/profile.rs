use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::entities::{id::Id, user::User};

pub const AVATAR_KEY_PREFIX: &str = "avatars";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Man,
    Woman,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Man, Gender::Woman, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Man => "man",
            Gender::Woman => "woman",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender `{0}`")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| UnknownGender(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Id<Profile>,
    pub user_id: Id<User>,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub info: String,
    /// Storage key of the avatar object, not a URL.
    pub avatar: String,
}

/// Profile row before the database assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub user_id: Id<User>,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub info: String,
    pub avatar: String,
}

impl NewProfile {
    pub fn into_profile(self, id: Id<Profile>) -> Profile {
        Profile {
            id,
            user_id: self.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            info: self.info,
            avatar: self.avatar,
        }
    }
}

/// Re-uploading the same file name for the same user overwrites the
/// previous object.
pub fn avatar_key(user_id: &Id<User>, file_name: &str) -> String {
    format!("{}/{}_{}", AVATAR_KEY_PREFIX, user_id, file_name)
}
