use bytes::Bytes;
use chrono::NaiveDate;

use crate::application::dto::user::CurrentUserDTO;
use crate::domain::entities::profile::{Gender, Profile};

#[derive(Debug, Clone)]
pub struct AvatarDTO {
    pub file_name: String,
    pub content_type: &'static str,
    pub data: Bytes,
}

/// Already validated and normalized profile input.
#[derive(Debug, Clone)]
pub struct CreateProfileDTO {
    pub current_user: CurrentUserDTO,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub info: String,
    pub avatar: AvatarDTO,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDTO {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub info: String,
    pub avatar_url: String,
}

impl ProfileDTO {
    pub fn new(profile: Profile, avatar_url: String) -> Self {
        Self {
            id: profile.id.value,
            user_id: profile.user_id.value,
            first_name: profile.first_name,
            last_name: profile.last_name,
            gender: profile.gender.to_string(),
            date_of_birth: profile.date_of_birth,
            info: profile.info,
            avatar_url,
        }
    }
}
