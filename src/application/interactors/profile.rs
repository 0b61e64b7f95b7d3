use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{CreateProfileDTO, ProfileDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::ProfileWriter;
use crate::application::interface::gateway::user::UserReader;
use crate::application::interface::s3::StorageClient;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{NewProfile, Profile, avatar_key};
use crate::domain::entities::user::{User, may_manage_profile};

#[derive(Clone)]
pub struct CreateProfileInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    profile_writer: Arc<dyn ProfileWriter>,
    storage: Arc<dyn StorageClient>,
}

impl CreateProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        profile_writer: Arc<dyn ProfileWriter>,
        storage: Arc<dyn StorageClient>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            profile_writer,
            storage,
        }
    }

    /// The avatar is uploaded before the row is inserted and nothing undoes
    /// the upload if the insert fails afterwards.
    pub async fn execute(&self, dto: CreateProfileDTO) -> AppResult<ProfileDTO> {
        let target_id: Id<User> = Id::new(dto.user_id);

        let target = self
            .user_reader
            .find_with_profile(&target_id)
            .await?
            .filter(|target| target.user.is_active)
            .ok_or(AppError::TargetNotFound)?;

        let caller_id: Id<User> = Id::new(dto.current_user.id);
        if !may_manage_profile(&caller_id, dto.current_user.group, &target.user.id) {
            warn!(caller_id = caller_id.value, target_id = target_id.value, "profile creation forbidden");
            return Err(AppError::Forbidden);
        }

        if target.profile.is_some() {
            return Err(AppError::ProfileAlreadyExists);
        }

        let key = avatar_key(&target.user.id, &dto.avatar.file_name);
        self.storage
            .upload(&key, dto.avatar.data, dto.avatar.content_type)
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "avatar upload failed");
                AppError::AvatarUploadFailed
            })?;

        let new_profile = NewProfile {
            user_id: target.user.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            gender: dto.gender,
            date_of_birth: dto.date_of_birth,
            info: dto.info,
            avatar: key,
        };

        let profile_id = match self.persist(new_profile.clone()).await {
            Ok(profile_id) => profile_id,
            Err(e) => {
                warn!(key = %new_profile.avatar, error = %e, "profile insert failed, avatar object left orphaned");
                if let Err(rollback_error) = self.db_session.rollback().await {
                    warn!(error = %rollback_error, "rollback failed");
                }
                return Err(e);
            }
        };
        let profile = new_profile.into_profile(profile_id);
        info!(profile_id = profile.id.value, user_id = profile.user_id.value, "profile created");

        let avatar_url = self.storage.file_url(&profile.avatar).await.map_err(|e| {
            warn!(
                profile_id = profile.id.value,
                key = %profile.avatar,
                error = %e,
                "profile stored but avatar URL could not be resolved"
            );
            e
        })?;
        Ok(ProfileDTO::new(profile, avatar_url))
    }

    async fn persist(&self, new_profile: NewProfile) -> AppResult<Id<Profile>> {
        let profile_id = self.profile_writer.insert(new_profile).await?;
        self.db_session.commit().await?;
        Ok(profile_id)
    }
}
