use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::user::UserReader;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{Gender, Profile};
use crate::domain::entities::user::{User, UserGroup, UserWithProfile};

#[derive(Clone)]
pub struct UserGateway {
    session: SqlxSession,
}

impl UserGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn map_user(row: &PgRow) -> AppResult<User> {
        let group: String = row.try_get("group_name")?;
        let group: UserGroup = group.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(User {
            id: Id::new(row.try_get("id")?),
            is_active: row.try_get("is_active")?,
            group,
        })
    }

    fn map_profile(row: &PgRow, user_id: Id<User>) -> AppResult<Option<Profile>> {
        let Some(profile_id) = row.try_get::<Option<i64>, _>("profile_id")? else {
            return Ok(None);
        };
        let gender: String = row.try_get("gender")?;
        let gender: Gender = gender.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Some(Profile {
            id: Id::new(profile_id),
            user_id,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            gender,
            date_of_birth: row.try_get("date_of_birth")?,
            info: row.try_get("info")?,
            avatar: row.try_get("avatar")?,
        }))
    }
}

#[async_trait]
impl UserReader for UserGateway {
    async fn find_with_group(&self, user_id: &Id<User>) -> AppResult<Option<User>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                u.id, u.is_active, g.name AS group_name
                            FROM
                                users u
                                JOIN user_groups g ON g.id = u.group_id
                            WHERE u.id = $1
                        "#,
                    )
                    .bind(user_id)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    result.as_ref().map(Self::map_user).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn find_with_profile(&self, user_id: &Id<User>) -> AppResult<Option<UserWithProfile>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                u.id, u.is_active, g.name AS group_name,
                                p.id AS profile_id, p.first_name, p.last_name, p.gender,
                                p.date_of_birth, p.info, p.avatar
                            FROM
                                users u
                                JOIN user_groups g ON g.id = u.group_id
                                LEFT JOIN user_profiles p ON p.user_id = u.id
                            WHERE u.id = $1
                        "#,
                    )
                    .bind(user_id)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    match result {
                        Some(row) => {
                            let user = Self::map_user(&row)?;
                            let profile = Self::map_profile(&row, user.id)?;
                            Ok(Some(UserWithProfile { user, profile }))
                        }
                        None => Ok(None),
                    }
                }
                .boxed()
            })
            .await
    }
}
