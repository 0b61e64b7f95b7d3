use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::profile::ProfileWriter;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{NewProfile, Profile};

#[derive(Clone)]
pub struct ProfileGateway {
    session: SqlxSession,
}

impl ProfileGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }
}

fn map_insert_error(error: sqlx::Error) -> AppError {
    match error {
        sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => AppError::ProfileConflict,
        other => AppError::DatabaseError(other),
    }
}

#[async_trait]
impl ProfileWriter for ProfileGateway {
    async fn insert(&self, profile: NewProfile) -> AppResult<Id<Profile>> {
        self.session
            .with_tx(|tx| {
                async move {
                    let result = sqlx::query(
                        r#"
                            INSERT INTO user_profiles
                                (user_id, first_name, last_name, gender, date_of_birth, info, avatar)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7)
                            RETURNING
                                id
                        "#,
                    )
                    .bind(profile.user_id.value)
                    .bind(&profile.first_name)
                    .bind(&profile.last_name)
                    .bind(profile.gender.as_str())
                    .bind(profile.date_of_birth)
                    .bind(&profile.info)
                    .bind(&profile.avatar)
                    .fetch_one(tx.as_mut())
                    .await
                    .map_err(map_insert_error)?;
                    let id: i64 = result.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }
}
