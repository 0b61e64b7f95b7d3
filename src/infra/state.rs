use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::{Pool, Postgres};

use crate::adapter::db::gateway::profile::ProfileGateway;
use crate::adapter::db::gateway::user::UserGateway;
use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interactors::identity::ResolveCurrentUserInteractor;
use crate::application::interactors::profile::CreateProfileInteractor;
use crate::application::interface::s3::StorageClient;
use crate::application::interface::token::TokenDecoder;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub storage: Arc<dyn StorageClient>,
    pub token_decoder: Arc<dyn TokenDecoder>,
}

#[async_trait]
pub trait FromAppState: Sized {
    async fn from_app_state(state: &AppState) -> AppResult<Self>;
}

// ResolveCurrentUserInteractor
#[async_trait]
impl FromAppState for ResolveCurrentUserInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let user_gateway = UserGateway::new(session);

        Ok(ResolveCurrentUserInteractor::new(
            state.token_decoder.clone(),
            Arc::new(user_gateway),
        ))
    }
}

impl<S> FromRequestParts<S> for ResolveCurrentUserInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> AppResult<Self> {
        let app_state = AppState::from_ref(state);
        ResolveCurrentUserInteractor::from_app_state(&app_state).await
    }
}

// CreateProfileInteractor
#[async_trait]
impl FromAppState for CreateProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let user_gateway = UserGateway::new(session.clone());
        let profile_gateway = ProfileGateway::new(session.clone());

        Ok(CreateProfileInteractor::new(
            Arc::new(session),
            Arc::new(user_gateway),
            Arc::new(profile_gateway),
            state.storage.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for CreateProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> AppResult<Self> {
        let app_state = AppState::from_ref(state);
        CreateProfileInteractor::from_app_state(&app_state).await
    }
}
