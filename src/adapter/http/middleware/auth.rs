use axum::{
    extract::Request,
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{
    adapter::http::middleware::extractor::CurrentUser,
    application::{
        app_error::{AppError, AppResult},
        interactors::identity::ResolveCurrentUserInteractor,
    },
};

const BEARER_PREFIX: &str = "Bearer ";

pub async fn auth_middleware(
    interactor: ResolveCurrentUserInteractor,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let current_user = authenticate(request.headers(), interactor).await?;
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Consumes the interactor so its database session is released before the
/// handler runs.
pub async fn authenticate(headers: &HeaderMap, interactor: ResolveCurrentUserInteractor) -> AppResult<CurrentUser> {
    let token = extract_bearer_token(headers)?;
    let user = interactor.execute(token).await?;
    Ok(user.into())
}

/// Token part of `Authorization: Bearer <token>`. The scheme is matched
/// exactly, with a single space and no surrounding whitespace.
pub fn extract_bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let header = headers.get(AUTHORIZATION).ok_or(AppError::MissingAuthHeader)?;
    let value = header.to_str().map_err(|_| AppError::MalformedAuthHeader)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AppError::MalformedAuthHeader)?;
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AppError::MalformedAuthHeader);
    }
    Ok(token)
}
