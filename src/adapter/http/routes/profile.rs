use axum::Json;
use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::debug;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::CurrentUser;
use crate::adapter::http::schema::profile::{CreateProfileRequest, ProfileForm, ProfileResponse};
use crate::application::app_error::AppResult;
use crate::application::interactors::profile::CreateProfileInteractor;

#[utoipa::path(
    post,
    path = "/users/{user_id}/profile/",
    tag = "Profiles",
    params(
        ("user_id" = i64, Path, description = "Id of the user the profile is created for")
    ),
    request_body(
        content = CreateProfileRequest,
        content_type = "multipart/form-data"
    ),
    responses(
        (
            status = 201,
            description = "Profile created",
            body = ProfileResponse
        ),
        (
            status = 400,
            description = "User already has a profile or the multipart body is unreadable",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "User already has a profile."
                }
            )
        ),
        (
            status = 401,
            description = "Missing or invalid token, or the target user is missing or inactive",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Token has expired."
                }
            )
        ),
        (
            status = 403,
            description = "Caller is neither the target user nor an admin",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "You don't have permission to edit this profile."
                }
            )
        ),
        (
            status = 422,
            description = "One or more form fields are invalid",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Validation error",
                    "detail": [
                        {
                            "type": "value_error",
                            "loc": ["gender"],
                            "msg": "Gender must be one of: man, woman, other",
                            "input": "unknown"
                        }
                    ]
                }
            )
        ),
        (
            status = 500,
            description = "Avatar upload or persistence failed",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Failed to upload avatar. Please try again later."
                }
            )
        )
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_profile(
    Path(user_id): Path<i64>,
    current_user: CurrentUser,
    interactor: CreateProfileInteractor,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    debug!(caller_id = current_user.id, user_id, "create profile request");
    let form = ProfileForm::from_multipart(multipart).await?;
    let dto = form.into_dto_today(current_user.into(), user_id)?;
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}
