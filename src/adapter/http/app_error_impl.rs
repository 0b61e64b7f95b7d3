use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::application::app_error::{AppError, FieldError};

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldErrorResponse {
    #[serde(rename = "type")]
    #[schema(example = "value_error")]
    pub error_type: String,
    #[schema(example = json!(["gender"]))]
    pub loc: Vec<String>,
    #[schema(example = "Gender must be one of: man, woman, other")]
    pub msg: String,
    #[schema(example = "unknown")]
    pub input: Option<String>,
}

impl From<FieldError> for FieldErrorResponse {
    fn from(error: FieldError) -> Self {
        Self {
            error_type: error.error_type,
            loc: error.loc,
            msg: error.msg,
            input: error.input,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<FieldErrorResponse>>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingAuthHeader
            | AppError::MalformedAuthHeader
            | AppError::TokenExpired
            | AppError::InvalidToken
            | AppError::InactiveUser
            | AppError::TargetNotFound => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::ProfileAlreadyExists | AppError::ProfileConflict | AppError::InvalidMultipart(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AvatarUploadFailed | AppError::StorageError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::InvalidFields(fields) => ErrorResponse {
                error: "Validation error".to_string(),
                detail: Some(fields.into_iter().map(FieldErrorResponse::from).collect()),
            },
            AppError::StorageError(_) | AppError::DatabaseError(_) => {
                error!(error = %self, "request failed");
                ErrorResponse {
                    error: status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string(),
                    detail: None,
                }
            }
            other => ErrorResponse {
                error: other.to_string(),
                detail: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
