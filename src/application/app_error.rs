use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub loc: Vec<String>,
    pub msg: String,
    pub input: Option<String>,
}

impl FieldError {
    pub const VALUE_ERROR: &'static str = "value_error";
    pub const MISSING: &'static str = "missing";

    pub fn value_error(field: &str, msg: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            error_type: Self::VALUE_ERROR.to_string(),
            loc: vec![field.to_string()],
            msg: msg.into(),
            input: Some(input.into()),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self {
            error_type: Self::MISSING.to_string(),
            loc: vec![field.to_string()],
            msg: "Field required".to_string(),
            input: None,
        }
    }

    pub fn field(&self) -> &str {
        self.loc.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authorization header is missing")]
    MissingAuthHeader,
    #[error("Invalid Authorization header format. Expected 'Bearer <token>'")]
    MalformedAuthHeader,
    #[error("Token has expired.")]
    TokenExpired,
    #[error("Invalid token.")]
    InvalidToken,
    #[error("User not found or not active.")]
    InactiveUser,
    #[error("User not found or not active.")]
    TargetNotFound,
    #[error("You don't have permission to edit this profile.")]
    Forbidden,
    #[error("User already has a profile.")]
    ProfileAlreadyExists,
    #[error("User already has a profile.")]
    ProfileConflict,
    #[error("{} invalid field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),
    #[error("Malformed multipart body: {0}")]
    InvalidMultipart(String),
    #[error("Failed to upload avatar. Please try again later.")]
    AvatarUploadFailed,
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Field order used when reporting errors back to the client.
const FIELD_ORDER: [&str; 6] = ["first_name", "last_name", "gender", "date_of_birth", "info", "avatar"];

fn field_rank(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|known| *known == field)
        .unwrap_or(FIELD_ORDER.len())
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();
                errors.iter().map(move |error| {
                    let msg = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    let input = error.params.get("value").map(|value| match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    });
                    match input {
                        _ if error.code == FieldError::MISSING => FieldError::missing(&field),
                        Some(input) if error.code == FieldError::VALUE_ERROR => {
                            FieldError::value_error(&field, msg, input)
                        }
                        input => FieldError {
                            error_type: error.code.to_string(),
                            loc: vec![field.clone()],
                            msg,
                            input,
                        },
                    }
                })
            })
            .collect();
        fields.sort_by_key(|error| field_rank(error.field()));
        AppError::InvalidFields(fields)
    }
}
