use std::borrow::Cow;
use std::path::Path;

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use bytes::{Bytes, BytesMut};
use chrono::{Datelike, NaiveDate, Utc};
use image::ImageFormat;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

use crate::application::app_error::{AppError, AppResult, FieldError};
use crate::application::dto::profile::{AvatarDTO, CreateProfileDTO, ProfileDTO};
use crate::application::dto::user::CurrentUserDTO;
use crate::domain::entities::profile::Gender;

pub const NAME_MAX_LENGTH: usize = 50;
pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const MAX_AGE_YEARS: i32 = 120;
pub const AVATAR_MAX_BYTES: usize = 1024 * 1024;
pub const TEXT_FIELD_MAX_BYTES: usize = 64 * 1024;
const AVATAR_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Multipart body of `POST /users/{user_id}/profile/`. Documentation only,
/// the handler reads the parts through [`ProfileForm`].
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
#[schema(example = json!({
    "first_name": "Ada",
    "last_name": "Lovelace",
    "gender": "woman",
    "date_of_birth": "1990-12-10",
    "info": "Mathematician and writer"
}))]
pub struct CreateProfileRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "woman")]
    pub gender: String,
    #[schema(value_type = String, format = Date, example = "1990-12-10")]
    pub date_of_birth: String,
    #[schema(example = "Mathematician and writer")]
    pub info: String,
    #[schema(value_type = String, format = Binary)]
    pub avatar: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "user_id": 2,
    "first_name": "ada",
    "last_name": "lovelace",
    "gender": "woman",
    "date_of_birth": "1990-12-10",
    "info": "Mathematician and writer",
    "avatar": "http://127.0.0.1:9000/profiles/avatars/2_ada.jpg?X-Amz-Signature=..."
}))]
pub struct ProfileResponse {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    #[schema(value_type = String, format = Date)]
    pub date_of_birth: NaiveDate,
    pub info: String,
    /// Fetchable avatar URL.
    pub avatar: String,
}

impl From<ProfileDTO> for ProfileResponse {
    fn from(profile: ProfileDTO) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            gender: profile.gender,
            date_of_birth: profile.date_of_birth,
            info: profile.info,
            avatar: profile.avatar_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: Option<String>,
    pub data: Bytes,
    /// Set when the part was cut off at `AVATAR_MAX_BYTES`.
    pub oversized: bool,
}

/// Raw, unvalidated multipart fields.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub info: Option<String>,
    pub avatar: Option<AvatarUpload>,
}

/// Reads at most `limit + 1` bytes of a part. The flag reports whether the
/// part was longer than `limit`.
async fn read_capped(mut field: Field<'_>, limit: usize) -> AppResult<(Bytes, bool)> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::InvalidMultipart(e.body_text()))?
    {
        if buffer.len() + chunk.len() > limit {
            return Ok((buffer.freeze(), true));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok((buffer.freeze(), false))
}

async fn read_text(field: Field<'_>) -> AppResult<String> {
    let name = field.name().unwrap_or_default().to_string();
    let (data, oversized) = read_capped(field, TEXT_FIELD_MAX_BYTES).await?;
    if oversized {
        return Err(AppError::InvalidMultipart(format!("Field `{name}` is too large")));
    }
    String::from_utf8(data.to_vec())
        .map_err(|_| AppError::InvalidMultipart(format!("Field `{name}` is not valid UTF-8")))
}

impl ProfileForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ProfileForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::InvalidMultipart(e.body_text()))?
        {
            match field.name() {
                Some("first_name") => form.first_name = Some(read_text(field).await?),
                Some("last_name") => form.last_name = Some(read_text(field).await?),
                Some("gender") => form.gender = Some(read_text(field).await?),
                Some("date_of_birth") => form.date_of_birth = Some(read_text(field).await?),
                Some("info") => form.info = Some(read_text(field).await?),
                Some("avatar") => {
                    let file_name = field.file_name().map(str::to_string);
                    let (data, oversized) = read_capped(field, AVATAR_MAX_BYTES).await?;
                    form.avatar = Some(AvatarUpload {
                        file_name,
                        data,
                        oversized,
                    });
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Validates every field against `today` and returns the normalized
    /// input, or every field error at once.
    pub fn into_dto(self, current_user: CurrentUserDTO, user_id: i64, today: NaiveDate) -> AppResult<CreateProfileDTO> {
        let mut errors = ValidationErrors::new();
        let first_name = collect(&mut errors, "first_name", self.first_name.as_deref().map(validate_name));
        let last_name = collect(&mut errors, "last_name", self.last_name.as_deref().map(validate_name));
        let gender = collect(&mut errors, "gender", self.gender.as_deref().map(validate_gender));
        let date_of_birth = collect(
            &mut errors,
            "date_of_birth",
            self.date_of_birth.as_deref().map(|raw| validate_birth_date(raw, today)),
        );
        let info = collect(&mut errors, "info", self.info.as_deref().map(validate_info));
        let avatar = collect(&mut errors, "avatar", self.avatar.map(validate_avatar));

        let (Some(first_name), Some(last_name), Some(gender), Some(date_of_birth), Some(info), Some(avatar)) =
            (first_name, last_name, gender, date_of_birth, info, avatar)
        else {
            return Err(errors.into());
        };

        Ok(CreateProfileDTO {
            current_user,
            user_id,
            first_name,
            last_name,
            gender,
            date_of_birth,
            info,
            avatar,
        })
    }

    pub fn into_dto_today(self, current_user: CurrentUserDTO, user_id: i64) -> AppResult<CreateProfileDTO> {
        self.into_dto(current_user, user_id, Utc::now().date_naive())
    }
}

fn collect<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Option<Result<T, ValidationError>>,
) -> Option<T> {
    match result {
        Some(Ok(value)) => Some(value),
        Some(Err(error)) => {
            errors.add(field, error);
            None
        }
        None => {
            errors.add(
                field,
                ValidationError::new(FieldError::MISSING).with_message(Cow::Borrowed("Field required")),
            );
            None
        }
    }
}

fn value_error(message: impl Into<Cow<'static, str>>, input: &str) -> ValidationError {
    let mut error = ValidationError::new(FieldError::VALUE_ERROR).with_message(message.into());
    error.add_param(Cow::Borrowed("value"), &input);
    error
}

pub fn validate_name(value: &str) -> Result<String, ValidationError> {
    let name = value.trim();
    let length = name.chars().count();
    if length == 0 || length > NAME_MAX_LENGTH {
        return Err(value_error(
            format!("Name must be between 1 and {} characters", NAME_MAX_LENGTH),
            value,
        ));
    }

    let starts_and_ends_with_letter = name.chars().next().is_some_and(char::is_alphabetic)
        && name.chars().last().is_some_and(char::is_alphabetic);
    let allowed = name
        .chars()
        .all(|c| c.is_alphabetic() || c == '-' || c == '\'' || c == ' ');
    if !starts_and_ends_with_letter || !allowed {
        return Err(value_error(format!("{} contains non-letter characters", name), value));
    }

    Ok(name.to_lowercase())
}

pub fn validate_gender(value: &str) -> Result<Gender, ValidationError> {
    value.trim().parse::<Gender>().map_err(|_| {
        let allowed: Vec<&str> = Gender::ALL.iter().map(Gender::as_str).collect();
        value_error(format!("Gender must be one of: {}", allowed.join(", ")), value)
    })
}

/// Full years elapsed between `born` and `today`.
fn age_on(born: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age
}

pub fn validate_birth_date(value: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| value_error("Input should be a valid date in YYYY-MM-DD format", value))?;

    if date > today {
        return Err(value_error("Date of birth cannot be in the future.", value));
    }
    if date.year() < MIN_BIRTH_YEAR {
        return Err(value_error(
            format!("Invalid birth date - year must be {} or later.", MIN_BIRTH_YEAR),
            value,
        ));
    }
    if age_on(date, today) > MAX_AGE_YEARS {
        return Err(value_error(
            format!("Invalid birth date - age cannot exceed {} years.", MAX_AGE_YEARS),
            value,
        ));
    }

    Ok(date)
}

pub fn validate_info(value: &str) -> Result<String, ValidationError> {
    let info = value.trim();
    if info.is_empty() {
        return Err(value_error("Info field cannot be empty or contain only spaces.", value));
    }
    Ok(info.to_string())
}

pub fn validate_avatar(upload: AvatarUpload) -> Result<AvatarDTO, ValidationError> {
    let file_name = upload.file_name.unwrap_or_default();
    let format_error = || {
        value_error(
            "Invalid image format. Allowed formats: JPG, JPEG, PNG",
            &file_name,
        )
    };

    let extension = Path::new(&file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    if !extension.is_some_and(|ext| AVATAR_EXTENSIONS.contains(&ext.as_str())) {
        return Err(format_error());
    }

    if upload.oversized || upload.data.len() > AVATAR_MAX_BYTES {
        return Err(value_error("Image size exceeds 1 MB", &file_name));
    }

    let format = image::guess_format(&upload.data).map_err(|_| format_error())?;
    let content_type = match format {
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Png => "image/png",
        _ => return Err(format_error()),
    };
    image::load_from_memory_with_format(&upload.data, format)
        .map_err(|_| value_error("Invalid image file", &file_name))?;

    Ok(AvatarDTO {
        file_name,
        content_type,
        data: upload.data,
    })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::application::app_error::AppError;
    use crate::domain::entities::user::UserGroup;
    use crate::tests::helpers::{jpeg_bytes, png_bytes};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn current_user() -> CurrentUserDTO {
        CurrentUserDTO {
            id: 5,
            group: UserGroup::User,
        }
    }

    #[fixture]
    fn valid_form() -> ProfileForm {
        ProfileForm {
            first_name: Some("  Ada ".to_string()),
            last_name: Some("Lovelace".to_string()),
            gender: Some("woman".to_string()),
            date_of_birth: Some("1990-12-10".to_string()),
            info: Some("  Mathematician  ".to_string()),
            avatar: Some(AvatarUpload {
                file_name: Some("ada.jpg".to_string()),
                data: jpeg_bytes(),
                oversized: false,
            }),
        }
    }

    fn invalid_fields(result: AppResult<CreateProfileDTO>) -> Vec<FieldError> {
        match result {
            Err(AppError::InvalidFields(fields)) => fields,
            other => panic!("expected InvalidFields, got {:?}", other.map(|dto| dto.user_id)),
        }
    }

    #[rstest]
    fn test_valid_form_is_normalized(valid_form: ProfileForm) {
        let dto = valid_form.into_dto(current_user(), 5, today()).unwrap();

        assert_eq!(dto.first_name, "ada");
        assert_eq!(dto.last_name, "lovelace");
        assert_eq!(dto.gender, Gender::Woman);
        assert_eq!(dto.date_of_birth, NaiveDate::from_ymd_opt(1990, 12, 10).unwrap());
        assert_eq!(dto.info, "Mathematician");
        assert_eq!(dto.avatar.file_name, "ada.jpg");
        assert_eq!(dto.avatar.content_type, "image/jpeg");
    }

    #[rstest]
    fn test_png_avatar_keeps_png_content_type(mut valid_form: ProfileForm) {
        valid_form.avatar = Some(AvatarUpload {
            file_name: Some("ada.PNG".to_string()),
            data: png_bytes(),
            oversized: false,
        });
        let dto = valid_form.into_dto(current_user(), 5, today()).unwrap();
        assert_eq!(dto.avatar.content_type, "image/png");
    }

    #[rstest]
    #[case("first_name", "Ada1")]
    #[case("first_name", "   ")]
    #[case("last_name", "O'Brien-Smith2")]
    #[case("last_name", "Abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz")]
    #[case("gender", "unknown")]
    #[case("date_of_birth", "2030-01-01")]
    #[case("date_of_birth", "1899-12-31")]
    #[case("date_of_birth", "10/12/1990")]
    #[case("info", "   ")]
    fn test_invalid_text_field_is_reported_alone(
        mut valid_form: ProfileForm,
        #[case] field: &str,
        #[case] value: &str,
    ) {
        let value = Some(value.to_string());
        match field {
            "first_name" => valid_form.first_name = value,
            "last_name" => valid_form.last_name = value,
            "gender" => valid_form.gender = value,
            "date_of_birth" => valid_form.date_of_birth = value,
            "info" => valid_form.info = value,
            _ => unreachable!(),
        }

        let fields = invalid_fields(valid_form.into_dto(current_user(), 5, today()));

        assert_eq!(fields.len(), 1, "{:?}", fields);
        assert_eq!(fields[0].field(), field);
        assert_eq!(fields[0].error_type, "value_error");
    }

    #[rstest]
    #[case("notes.txt", Bytes::from_static(b"plain text"))]
    #[case("ada.jpg", Bytes::from_static(b"plain text"))]
    #[case("ada.gif", Bytes::from_static(b"GIF89a"))]
    #[case("ada.jpg", Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]))]
    fn test_non_image_avatar_is_rejected(mut valid_form: ProfileForm, #[case] file_name: &str, #[case] data: Bytes) {
        valid_form.avatar = Some(AvatarUpload {
            file_name: Some(file_name.to_string()),
            data,
            oversized: false,
        });

        let fields = invalid_fields(valid_form.into_dto(current_user(), 5, today()));

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field(), "avatar");
        assert_eq!(fields[0].input.as_deref(), Some(file_name));
    }

    #[rstest]
    fn test_oversized_avatar_is_rejected(mut valid_form: ProfileForm) {
        valid_form.avatar = Some(AvatarUpload {
            file_name: Some("big.jpg".to_string()),
            data: Bytes::from(vec![0u8; AVATAR_MAX_BYTES + 1]),
            oversized: false,
        });

        let fields = invalid_fields(valid_form.into_dto(current_user(), 5, today()));

        assert_eq!(fields[0].msg, "Image size exceeds 1 MB");
    }

    #[rstest]
    fn test_all_errors_are_collected_in_form_order(mut valid_form: ProfileForm) {
        valid_form.info = Some(" ".to_string());
        valid_form.gender = Some("unknown".to_string());
        valid_form.first_name = Some("R2D2".to_string());

        let fields = invalid_fields(valid_form.into_dto(current_user(), 5, today()));
        let names: Vec<&str> = fields.iter().map(FieldError::field).collect();

        assert_eq!(names, vec!["first_name", "gender", "info"]);
        assert_eq!(fields[1].input.as_deref(), Some("unknown"));
    }

    #[rstest]
    fn test_missing_fields_are_reported_with_invalid_ones(mut valid_form: ProfileForm) {
        valid_form.avatar = None;
        valid_form.gender = None;
        valid_form.info = Some(String::new());

        let fields = invalid_fields(valid_form.into_dto(current_user(), 5, today()));

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], FieldError::missing("gender"));
        assert_eq!(fields[1].field(), "info");
        assert_eq!(fields[2], FieldError::missing("avatar"));
    }

    #[rstest]
    #[case("Ada", "ada")]
    #[case("  Mary Ann ", "mary ann")]
    #[case("O'Neil", "o'neil")]
    #[case("Jean-Luc", "jean-luc")]
    #[case("Łukasz", "łukasz")]
    fn test_validate_name_accepts(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(validate_name(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("-Ada")]
    #[case("Ada!")]
    #[case("A_da")]
    fn test_validate_name_rejects(#[case] raw: &str) {
        assert!(validate_name(raw).is_err());
    }

    #[test]
    fn test_birth_date_exactly_150_years_ago_is_rejected() {
        let error = validate_birth_date("1876-10-19", today()).unwrap_err();
        assert_eq!(error.code, "value_error");
    }

    #[test]
    fn test_birth_date_age_bounds() {
        assert!(validate_birth_date("1906-10-19", today()).is_ok());
        assert!(validate_birth_date("1905-10-20", today()).is_ok());
        assert!(validate_birth_date("1905-10-19", today()).is_err());
        assert!(validate_birth_date("2026-10-19", today()).is_ok());
        assert!(validate_birth_date("2026-10-20", today()).is_err());
    }

    #[test]
    fn test_birth_year_lower_bound() {
        let today = NaiveDate::from_ymd_opt(2010, 6, 1).unwrap();

        assert!(validate_birth_date("1900-01-01", today).is_ok());
        let error = validate_birth_date("1899-12-31", today).unwrap_err();
        assert_eq!(
            error.message.as_deref(),
            Some("Invalid birth date - year must be 1900 or later.")
        );
    }

    #[rstest]
    fn test_truncated_avatar_is_reported_as_oversized(mut valid_form: ProfileForm) {
        valid_form.avatar = Some(AvatarUpload {
            file_name: Some("big.jpg".to_string()),
            data: jpeg_bytes(),
            oversized: true,
        });

        let fields = invalid_fields(valid_form.into_dto(current_user(), 5, today()));

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field(), "avatar");
        assert_eq!(fields[0].msg, "Image size exceeds 1 MB");
    }
}
