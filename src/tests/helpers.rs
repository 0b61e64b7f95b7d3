use std::io::Cursor;

use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::adapter::token::jwt::AccessClaims;
use crate::infra::config::JwtConfig;

pub const TEST_JWT_SECRET: &str = "test-secret-key";
pub const BOUNDARY: &str = "TestBoundary1234";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret_key: TEST_JWT_SECRET.to_string(),
        algorithm: "HS256".to_string(),
        leeway: 0,
    }
}

pub fn issue_token_with_secret(user_id: Option<i64>, expires_at: DateTime<Utc>, secret: &str) -> String {
    let claims = AccessClaims {
        user_id,
        exp: expires_at.timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).expect("encode token")
}

pub fn issue_token(user_id: Option<i64>, expires_at: DateTime<Utc>) -> String {
    issue_token_with_secret(user_id, expires_at, TEST_JWT_SECRET)
}

fn encode_image(format: ImageFormat) -> Bytes {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::new_rgb8(4, 4)
        .write_to(&mut buffer, format)
        .expect("encode test image");
    Bytes::from(buffer.into_inner())
}

pub fn jpeg_bytes() -> Bytes {
    encode_image(ImageFormat::Jpeg)
}

pub fn png_bytes() -> Bytes {
    encode_image(ImageFormat::Png)
}

/// File part of a multipart body.
pub struct FilePart<'a> {
    pub name: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: Bytes,
}

pub fn build_multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Bytes {
    let mut body = BytesMut::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
        body.extend_from_slice(format!("{}\r\n", value).as_bytes());
    }
    if let Some(file) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.name, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(&file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body.freeze()
}

pub fn avatar_part(file_name: &str, data: Bytes) -> FilePart<'_> {
    FilePart {
        name: "avatar",
        file_name,
        content_type: "image/jpeg",
        data,
    }
}
