use std::str::FromStr;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::token::{TokenDecoder, TokenPayload};
use crate::infra::config::JwtConfig;

/// Claims carried by access tokens issued by the accounts service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub exp: i64,
}

pub struct JwtTokenDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenDecoder {
    /// Only HMAC algorithms are accepted because the key is a shared secret.
    pub fn new(config: &JwtConfig) -> anyhow::Result<Self> {
        let algorithm = Algorithm::from_str(&config.algorithm)?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            anyhow::bail!("JWT algorithm {} is not an HMAC algorithm", config.algorithm);
        }
        let mut validation = Validation::new(algorithm);
        validation.leeway = config.leeway;

        Ok(Self {
            key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            validation,
        })
    }
}

impl TokenDecoder for JwtTokenDecoder {
    fn decode_access_token(&self, token: &str) -> AppResult<TokenPayload> {
        let data = decode::<AccessClaims>(token, &self.key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => {
                debug!(error = %e, "rejected access token");
                AppError::InvalidToken
            }
        })?;

        Ok(TokenPayload {
            user_id: data.claims.user_id,
        })
    }
}
