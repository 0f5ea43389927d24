use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::users_repo;
use crate::error::AppError;
use crate::models::{Role, UserRow};
use crate::services::user_service::UserDto;

/// HS256 signing material plus the lifetime stamped into new tokens.
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_ttl_secs: i64,
}

impl AuthKeys {
    pub fn from_secret(secret: &str, token_ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl_secs,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserDto,
}

pub fn mint_token(keys: &AuthKeys, user: &UserRow) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.clone(),
        role: user.role,
        iat: now,
        exp: now + keys.token_ttl_secs,
    };

    encode(&Header::default(), &claims, &keys.encoding)
        .map_err(|e| AppError::Internal(format!("could not sign token: {e}")))
}

pub fn verify_token(keys: &AuthKeys, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(token, &keys.decoding, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized("invalid or expired token".into()))
}

/// Passwordless login: the identifier is the whole credential.
pub async fn login(
    pool: &SqlitePool,
    keys: &AuthKeys,
    identifier: &str,
) -> Result<LoginResponse, AppError> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(AppError::Unauthorized("identifier is required".into()));
    }

    let user = users_repo::load_user_by_identifier(pool, trimmed)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid identifier".into()))?;

    let access_token = mint_token(keys, &user)?;

    Ok(LoginResponse {
        access_token,
        user: user.into(),
    })
}

/// The profile behind a verified token. 401 when the user row is gone, so a
/// stale token for a deleted account stops working everywhere.
pub async fn me(pool: &SqlitePool, user_id: &str) -> Result<UserDto, AppError> {
    let user = users_repo::load_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("unknown user".into()))?;
    Ok(user.into())
}
