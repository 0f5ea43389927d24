use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::users_repo;
use crate::error::AppError;
use crate::models::{Role, UserRow};
use crate::services::ensure_uuid;

const NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub identifier: String,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            identifier: row.identifier,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub identifier: String,
    pub email: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<UserDto>, AppError> {
    let rows = users_repo::list_users(pool).await?;
    Ok(rows.into_iter().map(UserDto::from).collect())
}

pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<UserDto, AppError> {
    ensure_uuid(id)?;
    let row = users_repo::load_user(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;
    Ok(row.into())
}

pub async fn create_user(pool: &SqlitePool, input: CreateUser) -> Result<UserDto, AppError> {
    let name = validate_name(&input.name)?;
    let identifier = validate_identifier(&input.identifier)?;
    let email = normalize_email(input.email.as_deref())?;

    if users_repo::identifier_taken(pool, &identifier, None).await? {
        return Err(AppError::Conflict(format!(
            "identifier '{identifier}' is already in use"
        )));
    }
    if let Some(email) = email.as_deref() {
        if users_repo::email_taken(pool, email, None).await? {
            return Err(AppError::Conflict(format!(
                "email '{email}' is already in use"
            )));
        }
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let role = input.role.unwrap_or(Role::Member);

    users_repo::insert_user(
        pool,
        users_repo::NewUser {
            id: &id,
            name: &name,
            identifier: &identifier,
            email: email.as_deref(),
            role: role.as_str(),
            created_at: now,
        },
    )
    .await?;

    let row = users_repo::load_user(pool, &id)
        .await?
        .ok_or_else(|| AppError::Internal("user missing after insert".into()))?;
    Ok(row.into())
}

pub async fn update_user(
    pool: &SqlitePool,
    id: &str,
    input: UpdateUser,
) -> Result<UserDto, AppError> {
    ensure_uuid(id)?;
    let existing = users_repo::load_user(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;

    // Partial merge: absent fields keep their current value.
    let name = match input.name.as_deref() {
        Some(raw) => validate_name(raw)?,
        None => existing.name,
    };
    let identifier = match input.identifier.as_deref() {
        Some(raw) => validate_identifier(raw)?,
        None => existing.identifier,
    };
    let email = match input.email.as_deref() {
        Some(raw) => normalize_email(Some(raw))?,
        None => existing.email,
    };
    let role = input.role.unwrap_or(existing.role);

    if users_repo::identifier_taken(pool, &identifier, Some(id)).await? {
        return Err(AppError::Conflict(format!(
            "identifier '{identifier}' is already in use"
        )));
    }
    if let Some(email) = email.as_deref() {
        if users_repo::email_taken(pool, email, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "email '{email}' is already in use"
            )));
        }
    }

    users_repo::update_user(
        pool,
        id,
        &name,
        &identifier,
        email.as_deref(),
        role.as_str(),
        Utc::now(),
    )
    .await?;

    let row = users_repo::load_user(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;
    Ok(row.into())
}

pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    ensure_uuid(id)?;
    let affected = users_repo::delete_user(pool, id).await?;
    if affected == 0 {
        return Err(AppError::NotFound(format!("User with id {id} not found")));
    }
    Ok(())
}

fn validate_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(AppError::Validation(format!(
            "name must be at most {NAME_MAX_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

fn validate_identifier(raw: &str) -> Result<String, AppError> {
    let identifier = raw.trim();
    if identifier.is_empty() {
        return Err(AppError::Validation("identifier is required".into()));
    }
    Ok(identifier.to_string())
}

fn normalize_email(raw: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(email) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if !email.contains('@') || email.contains(char::is_whitespace) {
        return Err(AppError::Validation(format!("invalid email: {email}")));
    }
    Ok(Some(email.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_and_bounded() {
        assert_eq!(validate_name("  Alice  ").unwrap(), "Alice");
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
        assert!(validate_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn email_must_look_like_an_address() {
        assert_eq!(
            normalize_email(Some("alice@example.com")).unwrap(),
            Some("alice@example.com".to_string())
        );
        assert_eq!(normalize_email(Some("   ")).unwrap(), None);
        assert_eq!(normalize_email(None).unwrap(), None);
        assert!(normalize_email(Some("not-an-email")).is_err());
        assert!(normalize_email(Some("spaced @example.com")).is_err());
    }
}
