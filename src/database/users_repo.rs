use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::UserRow;

const SQL_LIST_USERS: &str = r#"
SELECT
  id,
  name,
  identifier,
  email,
  role,
  created_at,
  updated_at
FROM users
ORDER BY created_at ASC
"#;

pub async fn list_users(pool: &SqlitePool) -> sqlx::Result<Vec<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_LIST_USERS)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_USER: &str = r#"
SELECT
  id,
  name,
  identifier,
  email,
  role,
  created_at,
  updated_at
FROM users
WHERE id = ?1
LIMIT 1
"#;

pub async fn load_user(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_LOAD_USER)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_LOAD_USER_BY_IDENTIFIER: &str = r#"
SELECT
  id,
  name,
  identifier,
  email,
  role,
  created_at,
  updated_at
FROM users
WHERE identifier = ?1
LIMIT 1
"#;

pub async fn load_user_by_identifier(
    pool: &SqlitePool,
    identifier: &str,
) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_LOAD_USER_BY_IDENTIFIER)
        .bind(identifier)
        .fetch_optional(pool)
        .await
}

const SQL_COUNT_IDENTIFIER: &str = r#"
SELECT COUNT(*)
FROM users
WHERE identifier = ?1
  AND (?2 IS NULL OR id != ?2)
"#;

/// True when another user already holds this identifier. `exclude_id` skips
/// the row being updated.
pub async fn identifier_taken(
    pool: &SqlitePool,
    identifier: &str,
    exclude_id: Option<&str>,
) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar(SQL_COUNT_IDENTIFIER)
        .bind(identifier)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

const SQL_COUNT_EMAIL: &str = r#"
SELECT COUNT(*)
FROM users
WHERE email = ?1
  AND (?2 IS NULL OR id != ?2)
"#;

pub async fn email_taken(
    pool: &SqlitePool,
    email: &str,
    exclude_id: Option<&str>,
) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar(SQL_COUNT_EMAIL)
        .bind(email)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

const SQL_INSERT_USER: &str = r#"
INSERT INTO users (
  id,
  name,
  identifier,
  email,
  role,
  created_at,
  updated_at
) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewUser<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub identifier: &'a str,
    pub email: Option<&'a str>,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

pub async fn insert_user(pool: &SqlitePool, user: NewUser<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_USER)
        .bind(user.id)
        .bind(user.name)
        .bind(user.identifier)
        .bind(user.email)
        .bind(user.role)
        .bind(user.created_at)
        .bind(user.created_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_UPDATE_USER: &str = r#"
UPDATE users
SET name = ?, identifier = ?, email = ?, role = ?, updated_at = ?
WHERE id = ?
"#;

pub async fn update_user(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    identifier: &str,
    email: Option<&str>,
    role: &str,
    updated_at: DateTime<Utc>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_USER)
        .bind(name)
        .bind(identifier)
        .bind(email)
        .bind(role)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?
"#;

pub async fn delete_user(pool: &SqlitePool, id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_USER).bind(id).execute(pool).await?;
    Ok(res.rows_affected())
}
