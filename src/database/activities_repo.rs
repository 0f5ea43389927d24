use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::ActivityRow;

const SQL_LIST_ACTIVITIES: &str = r#"
SELECT
  a.id,
  a.title,
  a.description,
  a.date,
  a.start_at,
  a.end_at,
  a.location,
  a.created_by_user_id,
  u.name AS created_by_name,
  a.created_at,
  a.updated_at
FROM activities a
LEFT JOIN users u ON u.id = a.created_by_user_id
ORDER BY a.date ASC, a.created_at ASC
"#;

pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LIST_ACTIVITIES)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_ACTIVITY: &str = r#"
SELECT
  a.id,
  a.title,
  a.description,
  a.date,
  a.start_at,
  a.end_at,
  a.location,
  a.created_by_user_id,
  u.name AS created_by_name,
  a.created_at,
  a.updated_at
FROM activities a
LEFT JOIN users u ON u.id = a.created_by_user_id
WHERE a.id = ?1
LIMIT 1
"#;

pub async fn load_activity(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LOAD_ACTIVITY)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_ACTIVITIES_BY_CREATOR: &str = r#"
SELECT
  a.id,
  a.title,
  a.description,
  a.date,
  a.start_at,
  a.end_at,
  a.location,
  a.created_by_user_id,
  u.name AS created_by_name,
  a.created_at,
  a.updated_at
FROM activities a
LEFT JOIN users u ON u.id = a.created_by_user_id
WHERE a.created_by_user_id = ?1
ORDER BY a.date DESC, a.created_at DESC
"#;

pub async fn list_activities_by_creator(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LIST_ACTIVITIES_BY_CREATOR)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO activities (
  id,
  title,
  description,
  date,
  start_at,
  end_at,
  location,
  created_by_user_id,
  created_at,
  updated_at
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewActivity<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub date: Option<NaiveDate>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<&'a str>,
    pub created_by_user_id: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

pub async fn insert_activity(pool: &SqlitePool, activity: NewActivity<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_ACTIVITY)
        .bind(activity.id)
        .bind(activity.title)
        .bind(activity.description)
        .bind(activity.date)
        .bind(activity.start_at)
        .bind(activity.end_at)
        .bind(activity.location)
        .bind(activity.created_by_user_id)
        .bind(activity.created_at)
        .bind(activity.created_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_UPDATE_ACTIVITY: &str = r#"
UPDATE activities
SET title = ?, description = ?, date = ?, start_at = ?, end_at = ?, location = ?, updated_at = ?
WHERE id = ?
"#;

#[allow(clippy::too_many_arguments)]
pub async fn update_activity(
    pool: &SqlitePool,
    id: &str,
    title: &str,
    description: Option<&str>,
    date: Option<NaiveDate>,
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
    location: Option<&str>,
    updated_at: DateTime<Utc>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_ACTIVITY)
        .bind(title)
        .bind(description)
        .bind(date)
        .bind(start_at)
        .bind(end_at)
        .bind(location)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_ACTIVITY: &str = r#"
DELETE FROM activities
WHERE id = ?
"#;

pub async fn delete_activity(pool: &SqlitePool, id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_ACTIVITY)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
