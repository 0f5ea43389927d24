use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::AttendanceRecordRow;

const SQL_LIST_RECORDS: &str = r#"
SELECT
  r.id,
  r.activity_id,
  r.user_id,
  r.status,
  r.checked_in_at,
  r.checked_out_at,
  r.remarks,
  u.name AS user_name,
  a.title AS activity_title,
  r.created_at,
  r.updated_at
FROM attendance_records r
LEFT JOIN users u ON u.id = r.user_id
LEFT JOIN activities a ON a.id = r.activity_id
ORDER BY r.created_at ASC
"#;

pub async fn list_records(pool: &SqlitePool) -> sqlx::Result<Vec<AttendanceRecordRow>> {
    sqlx::query_as::<_, AttendanceRecordRow>(SQL_LIST_RECORDS)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_RECORD: &str = r#"
SELECT
  r.id,
  r.activity_id,
  r.user_id,
  r.status,
  r.checked_in_at,
  r.checked_out_at,
  r.remarks,
  u.name AS user_name,
  a.title AS activity_title,
  r.created_at,
  r.updated_at
FROM attendance_records r
LEFT JOIN users u ON u.id = r.user_id
LEFT JOIN activities a ON a.id = r.activity_id
WHERE r.id = ?1
LIMIT 1
"#;

pub async fn load_record(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<AttendanceRecordRow>> {
    sqlx::query_as::<_, AttendanceRecordRow>(SQL_LOAD_RECORD)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_RECORDS_BY_ACTIVITY: &str = r#"
SELECT
  r.id,
  r.activity_id,
  r.user_id,
  r.status,
  r.checked_in_at,
  r.checked_out_at,
  r.remarks,
  u.name AS user_name,
  a.title AS activity_title,
  r.created_at,
  r.updated_at
FROM attendance_records r
LEFT JOIN users u ON u.id = r.user_id
LEFT JOIN activities a ON a.id = r.activity_id
WHERE r.activity_id = ?1
ORDER BY r.created_at ASC
"#;

pub async fn list_records_by_activity(
    pool: &SqlitePool,
    activity_id: &str,
) -> sqlx::Result<Vec<AttendanceRecordRow>> {
    sqlx::query_as::<_, AttendanceRecordRow>(SQL_LIST_RECORDS_BY_ACTIVITY)
        .bind(activity_id)
        .fetch_all(pool)
        .await
}

const SQL_LIST_RECORDS_BY_USER: &str = r#"
SELECT
  r.id,
  r.activity_id,
  r.user_id,
  r.status,
  r.checked_in_at,
  r.checked_out_at,
  r.remarks,
  u.name AS user_name,
  a.title AS activity_title,
  r.created_at,
  r.updated_at
FROM attendance_records r
LEFT JOIN users u ON u.id = r.user_id
LEFT JOIN activities a ON a.id = r.activity_id
WHERE r.user_id = ?1
ORDER BY r.created_at ASC
"#;

pub async fn list_records_by_user(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<AttendanceRecordRow>> {
    sqlx::query_as::<_, AttendanceRecordRow>(SQL_LIST_RECORDS_BY_USER)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

const SQL_FIND_RECORD_FOR_PAIR: &str = r#"
SELECT id
FROM attendance_records
WHERE activity_id = ?1
  AND user_id = ?2
LIMIT 1
"#;

/// Id of the record for this (activity, user) pair, if one exists. Backs the
/// uniqueness pre-check; the UNIQUE constraint remains the hard stop.
pub async fn find_record_for_pair(
    pool: &SqlitePool,
    activity_id: &str,
    user_id: &str,
) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar(SQL_FIND_RECORD_FOR_PAIR)
        .bind(activity_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

const SQL_COUNT_RECORDS_FOR_ACTIVITY: &str = r#"
SELECT COUNT(*)
FROM attendance_records
WHERE activity_id = ?1
"#;

pub async fn count_records_for_activity(
    pool: &SqlitePool,
    activity_id: &str,
) -> sqlx::Result<i64> {
    sqlx::query_scalar(SQL_COUNT_RECORDS_FOR_ACTIVITY)
        .bind(activity_id)
        .fetch_one(pool)
        .await
}

const SQL_INSERT_RECORD: &str = r#"
INSERT INTO attendance_records (
  id,
  activity_id,
  user_id,
  status,
  checked_in_at,
  checked_out_at,
  remarks,
  created_at,
  updated_at
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewAttendanceRecord<'a> {
    pub id: &'a str,
    pub activity_id: &'a str,
    pub user_id: &'a str,
    pub status: &'a str,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub remarks: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

pub async fn insert_record(
    pool: &SqlitePool,
    record: NewAttendanceRecord<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_RECORD)
        .bind(record.id)
        .bind(record.activity_id)
        .bind(record.user_id)
        .bind(record.status)
        .bind(record.checked_in_at)
        .bind(record.checked_out_at)
        .bind(record.remarks)
        .bind(record.created_at)
        .bind(record.created_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_UPDATE_RECORD: &str = r#"
UPDATE attendance_records
SET user_id = ?, status = ?, checked_in_at = ?, checked_out_at = ?, remarks = ?, updated_at = ?
WHERE id = ?
"#;

#[allow(clippy::too_many_arguments)]
pub async fn update_record(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    status: &str,
    checked_in_at: Option<DateTime<Utc>>,
    checked_out_at: Option<DateTime<Utc>>,
    remarks: Option<&str>,
    updated_at: DateTime<Utc>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_RECORD)
        .bind(user_id)
        .bind(status)
        .bind(checked_in_at)
        .bind(checked_out_at)
        .bind(remarks)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_RECORD: &str = r#"
DELETE FROM attendance_records
WHERE id = ?
"#;

pub async fn delete_record(pool: &SqlitePool, id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_RECORD)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
