use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{activities_repo, attendance_repo, users_repo};
use crate::error::AppError;
use crate::models::{AttendanceRecordRow, AttendanceStatus, Role};
use crate::services::ensure_uuid;

const REMARKS_MAX_LEN: usize = 500;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceActivitySummaryDto {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordDto {
    pub id: String,
    pub activity_id: String,
    pub user_id: String,
    pub user_name: Option<String>,
    pub activity: AttendanceActivitySummaryDto,
    pub status: AttendanceStatus,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AttendanceRecordRow> for AttendanceRecordDto {
    fn from(row: AttendanceRecordRow) -> Self {
        Self {
            id: row.id,
            activity: AttendanceActivitySummaryDto {
                id: row.activity_id.clone(),
                title: row.activity_title,
            },
            activity_id: row.activity_id,
            user_id: row.user_id,
            user_name: row.user_name,
            status: row.status,
            checked_in_at: row.checked_in_at,
            checked_out_at: row.checked_out_at,
            remarks: row.remarks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendance {
    pub activity_id: String,
    pub user_id: String,
    pub status: Option<AttendanceStatus>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendance {
    pub user_id: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

pub async fn list_records(pool: &SqlitePool) -> Result<Vec<AttendanceRecordDto>, AppError> {
    let rows = attendance_repo::list_records(pool).await?;
    Ok(rows.into_iter().map(AttendanceRecordDto::from).collect())
}

pub async fn get_record(pool: &SqlitePool, id: &str) -> Result<AttendanceRecordDto, AppError> {
    ensure_uuid(id)?;
    let row = load_or_not_found(pool, id).await?;
    Ok(row.into())
}

pub async fn list_by_activity(
    pool: &SqlitePool,
    activity_id: &str,
) -> Result<Vec<AttendanceRecordDto>, AppError> {
    ensure_uuid(activity_id)?;
    let rows = attendance_repo::list_records_by_activity(pool, activity_id).await?;
    Ok(rows.into_iter().map(AttendanceRecordDto::from).collect())
}

pub async fn list_by_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<AttendanceRecordDto>, AppError> {
    ensure_uuid(user_id)?;
    let rows = attendance_repo::list_records_by_user(pool, user_id).await?;
    Ok(rows.into_iter().map(AttendanceRecordDto::from).collect())
}

pub async fn create_record(
    pool: &SqlitePool,
    actor_id: &str,
    actor_role: Role,
    input: CreateAttendance,
) -> Result<AttendanceRecordDto, AppError> {
    ensure_uuid(&input.activity_id)?;
    ensure_uuid(&input.user_id)?;

    if !actor_role.is_admin() && input.user_id != actor_id {
        return Err(AppError::Forbidden(
            "members can only mark their own attendance".into(),
        ));
    }

    let remarks = validate_remarks(input.remarks.as_deref())?;

    // Existence checks first so a broken reference reads as 404, not as an
    // opaque constraint failure.
    if users_repo::load_user(pool, &input.user_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "User with id {} not found",
            input.user_id
        )));
    }
    if activities_repo::load_activity(pool, &input.activity_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Activity with id {} not found",
            input.activity_id
        )));
    }

    if attendance_repo::find_record_for_pair(pool, &input.activity_id, &input.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "attendance already recorded for this user and activity".into(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let status = input.status.unwrap_or(AttendanceStatus::Present);
    let checked_in_at = input.checked_in_at.unwrap_or(now);

    attendance_repo::insert_record(
        pool,
        attendance_repo::NewAttendanceRecord {
            id: &id,
            activity_id: &input.activity_id,
            user_id: &input.user_id,
            status: status.as_str(),
            checked_in_at: Some(checked_in_at),
            checked_out_at: input.checked_out_at,
            remarks: remarks.as_deref(),
            created_at: now,
        },
    )
    .await?;

    let row = attendance_repo::load_record(pool, &id)
        .await?
        .ok_or_else(|| AppError::Internal("attendance record missing after insert".into()))?;
    Ok(row.into())
}

pub async fn update_record(
    pool: &SqlitePool,
    actor_id: &str,
    actor_role: Role,
    id: &str,
    input: UpdateAttendance,
) -> Result<AttendanceRecordDto, AppError> {
    ensure_uuid(id)?;
    let existing = load_or_not_found(pool, id).await?;

    if !actor_role.is_admin() {
        if existing.user_id != actor_id {
            return Err(AppError::Forbidden(
                "members can only update their own attendance".into(),
            ));
        }
        if let Some(user_id) = input.user_id.as_deref() {
            if user_id != actor_id {
                return Err(AppError::Forbidden(
                    "members can only update their own attendance".into(),
                ));
            }
        }
    }

    let user_id = input.user_id.unwrap_or_else(|| existing.user_id.clone());
    if user_id != existing.user_id {
        ensure_uuid(&user_id)?;
        if users_repo::load_user(pool, &user_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "User with id {user_id} not found"
            )));
        }
        if attendance_repo::find_record_for_pair(pool, &existing.activity_id, &user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "attendance already recorded for this user and activity".into(),
            ));
        }
    }

    let remarks = match input.remarks.as_deref() {
        Some(raw) => validate_remarks(Some(raw))?,
        None => existing.remarks.clone(),
    };
    let status = input.status.unwrap_or(existing.status);
    let checked_in_at = input.checked_in_at.or(existing.checked_in_at);
    let checked_out_at = input.checked_out_at.or(existing.checked_out_at);

    attendance_repo::update_record(
        pool,
        id,
        &user_id,
        status.as_str(),
        checked_in_at,
        checked_out_at,
        remarks.as_deref(),
        Utc::now(),
    )
    .await?;

    let row = load_or_not_found(pool, id).await?;
    Ok(row.into())
}

pub async fn delete_record(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    ensure_uuid(id)?;
    let affected = attendance_repo::delete_record(pool, id).await?;
    if affected == 0 {
        return Err(AppError::NotFound(format!(
            "Attendance record {id} not found"
        )));
    }
    Ok(())
}

async fn load_or_not_found(pool: &SqlitePool, id: &str) -> Result<AttendanceRecordRow, AppError> {
    attendance_repo::load_record(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Attendance record {id} not found")))
}

fn validate_remarks(raw: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(remarks) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if remarks.chars().count() > REMARKS_MAX_LEN {
        return Err(AppError::Validation(format!(
            "remarks must be at most {REMARKS_MAX_LEN} characters"
        )));
    }
    Ok(Some(remarks.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remarks_are_optional_but_bounded() {
        assert_eq!(validate_remarks(None).unwrap(), None);
        assert_eq!(validate_remarks(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_remarks(Some("on medical leave")).unwrap(),
            Some("on medical leave".to_string())
        );
        assert!(validate_remarks(Some(&"x".repeat(501))).is_err());
    }
}
