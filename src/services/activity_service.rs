use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{activities_repo, attendance_repo};
use crate::error::AppError;
use crate::models::{ActivityRow, Role};
use crate::services::ensure_uuid;

const TITLE_MAX_LEN: usize = 255;
const LOCATION_MAX_LEN: usize = 255;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub created_by_user_id: Option<String>,
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ActivityRow> for ActivityDto {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            start_at: row.start_at,
            end_at: row.end_at,
            location: row.location,
            created_by_user_id: row.created_by_user_id,
            created_by_name: row.created_by_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivity {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivity {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

pub async fn list_activities(pool: &SqlitePool) -> Result<Vec<ActivityDto>, AppError> {
    let rows = activities_repo::list_activities(pool).await?;
    Ok(rows.into_iter().map(ActivityDto::from).collect())
}

pub async fn get_activity(pool: &SqlitePool, id: &str) -> Result<ActivityDto, AppError> {
    ensure_uuid(id)?;
    let row = load_or_not_found(pool, id).await?;
    Ok(row.into())
}

pub async fn list_created_by(pool: &SqlitePool, user_id: &str) -> Result<Vec<ActivityDto>, AppError> {
    ensure_uuid(user_id)?;
    let rows = activities_repo::list_activities_by_creator(pool, user_id).await?;
    Ok(rows.into_iter().map(ActivityDto::from).collect())
}

/// The creator is always the caller; a body-supplied creator id is ignored.
pub async fn create_activity(
    pool: &SqlitePool,
    actor_id: &str,
    input: CreateActivity,
) -> Result<ActivityDto, AppError> {
    let title = validate_title(&input.title)?;
    let location = validate_location(input.location.as_deref())?;
    let description = non_empty(input.description.as_deref());

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    activities_repo::insert_activity(
        pool,
        activities_repo::NewActivity {
            id: &id,
            title: &title,
            description: description.as_deref(),
            date: input.date,
            start_at: input.start_at,
            end_at: input.end_at,
            location: location.as_deref(),
            created_by_user_id: Some(actor_id),
            created_at: now,
        },
    )
    .await?;

    let row = activities_repo::load_activity(pool, &id)
        .await?
        .ok_or_else(|| AppError::Internal("activity missing after insert".into()))?;
    Ok(row.into())
}

pub async fn update_activity(
    pool: &SqlitePool,
    actor_id: &str,
    actor_role: Role,
    id: &str,
    input: UpdateActivity,
) -> Result<ActivityDto, AppError> {
    ensure_uuid(id)?;
    let existing = load_or_not_found(pool, id).await?;
    ensure_can_update(pool, &existing, actor_id, actor_role).await?;

    let title = match input.title.as_deref() {
        Some(raw) => validate_title(raw)?,
        None => existing.title,
    };
    let location = match input.location.as_deref() {
        Some(raw) => validate_location(Some(raw))?,
        None => existing.location,
    };
    let description = match input.description.as_deref() {
        Some(raw) => non_empty(Some(raw)),
        None => existing.description,
    };
    let date = input.date.or(existing.date);
    let start_at = input.start_at.or(existing.start_at);
    let end_at = input.end_at.or(existing.end_at);

    activities_repo::update_activity(
        pool,
        id,
        &title,
        description.as_deref(),
        date,
        start_at,
        end_at,
        location.as_deref(),
        Utc::now(),
    )
    .await?;

    let row = load_or_not_found(pool, id).await?;
    Ok(row.into())
}

pub async fn delete_activity(
    pool: &SqlitePool,
    actor_id: &str,
    actor_role: Role,
    id: &str,
) -> Result<(), AppError> {
    ensure_uuid(id)?;
    let existing = load_or_not_found(pool, id).await?;

    if !actor_role.is_admin() && existing.created_by_user_id.as_deref() != Some(actor_id) {
        return Err(AppError::Forbidden(
            "only admins or the activity creator may delete an activity".into(),
        ));
    }

    // Block-on-delete: attendance history is never removed implicitly
    // through this endpoint, whoever asks.
    let records = attendance_repo::count_records_for_activity(pool, id).await?;
    if records > 0 {
        return Err(AppError::Conflict(
            "cannot delete activity with existing attendance records".into(),
        ));
    }

    let affected = activities_repo::delete_activity(pool, id).await?;
    if affected == 0 {
        return Err(AppError::NotFound(format!(
            "Activity with id {id} not found"
        )));
    }
    Ok(())
}

async fn load_or_not_found(pool: &SqlitePool, id: &str) -> Result<ActivityRow, AppError> {
    activities_repo::load_activity(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity with id {id} not found")))
}

/// Admins always may; the creator only while nobody has attendance on it.
async fn ensure_can_update(
    pool: &SqlitePool,
    activity: &ActivityRow,
    actor_id: &str,
    actor_role: Role,
) -> Result<(), AppError> {
    if actor_role.is_admin() {
        return Ok(());
    }

    if activity.created_by_user_id.as_deref() == Some(actor_id) {
        let records = attendance_repo::count_records_for_activity(pool, &activity.id).await?;
        if records == 0 {
            return Ok(());
        }
        return Err(AppError::Forbidden(
            "only admins may modify an activity that already has attendance records".into(),
        ));
    }

    Err(AppError::Forbidden(
        "only admins or the activity creator may modify an activity".into(),
    ))
}

fn validate_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(AppError::Validation(format!(
            "title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_location(raw: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(location) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if location.chars().count() > LOCATION_MAX_LEN {
        return Err(AppError::Validation(format!(
            "location must be at most {LOCATION_MAX_LEN} characters"
        )));
    }
    Ok(Some(location.to_string()))
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
