use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::error::AppError;
use crate::services::attendance_service::{
    self, AttendanceRecordDto, CreateAttendance, UpdateAttendance,
};
use crate::state::AppState;
use crate::web::middleware::auth::{require_admin, AuthenticatedUser};

pub async fn list_records_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceRecordDto>>, AppError> {
    Ok(Json(attendance_service::list_records(&state.pool).await?))
}

pub async fn get_record_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AttendanceRecordDto>, AppError> {
    Ok(Json(attendance_service::get_record(&state.pool, &id).await?))
}

pub async fn list_by_activity_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(activity_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceRecordDto>>, AppError> {
    require_admin(&auth_user)?;
    Ok(Json(
        attendance_service::list_by_activity(&state.pool, &activity_id).await?,
    ))
}

pub async fn list_by_user_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceRecordDto>>, AppError> {
    require_admin(&auth_user)?;
    Ok(Json(
        attendance_service::list_by_user(&state.pool, &user_id).await?,
    ))
}

pub async fn create_record_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(body): Json<CreateAttendance>,
) -> Result<(StatusCode, Json<AttendanceRecordDto>), AppError> {
    let record =
        attendance_service::create_record(&state.pool, &auth_user.id, auth_user.role, body).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_record_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<UpdateAttendance>,
) -> Result<Json<AttendanceRecordDto>, AppError> {
    let record = attendance_service::update_record(
        &state.pool,
        &auth_user.id,
        auth_user.role,
        &id,
        body,
    )
    .await?;
    Ok(Json(record))
}

pub async fn delete_record_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    require_admin(&auth_user)?;
    attendance_service::delete_record(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
