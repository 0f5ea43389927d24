use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::error::AppError;
use crate::services::activity_service::{self, ActivityDto, CreateActivity, UpdateActivity};
use crate::state::AppState;
use crate::web::middleware::auth::{require_admin, AuthenticatedUser};

pub async fn list_activities_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityDto>>, AppError> {
    Ok(Json(activity_service::list_activities(&state.pool).await?))
}

pub async fn get_activity_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ActivityDto>, AppError> {
    Ok(Json(activity_service::get_activity(&state.pool, &id).await?))
}

pub async fn list_created_by_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityDto>>, AppError> {
    Ok(Json(
        activity_service::list_created_by(&state.pool, &user_id).await?,
    ))
}

pub async fn create_activity_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(body): Json<CreateActivity>,
) -> Result<(StatusCode, Json<ActivityDto>), AppError> {
    require_admin(&auth_user)?;
    let activity = activity_service::create_activity(&state.pool, &auth_user.id, body).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn update_activity_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<UpdateActivity>,
) -> Result<Json<ActivityDto>, AppError> {
    let activity = activity_service::update_activity(
        &state.pool,
        &auth_user.id,
        auth_user.role,
        &id,
        body,
    )
    .await?;
    Ok(Json(activity))
}

pub async fn delete_activity_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    activity_service::delete_activity(&state.pool, &auth_user.id, auth_user.role, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
