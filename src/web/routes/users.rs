use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::error::AppError;
use crate::services::user_service::{self, CreateUser, UpdateUser, UserDto};
use crate::state::AppState;
use crate::web::middleware::auth::{require_admin, AuthenticatedUser};

pub async fn list_users_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserDto>>, AppError> {
    require_admin(&auth_user)?;
    Ok(Json(user_service::list_users(&state.pool).await?))
}

pub async fn get_user_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserDto>, AppError> {
    require_admin(&auth_user)?;
    Ok(Json(user_service::get_user(&state.pool, &id).await?))
}

pub async fn create_user_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserDto>), AppError> {
    require_admin(&auth_user)?;
    let user = user_service::create_user(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<UpdateUser>,
) -> Result<Json<UserDto>, AppError> {
    require_admin(&auth_user)?;
    Ok(Json(user_service::update_user(&state.pool, &id, body).await?))
}

pub async fn delete_user_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    require_admin(&auth_user)?;
    user_service::delete_user(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
