use axum::{extract::State, Extension, Json};

use crate::error::AppError;
use crate::services::auth_service::{self, LoginRequest, LoginResponse};
use crate::services::user_service::UserDto;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = auth_service::login(&state.pool, &state.auth, &body.identifier).await?;
    Ok(Json(response))
}

pub async fn me_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<UserDto>, AppError> {
    let user = auth_service::me(&state.pool, &auth_user.id).await?;
    Ok(Json(user))
}
