use uuid::Uuid;

use crate::error::AppError;

pub mod activity_service;
pub mod attendance_service;
pub mod auth_service;
pub mod user_service;

/// Entity ids are UUIDs; anything else is a client error, not a lookup miss.
pub(crate) fn ensure_uuid(raw: &str) -> Result<(), AppError> {
    Uuid::parse_str(raw)
        .map(|_| ())
        .map_err(|_| AppError::Validation(format!("invalid id: {raw}")))
}
