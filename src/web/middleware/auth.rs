use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::models::Role;
use crate::services::auth_service;
use crate::state::AppState;

/// Verified caller identity, injected into request extensions for handlers
/// behind the auth layer.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: String,
    pub role: Role,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if let Some(token) = token {
        match auth_service::verify_token(&state.auth, token) {
            Ok(claims) => {
                request.extensions_mut().insert(AuthenticatedUser {
                    id: claims.sub,
                    role: claims.role,
                });
                return next.run(request).await;
            }
            Err(e) => {
                tracing::debug!("rejected bearer token: {}", e);
            }
        }
    }

    AppError::Unauthorized("missing or invalid bearer token".into()).into_response()
}

pub fn require_admin(user: &AuthenticatedUser) -> Result<(), AppError> {
    if user.role.is_admin() {
        return Ok(());
    }
    Err(AppError::Forbidden("admin role required".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_passes_the_role_gate() {
        let user = AuthenticatedUser {
            id: "a".into(),
            role: Role::Admin,
        };
        assert!(require_admin(&user).is_ok());
    }

    #[test]
    fn member_is_refused_by_the_role_gate() {
        let user = AuthenticatedUser {
            id: "m".into(),
            role: Role::Member,
        };
        assert!(matches!(
            require_admin(&user),
            Err(AppError::Forbidden(_))
        ));
    }
}
