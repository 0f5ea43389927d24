use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::state::AppState;

pub mod middleware;
pub mod routes;

use routes::{activities, attendance, auth, health, users};

/// Build the full route tree. Everything except login and the health probe
/// sits behind one bearer-auth middleware layer.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/users",
            get(users::list_users_handler).post(users::create_user_handler),
        )
        .route(
            "/users/:id",
            get(users::get_user_handler)
                .put(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        .route(
            "/activities",
            get(activities::list_activities_handler).post(activities::create_activity_handler),
        )
        .route(
            "/activities/created-by/:user_id",
            get(activities::list_created_by_handler),
        )
        .route(
            "/activities/:id",
            get(activities::get_activity_handler)
                .put(activities::update_activity_handler)
                .delete(activities::delete_activity_handler),
        )
        .route(
            "/attendance",
            get(attendance::list_records_handler).post(attendance::create_record_handler),
        )
        .route(
            "/attendance/activity/:activity_id",
            get(attendance::list_by_activity_handler),
        )
        .route(
            "/attendance/user/:user_id",
            get(attendance::list_by_user_handler),
        )
        .route(
            "/attendance/:id",
            get(attendance::get_record_handler)
                .put(attendance::update_record_handler)
                .delete(attendance::delete_record_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/auth/login", post(auth::login_handler))
        .merge(protected)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
