use sqlx::SqlitePool;

use crate::config::Config;
use crate::services::auth_service::AuthKeys;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: AuthKeys,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self {
            pool,
            auth: AuthKeys::from_secret(&config.jwt_secret, config.token_ttl_secs),
        }
    }
}
