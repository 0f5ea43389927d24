use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

pub mod activities_repo;
pub mod attendance_repo;
pub mod schema;
pub mod users_repo;

/// Open a pool with foreign keys enforced. The referential rules on
/// attendance (cascade) and activities (set null) depend on the pragma.
pub async fn connect_pool(database_url: &str) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
