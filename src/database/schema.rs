//! SQLite schema for the attendance tracker.

use sqlx::SqlitePool;

pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    identifier TEXT NOT NULL UNIQUE,
    email TEXT UNIQUE,
    role TEXT NOT NULL DEFAULT 'member',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

pub const CREATE_ACTIVITIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    date TEXT,
    start_at TEXT,
    end_at TEXT,
    location TEXT,
    created_by_user_id TEXT REFERENCES users(id) ON DELETE SET NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

pub const CREATE_ATTENDANCE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS attendance_records (
    id TEXT PRIMARY KEY,
    activity_id TEXT NOT NULL REFERENCES activities(id) ON DELETE CASCADE,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    status TEXT NOT NULL DEFAULT 'present',
    checked_in_at TEXT,
    checked_out_at TEXT,
    remarks TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (activity_id, user_id)
)
"#;

pub const CREATE_ACTIVITIES_CREATOR_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_activities_creator ON activities(created_by_user_id)
"#;

pub const CREATE_ACTIVITIES_DATE_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date)
"#;

pub const CREATE_ATTENDANCE_ACTIVITY_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_attendance_activity ON attendance_records(activity_id)
"#;

pub const CREATE_ATTENDANCE_USER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_attendance_user ON attendance_records(user_id)
"#;

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_USERS_TABLE,
    CREATE_ACTIVITIES_TABLE,
    CREATE_ATTENDANCE_TABLE,
    CREATE_ACTIVITIES_CREATOR_INDEX,
    CREATE_ACTIVITIES_DATE_INDEX,
    CREATE_ATTENDANCE_ACTIVITY_INDEX,
    CREATE_ATTENDANCE_USER_INDEX,
];

/// Create all tables and indexes if they don't exist.
pub async fn init_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
