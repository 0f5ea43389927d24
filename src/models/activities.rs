use chrono::{DateTime, NaiveDate, Utc};

/// Activity joined with its creator's name. `created_by_name` comes from the
/// LEFT JOIN on users, so it is NULL for orphaned activities.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub created_by_user_id: Option<String>,
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
