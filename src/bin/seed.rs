use chrono::{DateTime, NaiveDate, Utc};
use dotenvy::dotenv;

use rollcall::database::{self, schema};
use rollcall::models::{AttendanceStatus, Role};
use rollcall::services::activity_service::{self, CreateActivity};
use rollcall::services::attendance_service::{self, CreateAttendance};
use rollcall::services::user_service::{self, CreateUser};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = database::connect_pool(&db_url)
        .await
        .expect("could not connect to database");
    schema::init_schema(&pool)
        .await
        .expect("could not initialize database schema");

    println!("clearing existing data...");

    // Child tables first, because of the foreign keys.
    sqlx::query("DELETE FROM attendance_records")
        .execute(&pool)
        .await
        .expect("wipe attendance_records");
    sqlx::query("DELETE FROM activities")
        .execute(&pool)
        .await
        .expect("wipe activities");
    sqlx::query("DELETE FROM users")
        .execute(&pool)
        .await
        .expect("wipe users");

    println!("seeding users...");

    let admin = user_service::create_user(
        &pool,
        CreateUser {
            name: "Admin User".to_string(),
            identifier: "admin".to_string(),
            email: Some("admin@example.com".to_string()),
            role: Some(Role::Admin),
        },
    )
    .await
    .expect("seed admin");

    let alice = user_service::create_user(
        &pool,
        CreateUser {
            name: "Alice Tan".to_string(),
            identifier: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
            role: Some(Role::Member),
        },
    )
    .await
    .expect("seed alice");

    let bob = user_service::create_user(
        &pool,
        CreateUser {
            name: "Bob Lim".to_string(),
            identifier: "bob".to_string(),
            email: Some("bob@example.com".to_string()),
            role: Some(Role::Member),
        },
    )
    .await
    .expect("seed bob");

    println!("seeding activities...");

    let programme = [
        (
            "Morning Parade",
            "Standard unit morning parade and roll-call.",
            "2025-12-01",
            "07:30",
            "08:00",
            "Parade Square",
        ),
        (
            "Evening PT Session",
            "Strength and conditioning training.",
            "2025-12-03",
            "18:00",
            "19:30",
            "Gym / Track",
        ),
        (
            "IPPT Prep Run",
            "2.4km and stations rehearsal.",
            "2025-12-05",
            "16:00",
            "17:30",
            "Unit Track",
        ),
        (
            "Guard Duty Briefing",
            "Duty roster and orders walkthrough.",
            "2025-12-12",
            "09:00",
            "10:00",
            "Ops Room",
        ),
        (
            "Cohesion Day",
            "Unit cohesion games and lunch.",
            "2025-12-19",
            "10:00",
            "15:00",
            "Mess Hall",
        ),
    ];

    let mut activities = Vec::new();
    for (title, description, date, start, end, location) in programme {
        let activity = activity_service::create_activity(
            &pool,
            &admin.id,
            CreateActivity {
                title: title.to_string(),
                description: Some(description.to_string()),
                date: Some(parse_date(date)),
                start_at: Some(at(date, start)),
                end_at: Some(at(date, end)),
                location: Some(location.to_string()),
            },
        )
        .await
        .expect("seed activity");
        activities.push(activity);
    }

    println!("seeding attendance...");

    let marks = [
        (&activities[0], &alice, AttendanceStatus::Present, None),
        (&activities[0], &bob, AttendanceStatus::Late, Some("overslept")),
        (&activities[1], &alice, AttendanceStatus::Excused, Some("medical appointment")),
        (&activities[1], &bob, AttendanceStatus::Present, None),
        (&activities[2], &bob, AttendanceStatus::Absent, None),
    ];

    let mut records = 0;
    for (activity, user, status, remarks) in marks {
        attendance_service::create_record(
            &pool,
            &admin.id,
            Role::Admin,
            CreateAttendance {
                activity_id: activity.id.clone(),
                user_id: user.id.clone(),
                status: Some(status),
                checked_in_at: activity.start_at,
                checked_out_at: None,
                remarks: remarks.map(|s| s.to_string()),
            },
        )
        .await
        .expect("seed attendance record");
        records += 1;
    }

    println!(
        "seeded: users=3, activities={}, attendance records={}",
        activities.len(),
        records
    );
}

fn parse_date(date: &str) -> NaiveDate {
    date.parse().expect("seed date")
}

// Programme times are local (UTC+08:00); stored as UTC.
fn at(date: &str, time: &str) -> DateTime<Utc> {
    format!("{date}T{time}:00+08:00")
        .parse::<DateTime<Utc>>()
        .expect("seed datetime")
}
