pub mod activities;
pub mod attendance;
pub mod users;

pub use activities::ActivityRow;
pub use attendance::{AttendanceRecordRow, AttendanceStatus};
pub use users::{Role, UserRow};
