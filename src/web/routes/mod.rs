pub mod activities;
pub mod attendance;
pub mod auth;
pub mod health;
pub mod users;
