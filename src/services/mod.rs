pub mod announcements;
pub mod auth;
