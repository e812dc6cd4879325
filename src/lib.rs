// Library exports for the API binary, seed tool and tests
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use db::TeacherDirectory;
use services::announcements::AnnouncementService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub announcements: AnnouncementService,
    pub teachers: Arc<dyn TeacherDirectory>,
}
