pub mod announcements;
pub mod health;

use axum::{
    routing::{get, put},
    Router,
};

use crate::AppState;

/// All routes, trailing-slash tolerant on the collection endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/announcements",
            get(announcements::list_all).post(announcements::create_announcement),
        )
        .route(
            "/announcements/",
            get(announcements::list_all).post(announcements::create_announcement),
        )
        .route("/announcements/active", get(announcements::list_active))
        .route("/announcements/active/", get(announcements::list_active))
        .route(
            "/announcements/{id}",
            put(announcements::update_announcement).delete(announcements::delete_announcement),
        )
        .with_state(state)
}
