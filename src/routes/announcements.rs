use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::json_body::OptionalJson,
    models::{
        announcement::{
            ActiveAnnouncementsQuery, AnnouncementResponse, CreateAnnouncementRequest,
            UpdateAnnouncementRequest,
        },
        teacher::AuthenticatedTeacher,
    },
    AppState,
};

/// GET /announcements/active?now=<ISO 8601> (public)
pub async fn list_active(
    State(state): State<AppState>,
    Query(params): Query<ActiveAnnouncementsQuery>,
) -> Result<Json<Vec<AnnouncementResponse>>, AppError> {
    let announcements = state.announcements.list_active(params.now.as_deref()).await?;
    Ok(Json(announcements))
}

/// GET /announcements (public). Admin view of every announcement
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnnouncementResponse>>, AppError> {
    let announcements = state.announcements.list_all().await?;
    Ok(Json(announcements))
}

/// POST /announcements (teachers only). Fields come from the query string, a JSON body, or both.
pub async fn create_announcement(
    State(state): State<AppState>,
    teacher: AuthenticatedTeacher,
    Query(query): Query<CreateAnnouncementRequest>,
    OptionalJson(body): OptionalJson<CreateAnnouncementRequest>,
) -> Result<Json<AnnouncementResponse>, AppError> {
    let req = query.overlay(body);
    let announcement = state.announcements.create(&teacher, req).await?;
    Ok(Json(announcement))
}

/// PUT /announcements/{id} (teachers only)
pub async fn update_announcement(
    State(state): State<AppState>,
    teacher: AuthenticatedTeacher,
    Path(id): Path<String>,
    Query(query): Query<UpdateAnnouncementRequest>,
    OptionalJson(body): OptionalJson<UpdateAnnouncementRequest>,
) -> Result<Json<AnnouncementResponse>, AppError> {
    let req = query.overlay(body);
    let announcement = state.announcements.update(&teacher, &id, req).await?;
    Ok(Json(announcement))
}

/// DELETE /announcements/{id} (teachers only)
pub async fn delete_announcement(
    State(state): State<AppState>,
    teacher: AuthenticatedTeacher,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.announcements.delete(&teacher, &id).await?;
    Ok(Json(json!({ "message": "Announcement deleted" })))
}
