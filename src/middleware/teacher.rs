use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::{
    error::AppError,
    models::teacher::{AuthenticatedTeacher, TeacherCredentials},
    services::auth::authenticate,
    AppState,
};

/// Resolves the `teacher_username` query parameter against the teacher directory.
impl FromRequestParts<AppState> for AuthenticatedTeacher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(credentials) = Query::<TeacherCredentials>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::Unauthenticated)?;

        authenticate(state.teachers.as_ref(), credentials.teacher_username.as_deref()).await
    }
}
