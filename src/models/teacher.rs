use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the teacher directory. `username` is the lookup key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub username: String,
    pub display_name: String,
}

/// A caller that resolved to a known teacher via `services::auth::authenticate`.
/// Write operations take it by reference.
#[derive(Debug, Clone)]
pub struct AuthenticatedTeacher {
    pub username: String,
    pub display_name: String,
}

impl From<Teacher> for AuthenticatedTeacher {
    fn from(teacher: Teacher) -> Self {
        Self {
            username: teacher.username,
            display_name: teacher.display_name,
        }
    }
}

/// Query params carrying the teacher credential.
#[derive(Debug, Default, Deserialize)]
pub struct TeacherCredentials {
    pub teacher_username: Option<String>,
}
