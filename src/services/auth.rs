use crate::{
    db::TeacherDirectory,
    error::AppError,
    models::teacher::AuthenticatedTeacher,
};

/// Resolve a teacher username against the directory.
///
/// A missing or empty username is `Unauthenticated`; any other username with no
/// matching teacher is `Unauthorized`.
pub async fn authenticate(
    directory: &dyn TeacherDirectory,
    username: Option<&str>,
) -> Result<AuthenticatedTeacher, AppError> {
    let username = username
        .filter(|u| !u.is_empty())
        .ok_or(AppError::Unauthenticated)?;

    match directory.find_teacher(username).await? {
        Some(teacher) => Ok(teacher.into()),
        None => {
            tracing::debug!(username = %username, "Unknown teacher");
            Err(AppError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    #[tokio::test]
    async fn test_known_teacher() {
        let store = MemoryStore::with_teachers(&["jwilson"]);
        let teacher = authenticate(&store, Some("jwilson")).await.unwrap();
        assert_eq!(teacher.username, "jwilson");
        assert_eq!(teacher.display_name, "Teacher jwilson");
    }

    #[tokio::test]
    async fn test_missing_username() {
        let store = MemoryStore::with_teachers(&["jwilson"]);
        assert!(matches!(authenticate(&store, None).await, Err(AppError::Unauthenticated)));
        assert!(matches!(authenticate(&store, Some("")).await, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_lookup_is_exact_match() {
        let store = MemoryStore::with_teachers(&["jwilson"]);
        assert!(matches!(authenticate(&store, Some("JWilson")).await, Err(AppError::Unauthorized)));
        assert!(matches!(authenticate(&store, Some("nobody")).await, Err(AppError::Unauthorized)));
        assert!(matches!(authenticate(&store, Some(" jwilson")).await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_whitespace_username_is_unknown_teacher() {
        let store = MemoryStore::with_teachers(&["jwilson"]);
        assert!(matches!(authenticate(&store, Some("  ")).await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_directory_failure_is_store_error() {
        let store = MemoryStore::with_teachers(&["jwilson"]);
        store.set_unavailable(true);
        assert!(matches!(authenticate(&store, Some("jwilson")).await, Err(AppError::Store(_))));
    }
}
