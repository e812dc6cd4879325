#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    announcement::{Announcement, AnnouncementChanges, AnnouncementFilter, EndDateOrder, NewAnnouncement},
    teacher::Teacher,
};

/// Storage for announcements. Every method is a single-record or
/// single-query operation; atomicity is per record.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    async fn find(
        &self,
        filter: AnnouncementFilter,
        order: EndDateOrder,
    ) -> anyhow::Result<Vec<Announcement>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Announcement>>;

    async fn insert(&self, announcement: NewAnnouncement) -> anyhow::Result<Announcement>;

    /// Returns `false` when no record matched `id`.
    async fn update(&self, id: Uuid, changes: AnnouncementChanges) -> anyhow::Result<bool>;

    /// Returns `false` when no record matched `id`.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait TeacherDirectory: Send + Sync {
    /// Exact, case-sensitive match on username.
    async fn find_teacher(&self, username: &str) -> anyhow::Result<Option<Teacher>>;
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
