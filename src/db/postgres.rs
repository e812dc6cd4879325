use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{AnnouncementStore, TeacherDirectory};
use crate::models::{
    announcement::{Announcement, AnnouncementChanges, AnnouncementFilter, EndDateOrder, NewAnnouncement},
    teacher::Teacher,
};

const COLUMNS: &str = "id, message, start_date, end_date, created_at, updated_at";

#[derive(Clone)]
pub struct PgAnnouncementStore {
    pool: PgPool,
}

impl PgAnnouncementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementStore for PgAnnouncementStore {
    async fn find(
        &self,
        filter: AnnouncementFilter,
        order: EndDateOrder,
    ) -> anyhow::Result<Vec<Announcement>> {
        let direction = match order {
            EndDateOrder::Ascending => "ASC",
            EndDateOrder::Descending => "DESC",
        };

        let rows = match filter {
            AnnouncementFilter::All => {
                sqlx::query_as::<_, Announcement>(&format!(
                    "SELECT {COLUMNS} FROM announcements ORDER BY end_date {direction}, id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            AnnouncementFilter::ActiveAt(reference) => {
                sqlx::query_as::<_, Announcement>(&format!(
                    r#"SELECT {COLUMNS} FROM announcements
                       WHERE end_date >= $1
                         AND (start_date IS NULL OR start_date <= $1)
                       ORDER BY end_date {direction}, id"#
                ))
                .bind(reference)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, announcement: NewAnnouncement) -> anyhow::Result<Announcement> {
        let row = sqlx::query_as::<_, Announcement>(&format!(
            r#"INSERT INTO announcements (message, start_date, end_date, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $4)
               RETURNING {COLUMNS}"#
        ))
        .bind(&announcement.message)
        .bind(announcement.start_date)
        .bind(announcement.end_date)
        .bind(announcement.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: AnnouncementChanges) -> anyhow::Result<bool> {
        let set_start = changes.start_date.is_some();
        let start_date: Option<DateTime<Utc>> = changes.start_date.flatten();

        let result = sqlx::query(
            r#"UPDATE announcements
               SET message    = COALESCE($1, message),
                   start_date = CASE WHEN $2 THEN $3 ELSE start_date END,
                   end_date   = COALESCE($4, end_date),
                   updated_at = $5
               WHERE id = $6"#,
        )
        .bind(&changes.message)
        .bind(set_start)
        .bind(start_date)
        .bind(changes.end_date)
        .bind(changes.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgTeacherDirectory {
    pool: PgPool,
}

impl PgTeacherDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherDirectory for PgTeacherDirectory {
    async fn find_teacher(&self, username: &str) -> anyhow::Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT username, display_name FROM teachers WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }
}
