use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::{
    db::AnnouncementStore,
    error::{AppError, Result},
    models::{
        announcement::{
            parse_announcement_id, parse_datetime, AnnouncementChanges, AnnouncementFilter,
            AnnouncementResponse, CreateAnnouncementRequest, EndDateOrder, NewAnnouncement,
            UpdateAnnouncementRequest,
        },
        teacher::AuthenticatedTeacher,
    },
};

#[derive(Clone)]
pub struct AnnouncementService {
    store: Arc<dyn AnnouncementStore>,
}

impl AnnouncementService {
    pub fn new(store: Arc<dyn AnnouncementStore>) -> Self {
        Self { store }
    }

    /// Announcements visible at `now` (defaults to the current time), soonest to expire first.
    pub async fn list_active(&self, now: Option<&str>) -> Result<Vec<AnnouncementResponse>> {
        let reference = match now {
            Some(value) => parse_datetime(value)?,
            None => None,
        }
        .unwrap_or_else(Utc::now);

        let rows = self
            .store
            .find(AnnouncementFilter::ActiveAt(reference), EndDateOrder::Ascending)
            .await?;
        debug!(reference = %reference, count = rows.len(), "Listed active announcements");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every announcement, latest end date first.
    pub async fn list_all(&self) -> Result<Vec<AnnouncementResponse>> {
        let rows = self
            .store
            .find(AnnouncementFilter::All, EndDateOrder::Descending)
            .await?;
        debug!(count = rows.len(), "Listed all announcements");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        teacher: &AuthenticatedTeacher,
        req: CreateAnnouncementRequest,
    ) -> Result<AnnouncementResponse> {
        let message = req
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::invalid("Message is required"))?
            .to_string();

        let end_date = match req.end_date.as_deref() {
            Some(value) => parse_datetime(value)?,
            None => None,
        }
        .ok_or_else(|| AppError::invalid("end_date is required"))?;

        let start_date = match req.start_date.as_deref() {
            Some(value) => parse_datetime(value)?,
            None => None,
        };

        let row = self
            .store
            .insert(NewAnnouncement {
                message,
                start_date,
                end_date,
                created_at: Utc::now(),
            })
            .await?;

        info!(teacher = %teacher.username, announcement_id = %row.id, "Announcement created");
        Ok(row.into())
    }

    /// Partial update: only the fields present in `req` change. `updated_at` always moves.
    pub async fn update(
        &self,
        teacher: &AuthenticatedTeacher,
        id: &str,
        req: UpdateAnnouncementRequest,
    ) -> Result<AnnouncementResponse> {
        let message = match req.message.as_deref() {
            Some(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(AppError::invalid("Message cannot be empty"));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        // An empty start_date clears it; end_date cannot be cleared.
        let start_date = req.start_date.as_deref().map(parse_datetime).transpose()?;

        let end_date = match req.end_date.as_deref() {
            Some(value) => Some(
                parse_datetime(value)?.ok_or_else(|| AppError::invalid("end_date cannot be null"))?,
            ),
            None => None,
        };

        let id = parse_announcement_id(id)?;

        let changes = AnnouncementChanges {
            message,
            start_date,
            end_date,
            updated_at: Utc::now(),
        };
        if !self.store.update(id, changes).await? {
            return Err(AppError::NotFound);
        }

        let row = self.store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        info!(teacher = %teacher.username, announcement_id = %id, "Announcement updated");
        Ok(row.into())
    }

    pub async fn delete(&self, teacher: &AuthenticatedTeacher, id: &str) -> Result<()> {
        let id = parse_announcement_id(id)?;
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound);
        }
        info!(teacher = %teacher.username, announcement_id = %id, "Announcement deleted");
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await?;
        Ok(())
    }
}
