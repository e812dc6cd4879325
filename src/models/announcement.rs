use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub message: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Announcement {
    /// Visible at `reference`: not yet expired and already started (or no start date).
    pub fn is_active_at(&self, reference: DateTime<Utc>) -> bool {
        self.end_date >= reference && self.start_date.map_or(true, |start| start <= reference)
    }
}

/// Validated fields for a new announcement, timestamps already assigned.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub message: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Set-semantics update. `None` leaves a field untouched; `start_date: Some(None)` clears it.
#[derive(Debug, Clone)]
pub struct AnnouncementChanges {
    pub message: Option<String>,
    pub start_date: Option<Option<DateTime<Utc>>>,
    pub end_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl AnnouncementChanges {
    pub fn apply(&self, announcement: &mut Announcement) {
        if let Some(message) = &self.message {
            announcement.message = message.clone();
        }
        if let Some(start_date) = self.start_date {
            announcement.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            announcement.end_date = end_date;
        }
        announcement.updated_at = self.updated_at;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementFilter {
    All,
    ActiveAt(DateTime<Utc>),
}

impl AnnouncementFilter {
    pub fn matches(&self, announcement: &Announcement) -> bool {
        match self {
            AnnouncementFilter::All => true,
            AnnouncementFilter::ActiveAt(reference) => announcement.is_active_at(*reference),
        }
    }
}

/// Ordering on `end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDateOrder {
    Ascending,
    Descending,
}

/// JSON shape returned by every endpoint that yields announcements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementResponse {
    pub id: String,
    pub message: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Announcement> for AnnouncementResponse {
    fn from(announcement: Announcement) -> Self {
        Self {
            id: announcement.id.to_string(),
            message: announcement.message,
            start_date: announcement.start_date,
            end_date: announcement.end_date,
            created_at: announcement.created_at,
            updated_at: announcement.updated_at,
        }
    }
}

/// Body or query for POST /announcements. Fields stay optional so that the
/// service can report which one is missing.
#[derive(Debug, Default, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub message: Option<String>,
    pub end_date: Option<String>,
    pub start_date: Option<String>,
}

/// Body or query for PUT /announcements/{id}. An empty `start_date` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub message: Option<String>,
    pub end_date: Option<String>,
    pub start_date: Option<String>,
}

impl CreateAnnouncementRequest {
    /// Fields present in `body` take precedence over the query string.
    pub fn overlay(self, body: Option<Self>) -> Self {
        match body {
            Some(body) => Self {
                message: body.message.or(self.message),
                end_date: body.end_date.or(self.end_date),
                start_date: body.start_date.or(self.start_date),
            },
            None => self,
        }
    }
}

impl UpdateAnnouncementRequest {
    pub fn overlay(self, body: Option<Self>) -> Self {
        match body {
            Some(body) => Self {
                message: body.message.or(self.message),
                end_date: body.end_date.or(self.end_date),
                start_date: body.start_date.or(self.start_date),
            },
            None => self,
        }
    }
}

/// Query params for GET /announcements/active.
#[derive(Debug, Default, Deserialize)]
pub struct ActiveAnnouncementsQuery {
    /// Reference instant (ISO 8601). Defaults to the current time.
    pub now: Option<String>,
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 instant. Empty input means "not provided".
///
/// Values without an offset (as sent by `datetime-local` inputs) are taken as UTC.
pub fn parse_datetime(value: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Some(naive.and_utc()));
        }
    }
    if let Some(top_of_hour) = parse_date_hour(value) {
        return Ok(Some(top_of_hour.and_utc()));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(midnight.and_utc()));
    }

    Err(AppError::invalid(format!("Invalid datetime format: {value}")))
}

/// `YYYY-MM-DDTHH`. chrono needs a minute to build a time, so the hour is read by hand.
fn parse_date_hour(value: &str) -> Option<NaiveDateTime> {
    let (date, hour) = value.split_once(['T', ' '])?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    date.and_hms_opt(hour.parse().ok()?, 0, 0)
}

pub fn parse_announcement_id(value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value.trim()).map_err(|_| AppError::invalid("Invalid announcement id"))
}
