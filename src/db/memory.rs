use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AnnouncementStore, TeacherDirectory};
use crate::models::{
    announcement::{Announcement, AnnouncementChanges, AnnouncementFilter, EndDateOrder, NewAnnouncement},
    teacher::Teacher,
};

/// In-memory announcements and teachers for tests.
#[derive(Default)]
pub struct MemoryStore {
    announcements: RwLock<HashMap<Uuid, Announcement>>,
    teachers: RwLock<HashMap<String, Teacher>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn with_teachers(usernames: &[&str]) -> Self {
        let teachers = usernames
            .iter()
            .map(|username| {
                (
                    username.to_string(),
                    Teacher {
                        username: username.to_string(),
                        display_name: format!("Teacher {username}"),
                    },
                )
            })
            .collect();
        Self {
            teachers: RwLock::new(teachers),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail, as a dropped database connection would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl AnnouncementStore for MemoryStore {
    async fn find(
        &self,
        filter: AnnouncementFilter,
        order: EndDateOrder,
    ) -> anyhow::Result<Vec<Announcement>> {
        self.check()?;
        let mut rows: Vec<Announcement> = self
            .announcements
            .read()
            .await
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        rows.sort_by(|a, b| match order {
            EndDateOrder::Ascending => a.end_date.cmp(&b.end_date).then(a.id.cmp(&b.id)),
            EndDateOrder::Descending => b.end_date.cmp(&a.end_date).then(a.id.cmp(&b.id)),
        });
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Announcement>> {
        self.check()?;
        Ok(self.announcements.read().await.get(&id).cloned())
    }

    async fn insert(&self, announcement: NewAnnouncement) -> anyhow::Result<Announcement> {
        self.check()?;
        let row = Announcement {
            id: Uuid::new_v4(),
            message: announcement.message,
            start_date: announcement.start_date,
            end_date: announcement.end_date,
            created_at: announcement.created_at,
            updated_at: announcement.created_at,
        };
        self.announcements.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: AnnouncementChanges) -> anyhow::Result<bool> {
        self.check()?;
        match self.announcements.write().await.get_mut(&id) {
            Some(row) => {
                changes.apply(row);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        Ok(self.announcements.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.check()
    }
}

#[async_trait]
impl TeacherDirectory for MemoryStore {
    async fn find_teacher(&self, username: &str) -> anyhow::Result<Option<Teacher>> {
        self.check()?;
        Ok(self.teachers.read().await.get(username).cloned())
    }
}
