use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;

use crate::db::InMemoryStore;
use crate::error::AppError;
use crate::models::announcement::{
    Announcement, AnnouncementQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::models::user::{User, UserRole};
use crate::services::permissions::{require_oversight, require_role};

/// Tournament announcements belong to their overseers, global ones to admins.
fn require_author_rights(actor: &User, tournament_id: Option<Uuid>) -> Result<(), AppError> {
    match tournament_id {
        Some(id) => require_oversight(actor, id),
        None => require_role(actor, &[UserRole::Admin]),
    }
}

pub struct AnnouncementService {
    store: Arc<InMemoryStore>,
}

impl AnnouncementService {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "Create announcement", skip(self, actor, request), fields(user = %actor.username))]
    pub async fn create(
        &self,
        actor: &User,
        request: CreateAnnouncementRequest,
    ) -> Result<Announcement, AppError> {
        require_author_rights(actor, request.tournament_id)?;
        request.validate().map_err(AppError::Validation)?;

        let now = Utc::now();
        let announcement = Announcement {
            id: Uuid::new_v4(),
            tournament_id: request.tournament_id,
            title: request.title.trim().to_string(),
            content: request.content,
            priority: request.priority,
            author_id: actor.id,
            created_at: now,
            updated_at: now,
        };

        self.store
            .write(|db| {
                if let Some(tournament_id) = announcement.tournament_id {
                    db.tournaments.require(tournament_id)?;
                }
                db.announcements.insert(announcement.clone())
            })
            .await?;

        tracing::info!(
            "📢 Published {:?} announcement {} ({})",
            announcement.priority,
            announcement.id,
            announcement.tournament_id.map_or("global".to_string(), |id| id.to_string())
        );
        Ok(announcement)
    }

    pub async fn get(&self, id: Uuid) -> Result<Announcement, AppError> {
        self.store.read(|db| db.announcements.require(id).cloned()).await
    }

    /// Newest first. A tournament's feed also carries every global announcement.
    pub async fn list(&self, query: &AnnouncementQuery) -> Result<Vec<Announcement>, AppError> {
        let mut announcements = self
            .store
            .read(|db| {
                if let Some(tournament_id) = query.tournament_id {
                    db.tournaments.require(tournament_id)?;
                }
                Ok::<_, AppError>(
                    db.announcements
                        .filter(|a| match query.tournament_id {
                            Some(id) => a.tournament_id.is_none() || a.tournament_id == Some(id),
                            None => true,
                        })
                        .filter(|a| query.priority.map_or(true, |p| a.priority == p))
                        .cloned()
                        .collect::<Vec<_>>(),
                )
            })
            .await?;
        announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(announcements)
    }

    #[tracing::instrument(name = "Update announcement", skip(self, actor, patch), fields(user = %actor.username))]
    pub async fn update(
        &self,
        actor: &User,
        id: Uuid,
        patch: UpdateAnnouncementRequest,
    ) -> Result<Announcement, AppError> {
        patch.validate().map_err(AppError::Validation)?;

        self.store
            .write(|db| {
                let announcement = db.announcements.require_mut(id)?;
                require_author_rights(actor, announcement.tournament_id)?;
                if let Some(title) = patch.title {
                    announcement.title = title.trim().to_string();
                }
                if let Some(content) = patch.content {
                    announcement.content = content;
                }
                if let Some(priority) = patch.priority {
                    announcement.priority = priority;
                }
                announcement.updated_at = Utc::now();
                Ok(announcement.clone())
            })
            .await
    }

    #[tracing::instrument(name = "Delete announcement", skip(self, actor), fields(user = %actor.username))]
    pub async fn delete(&self, actor: &User, id: Uuid) -> Result<(), AppError> {
        self.store
            .write(|db| {
                let announcement = db.announcements.require(id)?;
                require_author_rights(actor, announcement.tournament_id)?;
                db.announcements.remove(id);
                tracing::info!("Deleted announcement {}", id);
                Ok(())
            })
            .await
    }
}
