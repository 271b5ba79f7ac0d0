use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Announcement {
    pub id: Uuid,
    /// `None` for announcements addressed to every participant.
    pub tournament_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub priority: AnnouncementPriority,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateAnnouncementRequest {
    pub tournament_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub priority: AnnouncementPriority,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub priority: Option<AnnouncementPriority>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AnnouncementQuery {
    pub tournament_id: Option<Uuid>,
    pub priority: Option<AnnouncementPriority>,
}

pub fn validate_title(title: &str) -> Result<(), String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Announcement title cannot be empty".to_string());
    }
    if title.len() > 200 {
        return Err("Announcement title cannot exceed 200 characters".to_string());
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Announcement content cannot be empty".to_string());
    }
    if content.len() > 5000 {
        return Err("Announcement content cannot exceed 5000 characters".to_string());
    }
    Ok(())
}

impl CreateAnnouncementRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_title(&self.title)?;
        validate_content(&self.content)
    }
}

impl UpdateAnnouncementRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}
