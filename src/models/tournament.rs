// src/models/tournament.rs
use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label only; the format has no effect on how teams or matches are stored.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    Knockout,
    League,
    GroupKnockout,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    Draft,
    RegistrationOpen,
    InProgress,
    Completed,
    Cancelled,
}

impl TournamentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TournamentStatus::Completed | TournamentStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: TournamentStatus) -> bool {
        use TournamentStatus::*;
        match (self, next) {
            (Draft, RegistrationOpen) | (Draft, Cancelled) => true,
            (RegistrationOpen, Draft)
            | (RegistrationOpen, InProgress)
            | (RegistrationOpen, Cancelled) => true,
            (InProgress, Completed) | (InProgress, Cancelled) => true,
            _ => false,
        }
    }

    /// Matches can only be arranged once registration has opened and before the end.
    pub fn allows_matches(&self) -> bool {
        matches!(self, TournamentStatus::RegistrationOpen | TournamentStatus::InProgress)
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TournamentStatus::Draft => "DRAFT",
            TournamentStatus::RegistrationOpen => "REGISTRATION_OPEN",
            TournamentStatus::InProgress => "IN_PROGRESS",
            TournamentStatus::Completed => "COMPLETED",
            TournamentStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sport: Option<String>,
    pub venue: Option<String>,
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub max_teams: u32,
    /// Number of admitted (approved or eliminated) teams.
    pub team_count: u32,
    pub rules: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    pub fn has_free_slot(&self) -> bool {
        self.team_count < self.max_teams
    }

    /// Registration is open by status and, if a deadline is set, not past it.
    pub fn accepts_registrations_at(&self, now: DateTime<Utc>) -> bool {
        self.status == TournamentStatus::RegistrationOpen
            && self.registration_deadline.map_or(true, |deadline| now <= deadline)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateTournamentRequest {
    pub name: String,
    pub description: Option<String>,
    pub sport: Option<String>,
    pub venue: Option<String>,
    pub format: TournamentFormat,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub max_teams: u32,
    #[serde(default)]
    pub rules: Vec<String>,
    /// Create straight into `REGISTRATION_OPEN` instead of `DRAFT`.
    #[serde(default)]
    pub open_registration: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateTournamentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sport: Option<String>,
    pub venue: Option<String>,
    pub format: Option<TournamentFormat>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Absent leaves the deadline alone; `null` removes it.
    #[serde(default, deserialize_with = "deserialize_nullable", skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<Option<DateTime<Utc>>>,
    pub max_teams: Option<u32>,
    pub rules: Option<Vec<String>>,
}

fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChangeStatusRequest {
    pub status: TournamentStatus,
}

#[derive(Debug, Deserialize, Default)]
pub struct TournamentQuery {
    pub status: Option<TournamentStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub const MIN_TEAMS: u32 = 2;
pub const MAX_TEAMS: u32 = 256;

pub fn validate_tournament_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Tournament name cannot be empty".to_string());
    }
    if trimmed.len() > 255 {
        return Err("Tournament name too long (maximum 255 characters)".to_string());
    }
    if !trimmed.chars().any(|c| c.is_alphanumeric()) {
        return Err("Tournament name must contain alphanumeric characters".to_string());
    }
    Ok(())
}

pub fn validate_schedule(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    registration_deadline: Option<DateTime<Utc>>,
) -> Result<(), String> {
    if end_date < start_date {
        return Err("End date cannot be before start date".to_string());
    }
    if let Some(deadline) = registration_deadline {
        if deadline > start_date {
            return Err("Registration deadline cannot be after the start date".to_string());
        }
    }
    Ok(())
}

pub fn validate_max_teams(max_teams: u32) -> Result<(), String> {
    if max_teams < MIN_TEAMS {
        return Err(format!("A tournament needs room for at least {} teams", MIN_TEAMS));
    }
    if max_teams > MAX_TEAMS {
        return Err(format!("Maximum {} teams allowed, got {}", MAX_TEAMS, max_teams));
    }
    Ok(())
}

impl CreateTournamentRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_tournament_name(&self.name)?;
        validate_schedule(self.start_date, self.end_date, self.registration_deadline)?;
        validate_max_teams(self.max_teams)?;
        if self.rules.iter().any(|rule| rule.trim().is_empty()) {
            return Err("Rules cannot be empty".to_string());
        }
        Ok(())
    }
}
