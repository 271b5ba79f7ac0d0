// src/models/team.rs
use std::collections::HashSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    Pending,
    Approved,
    Rejected,
    Eliminated,
}

impl TeamStatus {
    /// Admitted teams occupy a tournament slot.
    pub fn is_admitted(&self) -> bool {
        matches!(self, TeamStatus::Approved | TeamStatus::Eliminated)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub jersey_number: Option<u16>,
    pub position: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub tournament_id: Uuid,
    pub captain_id: Uuid,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub players: Vec<Player>,
    pub status: TeamStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to register a new team
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterTeamRequest {
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
}

/// Request to update team information
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub players: Option<Vec<Player>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TeamQuery {
    pub status: Option<TeamStatus>,
}

pub const MAX_PLAYERS: usize = 30;

pub fn validate_team_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Team name cannot be empty".to_string());
    }

    if name.len() < 2 {
        return Err("Team name must be at least 2 characters".to_string());
    }

    if name.len() > 50 {
        return Err("Team name cannot exceed 50 characters".to_string());
    }

    if !name.chars().any(|c| c.is_alphanumeric()) {
        return Err("Team name must contain at least one letter or number".to_string());
    }

    Ok(())
}

pub fn validate_players(players: &[Player]) -> Result<(), String> {
    if players.len() > MAX_PLAYERS {
        return Err(format!("A team cannot have more than {} players", MAX_PLAYERS));
    }

    let mut numbers = HashSet::new();
    for player in players {
        if player.name.trim().is_empty() {
            return Err("Player name cannot be empty".to_string());
        }
        if let Some(number) = player.jersey_number {
            if !numbers.insert(number) {
                return Err(format!("Jersey number {} is used twice", number));
            }
        }
    }

    Ok(())
}

impl RegisterTeamRequest {
    /// Validate team registration request
    pub fn validate(&self) -> Result<(), String> {
        validate_team_name(&self.name)?;
        validate_players(&self.players)?;
        if let Some(email) = &self.contact_email {
            crate::models::user::validate_email(email)?;
        }
        Ok(())
    }

    /// Trimmed team name with inner whitespace collapsed
    pub fn get_sanitized_name(&self) -> String {
        sanitize_team_name(&self.name)
    }
}

impl UpdateTeamRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_team_name(name)?;
        }
        if let Some(players) = &self.players {
            validate_players(players)?;
        }
        if let Some(email) = &self.contact_email {
            crate::models::user::validate_email(email)?;
        }
        Ok(())
    }
}

pub fn sanitize_team_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
