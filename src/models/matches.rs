// src/models/matches.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Cancelled)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub round: Option<u32>,
    pub venue: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub status: MatchStatus,
    /// Set once completed; `None` on a draw.
    pub winner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn involves(&self, team_id: Uuid) -> bool {
        self.team_a_id == team_id || self.team_b_id == team_id
    }

    pub fn final_score(&self) -> Option<(u32, u32)> {
        match (self.status, self.score_a, self.score_b) {
            (MatchStatus::Completed, Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

pub fn winner_for(team_a_id: Uuid, team_b_id: Uuid, score_a: u32, score_b: u32) -> Option<Uuid> {
    if score_a > score_b {
        Some(team_a_id)
    } else if score_b > score_a {
        Some(team_b_id)
    } else {
        None
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateMatchRequest {
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub round: Option<u32>,
    pub venue: Option<String>,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateMatchRequest {
    pub round: Option<u32>,
    pub venue: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Highest goal count accepted for one side of a match.
pub const MAX_SCORE: u32 = 999;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoreUpdateRequest {
    pub score_a: u32,
    pub score_b: u32,
    /// `in_progress` for a live score, `completed` for the final result.
    pub status: MatchStatus,
}

#[derive(Debug, Deserialize, Default)]
pub struct MatchQuery {
    pub status: Option<MatchStatus>,
}

/// One row of a tournament table, derived from completed matches.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TeamStanding {
    pub team_id: Uuid,
    pub team_name: String,
    pub position: u32,
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}
