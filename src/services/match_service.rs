use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;

use crate::db::InMemoryStore;
use crate::error::AppError;
use crate::models::matches::{
    winner_for, CreateMatchRequest, Match, MatchStatus, ScoreUpdateRequest, TeamStanding, MAX_SCORE,
    UpdateMatchRequest,
};
use crate::models::team::{Team, TeamStatus};
use crate::models::user::User;
use crate::services::permissions::require_oversight;
use crate::standings::compute_standings;

/// Service for managing the matches of a tournament
pub struct MatchService {
    store: Arc<InMemoryStore>,
}

impl MatchService {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "Create match", skip(self, actor, request), fields(user = %actor.username))]
    pub async fn create(
        &self,
        actor: &User,
        tournament_id: Uuid,
        request: CreateMatchRequest,
    ) -> Result<Match, AppError> {
        require_oversight(actor, tournament_id)?;
        if request.team_a_id == request.team_b_id {
            return Err(AppError::validation("A team cannot play against itself"));
        }

        let game = self
            .store
            .write(|db| {
                let tournament = db.tournaments.require(tournament_id)?;
                if !tournament.status.allows_matches() {
                    return Err(AppError::conflict(format!(
                        "Matches cannot be scheduled while the tournament is {}",
                        tournament.status
                    )));
                }
                for team_id in [request.team_a_id, request.team_b_id] {
                    let team = db.teams.require(team_id)?;
                    if team.tournament_id != tournament_id {
                        return Err(AppError::validation(format!(
                            "Team {} does not belong to this tournament",
                            team.name
                        )));
                    }
                    if team.status != TeamStatus::Approved {
                        return Err(AppError::conflict(format!("Team {} is not approved", team.name)));
                    }
                }

                let now = Utc::now();
                let game = Match {
                    id: Uuid::new_v4(),
                    tournament_id,
                    team_a_id: request.team_a_id,
                    team_b_id: request.team_b_id,
                    round: request.round,
                    venue: request.venue,
                    scheduled_at: request.scheduled_at,
                    score_a: None,
                    score_b: None,
                    status: MatchStatus::Scheduled,
                    winner_id: None,
                    created_at: now,
                    updated_at: now,
                };
                db.matches.insert(game.clone())?;
                Ok(game)
            })
            .await?;

        tracing::info!("🎮 Scheduled match {} in tournament {}", game.id, tournament_id);
        Ok(game)
    }

    pub async fn get(&self, id: Uuid) -> Result<Match, AppError> {
        self.store.read(|db| db.matches.require(id).cloned()).await
    }

    pub async fn list_for_tournament(
        &self,
        tournament_id: Uuid,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Match>, AppError> {
        let mut matches = self
            .store
            .read(|db| {
                db.tournaments.require(tournament_id)?;
                Ok::<_, AppError>(
                    db.matches_in(tournament_id)
                        .filter(|game| status.map_or(true, |s| game.status == s))
                        .cloned()
                        .collect::<Vec<_>>(),
                )
            })
            .await?;
        matches.sort_by_key(|game| game.scheduled_at);
        Ok(matches)
    }

    pub async fn list_for_team(&self, team_id: Uuid) -> Result<Vec<Match>, AppError> {
        let mut matches = self
            .store
            .read(|db| {
                db.teams.require(team_id)?;
                Ok::<_, AppError>(
                    db.matches
                        .filter(move |game| game.involves(team_id))
                        .cloned()
                        .collect::<Vec<_>>(),
                )
            })
            .await?;
        matches.sort_by_key(|game| game.scheduled_at);
        Ok(matches)
    }

    /// Reschedule a match that has not finished.
    #[tracing::instrument(name = "Update match", skip(self, actor, patch), fields(user = %actor.username))]
    pub async fn update(
        &self,
        actor: &User,
        id: Uuid,
        patch: UpdateMatchRequest,
    ) -> Result<Match, AppError> {
        self.store
            .write(|db| {
                let game = db.matches.require_mut(id)?;
                require_oversight(actor, game.tournament_id)?;
                if game.status.is_terminal() {
                    return Err(AppError::conflict("A finished or cancelled match cannot be rescheduled"));
                }
                if let Some(round) = patch.round {
                    game.round = Some(round);
                }
                if let Some(venue) = patch.venue {
                    game.venue = Some(venue);
                }
                if let Some(scheduled_at) = patch.scheduled_at {
                    game.scheduled_at = scheduled_at;
                }
                game.updated_at = Utc::now();
                Ok(game.clone())
            })
            .await
    }

    /// Record a live or final score.
    ///
    /// Submitting the same final score again returns the stored match untouched.
    /// A different final score on a completed match is treated as a correction.
    #[tracing::instrument(name = "Update match score", skip(self, actor, request), fields(user = %actor.username))]
    pub async fn update_score(
        &self,
        actor: &User,
        id: Uuid,
        request: ScoreUpdateRequest,
    ) -> Result<Match, AppError> {
        if !matches!(request.status, MatchStatus::InProgress | MatchStatus::Completed) {
            return Err(AppError::validation("Score updates must set status to in_progress or completed"));
        }
        if request.score_a > MAX_SCORE || request.score_b > MAX_SCORE {
            return Err(AppError::validation(format!("Scores cannot exceed {}", MAX_SCORE)));
        }

        self.store
            .write(|db| {
                let game = db.matches.require_mut(id)?;
                require_oversight(actor, game.tournament_id)?;

                match (game.status, request.status) {
                    (MatchStatus::Cancelled, _) => {
                        return Err(AppError::conflict("A cancelled match cannot be scored"));
                    }
                    (MatchStatus::Completed, MatchStatus::InProgress) => {
                        return Err(AppError::conflict("A completed match cannot go back in progress"));
                    }
                    (MatchStatus::Completed, MatchStatus::Completed)
                        if game.score_a == Some(request.score_a) && game.score_b == Some(request.score_b) =>
                    {
                        tracing::info!("Match {} already completed with this score", id);
                        return Ok(game.clone());
                    }
                    (MatchStatus::Completed, MatchStatus::Completed) => {
                        tracing::warn!(
                            "Correcting final score of match {} from {:?}-{:?} to {}-{}",
                            id, game.score_a, game.score_b, request.score_a, request.score_b
                        );
                    }
                    _ => {}
                }

                game.score_a = Some(request.score_a);
                game.score_b = Some(request.score_b);
                game.status = request.status;
                game.winner_id = match request.status {
                    MatchStatus::Completed => {
                        winner_for(game.team_a_id, game.team_b_id, request.score_a, request.score_b)
                    }
                    _ => None,
                };
                game.updated_at = Utc::now();
                if game.status == MatchStatus::Completed {
                    tracing::info!("🏁 Match {} finished {}-{}", id, request.score_a, request.score_b);
                }
                Ok(game.clone())
            })
            .await
    }

    #[tracing::instrument(name = "Cancel match", skip(self, actor), fields(user = %actor.username))]
    pub async fn cancel(&self, actor: &User, id: Uuid) -> Result<Match, AppError> {
        self.store
            .write(|db| {
                let game = db.matches.require_mut(id)?;
                require_oversight(actor, game.tournament_id)?;
                match game.status {
                    MatchStatus::Completed => Err(AppError::conflict("A completed match cannot be cancelled")),
                    MatchStatus::Cancelled => Ok(game.clone()),
                    MatchStatus::Scheduled | MatchStatus::InProgress => {
                        game.status = MatchStatus::Cancelled;
                        game.winner_id = None;
                        game.updated_at = Utc::now();
                        tracing::info!("Cancelled match {}", id);
                        Ok(game.clone())
                    }
                }
            })
            .await
    }

    #[tracing::instrument(name = "Delete match", skip(self, actor), fields(user = %actor.username))]
    pub async fn delete(&self, actor: &User, id: Uuid) -> Result<(), AppError> {
        self.store
            .write(|db| {
                let game = db.matches.require(id)?;
                require_oversight(actor, game.tournament_id)?;
                db.matches.remove(id);
                tracing::info!("Deleted match {}", id);
                Ok(())
            })
            .await
    }

    /// Current table of a tournament, derived from its completed matches.
    pub async fn standings(&self, tournament_id: Uuid) -> Result<Vec<TeamStanding>, AppError> {
        let (teams, matches) = self
            .store
            .read(|db| {
                db.tournaments.require(tournament_id)?;
                let teams: Vec<Team> = db.teams_in(tournament_id).cloned().collect();
                let matches: Vec<Match> = db.matches_in(tournament_id).cloned().collect();
                Ok::<_, AppError>((teams, matches))
            })
            .await?;
        Ok(compute_standings(&teams, &matches))
    }
}
