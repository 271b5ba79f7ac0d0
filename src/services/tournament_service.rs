use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;

use crate::db::InMemoryStore;
use crate::error::AppError;
use crate::models::common::{PaginatedResponse, PaginationQuery};
use crate::models::tournament::{
    validate_max_teams, validate_schedule, validate_tournament_name, CreateTournamentRequest,
    Tournament, TournamentQuery, TournamentStatus, UpdateTournamentRequest,
};
use crate::models::user::{User, UserProfile, UserRole};
use crate::services::permissions::{require_oversight, require_role};

/// Counts of records removed along with a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CascadeSummary {
    pub teams: usize,
    pub matches: usize,
    pub announcements: usize,
}

pub struct TournamentService {
    store: Arc<InMemoryStore>,
}

impl TournamentService {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "Create tournament", skip(self, actor, request), fields(name = %request.name, user = %actor.username))]
    pub async fn create(
        &self,
        actor: &User,
        request: CreateTournamentRequest,
    ) -> Result<Tournament, AppError> {
        require_role(actor, &[UserRole::Admin])?;
        request.validate().map_err(AppError::Validation)?;

        let now = Utc::now();
        let tournament = Tournament {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            description: request.description,
            sport: request.sport,
            venue: request.venue,
            format: request.format,
            status: if request.open_registration {
                TournamentStatus::RegistrationOpen
            } else {
                TournamentStatus::Draft
            },
            start_date: request.start_date,
            end_date: request.end_date,
            registration_deadline: request.registration_deadline,
            max_teams: request.max_teams,
            team_count: 0,
            rules: request.rules.into_iter().map(|r| r.trim().to_string()).collect(),
            created_by: actor.id,
            created_at: now,
            updated_at: now,
        };

        self.store
            .write(|db| db.tournaments.insert(tournament.clone()))
            .await?;
        tracing::info!("Created tournament {} ({})", tournament.id, tournament.status);
        Ok(tournament)
    }

    pub async fn get(&self, id: Uuid) -> Result<Tournament, AppError> {
        self.store
            .read(|db| db.tournaments.require(id).cloned())
            .await
    }

    /// Tournaments ordered by start date, optionally filtered by status and name.
    pub async fn list(&self, query: &TournamentQuery) -> PaginatedResponse<Tournament> {
        let search = query.search.as_ref().map(|s| s.trim().to_lowercase());
        let mut tournaments: Vec<Tournament> = self
            .store
            .read(|db| {
                db.tournaments
                    .filter(|t| query.status.map_or(true, |status| t.status == status))
                    .filter(|t| {
                        search
                            .as_ref()
                            .map_or(true, |s| t.name.to_lowercase().contains(s.as_str()))
                    })
                    .cloned()
                    .collect()
            })
            .await;
        tournaments.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.name.cmp(&b.name)));

        let pagination = PaginationQuery { page: query.page, limit: query.limit };
        PaginatedResponse::paginate(tournaments, &pagination)
    }

    /// Tournaments a management user oversees; every tournament for an admin.
    pub async fn assigned_to(&self, actor: &User) -> Result<Vec<Tournament>, AppError> {
        require_role(actor, &[UserRole::Admin, UserRole::Management])?;
        let mut tournaments: Vec<Tournament> = self
            .store
            .read(|db| match &actor.profile {
                UserProfile::Management { assigned_tournaments } => assigned_tournaments
                    .iter()
                    .filter_map(|id| db.tournaments.get(*id).cloned())
                    .collect(),
                _ => db.tournaments.iter().cloned().collect(),
            })
            .await;
        tournaments.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(tournaments)
    }

    #[tracing::instrument(name = "Update tournament", skip(self, actor, patch), fields(user = %actor.username))]
    pub async fn update(
        &self,
        actor: &User,
        id: Uuid,
        patch: UpdateTournamentRequest,
    ) -> Result<Tournament, AppError> {
        require_oversight(actor, id)?;

        self.store
            .write(|db| {
                let current = db.tournaments.require(id)?;
                if current.status.is_terminal() {
                    return Err(AppError::conflict(format!(
                        "Tournament is {} and can no longer be edited",
                        current.status
                    )));
                }

                let mut updated = current.clone();
                if let Some(name) = patch.name {
                    validate_tournament_name(&name).map_err(AppError::Validation)?;
                    updated.name = name.trim().to_string();
                }
                if let Some(description) = patch.description {
                    updated.description = Some(description);
                }
                if let Some(sport) = patch.sport {
                    updated.sport = Some(sport);
                }
                if let Some(venue) = patch.venue {
                    updated.venue = Some(venue);
                }
                if let Some(format) = patch.format {
                    updated.format = format;
                }
                if let Some(start_date) = patch.start_date {
                    updated.start_date = start_date;
                }
                if let Some(end_date) = patch.end_date {
                    updated.end_date = end_date;
                }
                if let Some(deadline) = patch.registration_deadline {
                    updated.registration_deadline = deadline;
                }
                if let Some(rules) = patch.rules {
                    updated.rules = rules.into_iter().map(|r| r.trim().to_string()).collect();
                }
                if let Some(max_teams) = patch.max_teams {
                    validate_max_teams(max_teams).map_err(AppError::Validation)?;
                    if max_teams < updated.team_count {
                        return Err(AppError::conflict(format!(
                            "max_teams cannot be lower than the {} teams already approved",
                            updated.team_count
                        )));
                    }
                    updated.max_teams = max_teams;
                }
                validate_schedule(updated.start_date, updated.end_date, updated.registration_deadline)
                    .map_err(AppError::Validation)?;

                updated.updated_at = Utc::now();
                *db.tournaments.require_mut(id)? = updated.clone();
                Ok(updated)
            })
            .await
    }

    #[tracing::instrument(name = "Change tournament status", skip(self, actor), fields(user = %actor.username))]
    pub async fn change_status(
        &self,
        actor: &User,
        id: Uuid,
        status: TournamentStatus,
    ) -> Result<Tournament, AppError> {
        require_oversight(actor, id)?;

        self.store
            .write(|db| {
                let tournament = db.tournaments.require_mut(id)?;
                if tournament.status == status {
                    return Ok(tournament.clone());
                }
                if !tournament.status.can_transition_to(status) {
                    tracing::warn!("Rejected status change {} -> {} for tournament {}", tournament.status, status, id);
                    return Err(AppError::conflict(format!(
                        "Cannot move tournament from {} to {}",
                        tournament.status, status
                    )));
                }
                tracing::info!("Tournament {} moved from {} to {}", id, tournament.status, status);
                tournament.status = status;
                tournament.updated_at = Utc::now();
                Ok(tournament.clone())
            })
            .await
    }

    /// Delete a tournament together with everything that references it.
    #[tracing::instrument(name = "Delete tournament", skip(self, actor), fields(user = %actor.username))]
    pub async fn delete(&self, actor: &User, id: Uuid) -> Result<CascadeSummary, AppError> {
        require_role(actor, &[UserRole::Admin])?;

        let summary = self
            .store
            .write(|db| {
                db.tournaments.require(id)?;

                let team_ids: Vec<Uuid> = db.teams_in(id).map(|team| team.id).collect();
                let summary = CascadeSummary {
                    teams: db.teams.remove_where(|team| team.tournament_id == id),
                    matches: db.matches.remove_where(|game| game.tournament_id == id),
                    announcements: db
                        .announcements
                        .remove_where(|a| a.tournament_id == Some(id)),
                };

                for user in db.users.iter_mut() {
                    match &mut user.profile {
                        UserProfile::Management { assigned_tournaments } => {
                            assigned_tournaments.retain(|t| *t != id);
                        }
                        UserProfile::Captain { team_ids: captain_teams } => {
                            captain_teams.retain(|t| !team_ids.contains(t));
                        }
                        _ => {}
                    }
                }

                db.tournaments.remove(id);
                Ok::<_, AppError>(summary)
            })
            .await?;

        tracing::info!("Deleted tournament {} with {:?}", id, summary);
        Ok(summary)
    }
}
