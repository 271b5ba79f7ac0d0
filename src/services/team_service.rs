use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;

use crate::db::{Collections, InMemoryStore};
use crate::error::AppError;
use crate::models::team::{
    sanitize_team_name, RegisterTeamRequest, Team, TeamStatus, UpdateTeamRequest,
};
use crate::models::user::{User, UserProfile, UserRole};
use crate::services::permissions::{require_oversight, require_role};

pub struct TeamService {
    store: Arc<InMemoryStore>,
}

/// Case-insensitive name clash with another team of the same tournament.
fn name_taken(db: &Collections, tournament_id: Uuid, name: &str, except: Option<Uuid>) -> bool {
    let name = name.to_lowercase();
    db.teams_in(tournament_id)
        .any(|team| Some(team.id) != except && team.name.to_lowercase() == name)
}

/// Keep the tournament's slot counter equal to its admitted teams.
fn sync_team_count(db: &mut Collections, tournament_id: Uuid) {
    let count = db.admitted_team_count(tournament_id);
    if let Some(tournament) = db.tournaments.get_mut(tournament_id) {
        tournament.team_count = count;
        tournament.updated_at = Utc::now();
    }
}

impl TeamService {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    /// Register a new team
    #[tracing::instrument(
        name = "Register team",
        skip(self, actor, request),
        fields(team_name = %request.name, user = %actor.username)
    )]
    pub async fn register(
        &self,
        actor: &User,
        tournament_id: Uuid,
        request: RegisterTeamRequest,
    ) -> Result<Team, AppError> {
        require_role(actor, &[UserRole::Captain])?;
        if let Err(validation_error) = request.validate() {
            tracing::warn!("Team registration validation failed: {}", validation_error);
            return Err(AppError::Validation(validation_error));
        }

        let name = request.get_sanitized_name();
        let team = self
            .store
            .write(|db| {
                let tournament = db.tournaments.require(tournament_id)?;
                if !tournament.accepts_registrations_at(Utc::now()) {
                    return Err(AppError::conflict("Tournament is not open for registration"));
                }
                if db
                    .teams_in(tournament_id)
                    .any(|team| team.captain_id == actor.id)
                {
                    return Err(AppError::conflict("You already registered a team for this tournament"));
                }
                if name_taken(db, tournament_id, &name, None) {
                    return Err(AppError::conflict("Team name already taken"));
                }

                let now = Utc::now();
                let team = Team {
                    id: Uuid::new_v4(),
                    name,
                    tournament_id,
                    captain_id: actor.id,
                    contact_email: request.contact_email,
                    contact_phone: request.contact_phone,
                    players: request.players,
                    status: TeamStatus::Pending,
                    created_at: now,
                    updated_at: now,
                };

                let captain = db.users.require_mut(actor.id)?;
                if let UserProfile::Captain { team_ids } = &mut captain.profile {
                    team_ids.push(team.id);
                }
                db.teams.insert(team.clone())?;
                Ok(team)
            })
            .await?;

        tracing::info!("Successfully registered team '{}' with ID: {}", team.name, team.id);
        Ok(team)
    }

    pub async fn get(&self, id: Uuid) -> Result<Team, AppError> {
        self.store.read(|db| db.teams.require(id).cloned()).await
    }

    pub async fn list_for_tournament(
        &self,
        tournament_id: Uuid,
        status: Option<TeamStatus>,
    ) -> Result<Vec<Team>, AppError> {
        let mut teams = self
            .store
            .read(|db| {
                db.tournaments.require(tournament_id)?;
                Ok::<_, AppError>(
                    db.teams_in(tournament_id)
                        .filter(|team| status.map_or(true, |s| team.status == s))
                        .cloned()
                        .collect::<Vec<_>>(),
                )
            })
            .await?;
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(teams)
    }

    pub async fn list_for_captain(&self, actor: &User) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .store
            .read(|db| db.teams.filter(|team| team.captain_id == actor.id).cloned().collect())
            .await;
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        teams
    }

    /// Captains edit their own team while it is pending; overseers at any time.
    #[tracing::instrument(name = "Update team", skip(self, actor, patch), fields(user = %actor.username))]
    pub async fn update(
        &self,
        actor: &User,
        id: Uuid,
        patch: UpdateTeamRequest,
    ) -> Result<Team, AppError> {
        patch.validate().map_err(AppError::Validation)?;

        self.store
            .write(|db| {
                let team = db.teams.require(id)?;
                if !actor.oversees(team.tournament_id) {
                    if team.captain_id != actor.id {
                        return Err(AppError::forbidden("You cannot edit this team"));
                    }
                    if team.status != TeamStatus::Pending {
                        return Err(AppError::conflict("Team can only be edited while pending"));
                    }
                }

                let tournament_id = team.tournament_id;
                let name = patch.name.as_deref().map(sanitize_team_name);
                if let Some(name) = &name {
                    if name_taken(db, tournament_id, name, Some(id)) {
                        return Err(AppError::conflict("Team name already taken"));
                    }
                }

                let team = db.teams.require_mut(id)?;
                if let Some(name) = name {
                    team.name = name;
                }
                if let Some(email) = patch.contact_email {
                    team.contact_email = Some(email);
                }
                if let Some(phone) = patch.contact_phone {
                    team.contact_phone = Some(phone);
                }
                if let Some(players) = patch.players {
                    team.players = players;
                }
                team.updated_at = Utc::now();
                Ok(team.clone())
            })
            .await
    }

    /// Admit a team, taking one of the tournament's slots.
    #[tracing::instrument(name = "Approve team", skip(self, actor), fields(user = %actor.username))]
    pub async fn approve(&self, actor: &User, id: Uuid) -> Result<Team, AppError> {
        self.store
            .write(|db| {
                let team = db.teams.require(id)?;
                let tournament_id = team.tournament_id;
                require_oversight(actor, tournament_id)?;

                match team.status {
                    TeamStatus::Pending | TeamStatus::Rejected => {}
                    TeamStatus::Approved | TeamStatus::Eliminated => {
                        return Err(AppError::conflict("Team is already approved"));
                    }
                }

                let tournament = db.tournaments.require(tournament_id)?;
                if tournament.status.is_terminal() {
                    return Err(AppError::conflict(format!("Tournament is {}", tournament.status)));
                }
                if !tournament.has_free_slot() {
                    tracing::warn!("Tournament {} is full, cannot approve team {}", tournament_id, id);
                    return Err(AppError::conflict(format!(
                        "Tournament is full ({} teams)",
                        tournament.max_teams
                    )));
                }

                let team = db.teams.require_mut(id)?;
                team.status = TeamStatus::Approved;
                team.updated_at = Utc::now();
                let team = team.clone();
                sync_team_count(db, tournament_id);
                tracing::info!("Approved team {} for tournament {}", id, tournament_id);
                Ok(team)
            })
            .await
    }

    /// Reject a team; an approved team gives its slot back.
    #[tracing::instrument(name = "Reject team", skip(self, actor), fields(user = %actor.username))]
    pub async fn reject(&self, actor: &User, id: Uuid) -> Result<Team, AppError> {
        self.transition(actor, id, TeamStatus::Rejected, &[TeamStatus::Pending, TeamStatus::Approved])
            .await
    }

    #[tracing::instrument(name = "Eliminate team", skip(self, actor), fields(user = %actor.username))]
    pub async fn eliminate(&self, actor: &User, id: Uuid) -> Result<Team, AppError> {
        self.transition(actor, id, TeamStatus::Eliminated, &[TeamStatus::Approved])
            .await
    }

    async fn transition(
        &self,
        actor: &User,
        id: Uuid,
        next: TeamStatus,
        allowed_from: &[TeamStatus],
    ) -> Result<Team, AppError> {
        self.store
            .write(|db| {
                let team = db.teams.require_mut(id)?;
                let tournament_id = team.tournament_id;
                require_oversight(actor, tournament_id)?;
                if !allowed_from.contains(&team.status) {
                    return Err(AppError::conflict(format!(
                        "Cannot move team from {:?} to {:?}",
                        team.status, next
                    )));
                }
                team.status = next;
                team.updated_at = Utc::now();
                let team = team.clone();
                sync_team_count(db, tournament_id);
                tracing::info!("Team {} is now {:?}", id, next);
                Ok(team)
            })
            .await
    }

    /// Overseers delete any team without matches; captains may withdraw a
    /// team that has not been admitted.
    #[tracing::instrument(name = "Delete team", skip(self, actor), fields(user = %actor.username))]
    pub async fn delete(&self, actor: &User, id: Uuid) -> Result<(), AppError> {
        self.store
            .write(|db| {
                let team = db.teams.require(id)?;
                let tournament_id = team.tournament_id;
                let captain_id = team.captain_id;
                if !actor.oversees(tournament_id) {
                    if team.captain_id != actor.id {
                        return Err(AppError::forbidden("You cannot delete this team"));
                    }
                    if team.status.is_admitted() {
                        return Err(AppError::conflict("An admitted team can only be removed by the organisers"));
                    }
                }
                if db.matches.iter().any(|game| game.involves(id)) {
                    return Err(AppError::conflict("Team has matches and cannot be deleted"));
                }

                db.teams.remove(id);
                if let Some(captain) = db.users.get_mut(captain_id) {
                    if let UserProfile::Captain { team_ids } = &mut captain.profile {
                        team_ids.retain(|t| *t != id);
                    }
                }
                sync_team_count(db, tournament_id);
                tracing::info!("Deleted team {} from tournament {}", id, tournament_id);
                Ok(())
            })
            .await
    }
}
