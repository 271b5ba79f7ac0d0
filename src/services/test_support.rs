use std::sync::Arc;
use chrono::{Duration, Utc};
use secrecy::SecretString;
use uuid::Uuid;

use crate::config::jwt::JwtSettings;
use crate::db::InMemoryStore;
use crate::models::announcement::{Announcement, AnnouncementPriority, CreateAnnouncementRequest};
use crate::models::matches::{CreateMatchRequest, Match};
use crate::models::team::{RegisterTeamRequest, Team};
use crate::models::tournament::{CreateTournamentRequest, Tournament, TournamentFormat};
use crate::models::user::{User, UserProfile};
use crate::services::{
    AnnouncementService, AuthService, MatchService, TeamService, TournamentService, UserService,
};

pub fn secret(value: &str) -> SecretString {
    SecretString::new(value.to_string().into_boxed_str())
}

/// Every service wired to one fresh store.
pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub auth: AuthService,
    pub users: UserService,
    pub tournaments: TournamentService,
    pub teams: TeamService,
    pub matches: MatchService,
    pub announcements: AnnouncementService,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let jwt_settings = Arc::new(JwtSettings::new("test-secret".to_string(), 1));
        Self {
            auth: AuthService::new(store.clone(), jwt_settings, 4),
            users: UserService::new(store.clone(), 4),
            tournaments: TournamentService::new(store.clone()),
            teams: TeamService::new(store.clone()),
            matches: MatchService::new(store.clone()),
            announcements: AnnouncementService::new(store.clone()),
            store,
        }
    }

    /// Insert a user directly, skipping sign-up and password hashing.
    pub async fn user(&self, profile: UserProfile) -> User {
        let tag = Uuid::new_v4().simple().to_string();
        let user = User::new(
            format!("user_{}", &tag[..8]),
            format!("{}@example.com", tag),
            "not-a-real-hash".to_string(),
            None,
            profile,
        );
        self.store
            .write(|db| db.users.insert(user.clone()))
            .await
            .unwrap();
        user
    }

    /// A tournament open for registration, starting in a month.
    pub async fn tournament(&self, admin: &User, max_teams: u32) -> Tournament {
        let start = Utc::now() + Duration::days(30);
        self.tournaments
            .create(
                admin,
                CreateTournamentRequest {
                    name: format!("Cup {}", &Uuid::new_v4().simple().to_string()[..6]),
                    description: None,
                    sport: Some("football".into()),
                    venue: None,
                    format: TournamentFormat::League,
                    start_date: start,
                    end_date: start + Duration::days(2),
                    registration_deadline: None,
                    max_teams,
                    rules: vec![],
                    open_registration: true,
                },
            )
            .await
            .unwrap()
    }

    /// Register a team under a fresh captain and approve it.
    pub async fn approved_team(&self, admin: &User, tournament: &Tournament, name: &str) -> (User, Team) {
        let captain = self.user(UserProfile::Captain { team_ids: vec![] }).await;
        let team = self
            .teams
            .register(
                &captain,
                tournament.id,
                RegisterTeamRequest {
                    name: name.into(),
                    contact_email: None,
                    contact_phone: None,
                    players: vec![],
                },
            )
            .await
            .unwrap();
        let team = self.teams.approve(admin, team.id).await.unwrap();
        (captain, team)
    }

    pub async fn scheduled_match(&self, admin: &User, tournament: &Tournament, a: &Team, b: &Team) -> Match {
        self.matches
            .create(
                admin,
                tournament.id,
                CreateMatchRequest {
                    team_a_id: a.id,
                    team_b_id: b.id,
                    round: Some(1),
                    venue: None,
                    scheduled_at: tournament.start_date,
                },
            )
            .await
            .unwrap()
    }

    pub async fn announcement(&self, admin: &User, tournament_id: Option<Uuid>) -> Announcement {
        self.announcements
            .create(
                admin,
                CreateAnnouncementRequest {
                    tournament_id,
                    title: "Welcome".into(),
                    content: "Check-in opens at 9:00".into(),
                    priority: AnnouncementPriority::Normal,
                },
            )
            .await
            .unwrap()
    }
}
