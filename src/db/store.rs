use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::announcement::Announcement;
use crate::models::matches::Match;
use crate::models::team::Team;
use crate::models::tournament::Tournament;
use crate::models::user::User;

/// Anything stored in a [`Collection`].
pub trait Record: Clone {
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
}

impl Record for User {
    const ENTITY: &'static str = "User";
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Tournament {
    const ENTITY: &'static str = "Tournament";
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Team {
    const ENTITY: &'static str = "Team";
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Match {
    const ENTITY: &'static str = "Match";
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Announcement {
    const ENTITY: &'static str = "Announcement";
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Records of one kind keyed by id.
#[derive(Debug)]
pub struct Collection<T> {
    items: HashMap<Uuid, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: HashMap::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn insert(&mut self, record: T) -> Result<(), AppError> {
        let id = record.id();
        if self.items.contains_key(&id) {
            return Err(AppError::conflict(format!("{} {} already exists", T::ENTITY, id)));
        }
        self.items.insert(id, record);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    /// Like [`Collection::get`], but a missing record is a `NotFound` error.
    pub fn require(&self, id: Uuid) -> Result<&T, AppError> {
        self.items.get(&id).ok_or_else(|| AppError::not_found(T::ENTITY))
    }

    pub fn require_mut(&mut self, id: Uuid) -> Result<&mut T, AppError> {
        self.items.get_mut(&id).ok_or_else(|| AppError::not_found(T::ENTITY))
    }

    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        self.items.remove(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.values_mut()
    }

    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a T>
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.items.values().filter(move |record| predicate(record))
    }

    /// Remove every record matching `predicate`, returning how many were removed.
    pub fn remove_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|_, record| !predicate(record));
        before - self.items.len()
    }
}

/// Every collection of the application, guarded together.
#[derive(Debug, Default)]
pub struct Collections {
    pub users: Collection<User>,
    pub tournaments: Collection<Tournament>,
    pub teams: Collection<Team>,
    pub matches: Collection<Match>,
    pub announcements: Collection<Announcement>,
}

impl Collections {
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        let email = crate::models::user::normalize_email(email);
        self.users.iter().find(|user| user.email == email)
    }

    pub fn teams_in(&self, tournament_id: Uuid) -> impl Iterator<Item = &Team> {
        self.teams.filter(move |team| team.tournament_id == tournament_id)
    }

    pub fn matches_in(&self, tournament_id: Uuid) -> impl Iterator<Item = &Match> {
        self.matches.filter(move |game| game.tournament_id == tournament_id)
    }

    pub fn admitted_team_count(&self, tournament_id: Uuid) -> u32 {
        self.teams_in(tournament_id)
            .filter(|team| team.status.is_admitted())
            .count() as u32
    }
}

/// The single source of truth for every record.
///
/// Each closure passed to [`InMemoryStore::write`] runs under one write lock,
/// so a service operation touching several records is atomic. Closures must
/// finish their checks before mutating anything.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Collections) -> R,
    {
        let guard = self.inner.read().await;
        f(&guard)
    }

    pub async fn write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Collections) -> R,
    {
        let mut guard = self.inner.write().await;
        f(&mut guard)
    }
}
