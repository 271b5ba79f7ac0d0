use std::sync::Arc;
use chrono::Utc;
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::db::InMemoryStore;
use crate::error::AppError;
use crate::models::common::{PaginatedResponse, PaginationQuery};
use crate::models::user::{
    validate_password, validate_username, ChangePasswordRequest, UpdateProfileRequest, User,
    UserProfile, UserQuery, UserResponse, UserRole,
};
use crate::services::permissions::require_role;
use crate::utils::password::{hash_secret, verify_secret};

/// Account management for the acting user and for admins.
pub struct UserService {
    store: Arc<InMemoryStore>,
    hash_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<InMemoryStore>, hash_cost: u32) -> Self {
        Self { store, hash_cost }
    }

    /// Admins can look at anyone, everyone else only at themselves.
    pub async fn get_user(&self, actor: &User, id: Uuid) -> Result<UserResponse, AppError> {
        if actor.id != id {
            require_role(actor, &[UserRole::Admin])?;
        }
        self.store
            .read(|db| db.users.require(id).map(UserResponse::from))
            .await
    }

    pub async fn list_users(
        &self,
        actor: &User,
        query: &UserQuery,
    ) -> Result<PaginatedResponse<UserResponse>, AppError> {
        require_role(actor, &[UserRole::Admin])?;
        let search = query.search.as_ref().map(|s| s.trim().to_lowercase());

        let mut users: Vec<UserResponse> = self
            .store
            .read(|db| {
                db.users
                    .filter(|u| query.role.map_or(true, |role| u.role() == role))
                    .filter(|u| {
                        search.as_ref().map_or(true, |s| {
                            u.username.to_lowercase().contains(s.as_str()) || u.email.contains(s.as_str())
                        })
                    })
                    .map(UserResponse::from)
                    .collect()
            })
            .await;
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.username.cmp(&b.username)));

        let pagination = PaginationQuery { page: query.page, limit: query.limit };
        Ok(PaginatedResponse::paginate(users, &pagination))
    }

    #[tracing::instrument(name = "Update profile", skip(self, actor, request), fields(user = %actor.username))]
    pub async fn update_profile(
        &self,
        actor: &User,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, AppError> {
        if let Some(username) = &request.username {
            validate_username(username).map_err(AppError::Validation)?;
        }

        self.store
            .write(|db| {
                let user = db.users.require_mut(actor.id)?;
                if let Some(username) = request.username {
                    user.username = username.trim().to_string();
                }
                if let Some(phone) = request.phone {
                    user.phone = Some(phone.trim().to_string()).filter(|p| !p.is_empty());
                }
                user.updated_at = Utc::now();
                Ok(UserResponse::from(&*user))
            })
            .await
    }

    #[tracing::instrument(name = "Change password", skip(self, actor, request), fields(user = %actor.username))]
    pub async fn change_password(
        &self,
        actor: &User,
        request: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        validate_password(request.new_password.expose_secret()).map_err(AppError::Validation)?;

        let current_hash = self
            .store
            .read(|db| db.users.require(actor.id).map(|u| u.password_hash.clone()))
            .await?;
        if !verify_secret(&request.current_password, current_hash).await? {
            tracing::warn!("Password change for {} failed: wrong current password", actor.id);
            return Err(AppError::Unauthorized("Current password is incorrect".to_string()));
        }

        let new_hash = hash_secret(&request.new_password, self.hash_cost).await?;
        self.store
            .write(|db| {
                let user = db.users.require_mut(actor.id)?;
                user.password_hash = new_hash;
                user.updated_at = Utc::now();
                Ok::<_, AppError>(())
            })
            .await?;
        tracing::info!("User {} changed their password", actor.id);
        Ok(())
    }

    #[tracing::instrument(name = "Assign tournament", skip(self, actor), fields(admin = %actor.username))]
    pub async fn assign_tournament(
        &self,
        actor: &User,
        user_id: Uuid,
        tournament_id: Uuid,
    ) -> Result<UserResponse, AppError> {
        require_role(actor, &[UserRole::Admin])?;

        self.store
            .write(|db| {
                db.tournaments.require(tournament_id)?;
                let user = db.users.require_mut(user_id)?;
                let UserProfile::Management { assigned_tournaments } = &mut user.profile else {
                    return Err(AppError::validation("Only management users can be assigned tournaments"));
                };
                if !assigned_tournaments.contains(&tournament_id) {
                    assigned_tournaments.push(tournament_id);
                    user.updated_at = Utc::now();
                    tracing::info!("Assigned tournament {} to {}", tournament_id, user_id);
                }
                Ok(UserResponse::from(&*user))
            })
            .await
    }

    #[tracing::instrument(name = "Unassign tournament", skip(self, actor), fields(admin = %actor.username))]
    pub async fn unassign_tournament(
        &self,
        actor: &User,
        user_id: Uuid,
        tournament_id: Uuid,
    ) -> Result<UserResponse, AppError> {
        require_role(actor, &[UserRole::Admin])?;

        self.store
            .write(|db| {
                let user = db.users.require_mut(user_id)?;
                let UserProfile::Management { assigned_tournaments } = &mut user.profile else {
                    return Err(AppError::validation("Only management users can be assigned tournaments"));
                };
                let before = assigned_tournaments.len();
                assigned_tournaments.retain(|id| *id != tournament_id);
                if assigned_tournaments.len() == before {
                    return Err(AppError::not_found("Tournament assignment"));
                }
                user.updated_at = Utc::now();
                tracing::info!("Unassigned tournament {} from {}", tournament_id, user_id);
                Ok(UserResponse::from(&*user))
            })
            .await
    }

    /// Teams of a deleted captain stay in place with a dangling `captain_id`.
    #[tracing::instrument(name = "Delete user", skip(self, actor), fields(admin = %actor.username))]
    pub async fn delete_user(&self, actor: &User, id: Uuid) -> Result<(), AppError> {
        require_role(actor, &[UserRole::Admin])?;
        if actor.id == id {
            return Err(AppError::conflict("Admins cannot delete their own account"));
        }

        self.store
            .write(|db| {
                db.users.require(id)?;
                db.users.remove(id);
                Ok::<_, AppError>(())
            })
            .await?;
        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::LoginRequest;
    use crate::models::user::SignupRequest;
    use crate::services::test_support::{secret, TestContext};

    #[tokio::test]
    async fn users_see_themselves_admins_see_everyone() {
        let ctx = TestContext::new();
        let admin = ctx.user(UserProfile::Admin).await;
        let alice = ctx.user(UserProfile::User).await;
        let bob = ctx.user(UserProfile::User).await;

        assert_eq!(ctx.users.get_user(&alice, alice.id).await.unwrap().id, alice.id);
        assert!(matches!(ctx.users.get_user(&alice, bob.id).await, Err(AppError::Forbidden(_))));
        assert_eq!(ctx.users.get_user(&admin, bob.id).await.unwrap().id, bob.id);
        assert!(matches!(ctx.users.get_user(&admin, Uuid::new_v4()).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_filters_by_role() {
        let ctx = TestContext::new();
        let admin = ctx.user(UserProfile::Admin).await;
        ctx.user(UserProfile::Captain { team_ids: vec![] }).await;
        ctx.user(UserProfile::Captain { team_ids: vec![] }).await;
        let plain = ctx.user(UserProfile::User).await;

        let query = UserQuery { role: Some(UserRole::Captain), ..Default::default() };
        let page = ctx.users.list_users(&admin, &query).await.unwrap();
        assert_eq!(page.pagination.total, 2);
        assert!(page.data.iter().all(|u| u.profile.role() == UserRole::Captain));

        assert!(matches!(
            ctx.users.list_users(&plain, &UserQuery::default()).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn password_change_requires_current_password() {
        let ctx = TestContext::new();
        let created = ctx
            .auth
            .signup(SignupRequest {
                username: "frank".into(),
                email: "frank@example.com".into(),
                password: secret("old-password"),
                role: None,
                phone: None,
            })
            .await
            .unwrap();
        let frank = ctx.store.read(|db| db.users.get(created.id).cloned()).await.unwrap();

        let err = ctx
            .users
            .change_password(
                &frank,
                ChangePasswordRequest { current_password: secret("not-it-at-all"), new_password: secret("new-password") },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        ctx.users
            .change_password(
                &frank,
                ChangePasswordRequest { current_password: secret("old-password"), new_password: secret("new-password") },
            )
            .await
            .unwrap();

        let login = |password: &str| LoginRequest { email: "frank@example.com".into(), password: secret(password) };
        assert!(ctx.auth.login(login("old-password")).await.is_err());
        assert!(ctx.auth.login(login("new-password")).await.is_ok());
    }

    #[tokio::test]
    async fn profile_update_trims_and_validates() {
        let ctx = TestContext::new();
        let user = ctx.user(UserProfile::User).await;

        let updated = ctx
            .users
            .update_profile(&user, UpdateProfileRequest { username: Some("  grace ".into()), phone: Some("+4912345".into()) })
            .await
            .unwrap();
        assert_eq!(updated.username, "grace");
        assert_eq!(updated.phone.as_deref(), Some("+4912345"));

        let err = ctx
            .users
            .update_profile(&user, UpdateProfileRequest { username: Some("g".into()), phone: None })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn only_management_users_hold_assignments() {
        let ctx = TestContext::new();
        let admin = ctx.user(UserProfile::Admin).await;
        let tournament = ctx.tournament(&admin, 4).await;
        let manager = ctx.user(UserProfile::Management { assigned_tournaments: vec![] }).await;
        let captain = ctx.user(UserProfile::Captain { team_ids: vec![] }).await;

        let assigned = ctx.users.assign_tournament(&admin, manager.id, tournament.id).await.unwrap();
        assert_eq!(assigned.profile, UserProfile::Management { assigned_tournaments: vec![tournament.id] });
        let again = ctx.users.assign_tournament(&admin, manager.id, tournament.id).await.unwrap();
        assert_eq!(again.profile, assigned.profile);

        assert!(matches!(
            ctx.users.assign_tournament(&admin, captain.id, tournament.id).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            ctx.users.assign_tournament(&admin, manager.id, Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));

        let unassigned = ctx.users.unassign_tournament(&admin, manager.id, tournament.id).await.unwrap();
        assert_eq!(unassigned.profile, UserProfile::Management { assigned_tournaments: vec![] });
        assert!(matches!(
            ctx.users.unassign_tournament(&admin, manager.id, tournament.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn deleting_a_captain_keeps_their_team() {
        let ctx = TestContext::new();
        let admin = ctx.user(UserProfile::Admin).await;
        let tournament = ctx.tournament(&admin, 4).await;
        let (captain, team) = ctx.approved_team(&admin, &tournament, "Red Lions").await;

        assert!(matches!(ctx.users.delete_user(&admin, admin.id).await, Err(AppError::Conflict(_))));
        assert!(matches!(ctx.users.delete_user(&captain, admin.id).await, Err(AppError::Forbidden(_))));

        ctx.users.delete_user(&admin, captain.id).await.unwrap();
        let stored = ctx.teams.get(team.id).await.unwrap();
        assert_eq!(stored.captain_id, captain.id);
        assert!(ctx.store.read(|db| db.users.get(captain.id).is_none()).await);
    }
}
