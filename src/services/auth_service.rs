use std::sync::Arc;
use secrecy::{ExposeSecret, SecretString};

use crate::auth::jwt::{decode_token, generate_token, Claims};
use crate::config::jwt::JwtSettings;
use crate::db::InMemoryStore;
use crate::error::AppError;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::user::{
    normalize_email, validate_email, validate_password, validate_username,
    CreatePrivilegedUserRequest, SignupRequest, User, UserProfile, UserResponse, UserRole,
};
use crate::services::permissions::require_role;
use crate::utils::password::{hash_secret, verify_secret};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Sign-up, login and token validation.
pub struct AuthService {
    store: Arc<InMemoryStore>,
    jwt_settings: Arc<JwtSettings>,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<InMemoryStore>, jwt_settings: Arc<JwtSettings>, hash_cost: u32) -> Self {
        Self { store, jwt_settings, hash_cost }
    }

    pub fn jwt_settings(&self) -> &JwtSettings {
        &self.jwt_settings
    }

    /// Public sign-up. Only plain users and captains can register themselves.
    #[tracing::instrument(name = "Sign up user", skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> Result<UserResponse, AppError> {
        let role = request.role.unwrap_or(UserRole::User);
        if !matches!(role, UserRole::User | UserRole::Captain) {
            return Err(AppError::forbidden(
                "Only USER or CAPTAIN accounts can be created through sign-up",
            ));
        }

        let user = self
            .insert_user(
                request.username,
                request.email,
                &request.password,
                request.phone,
                UserProfile::for_role(role),
            )
            .await?;
        tracing::info!("User {} signed up as {}", user.id, role);
        Ok(UserResponse::from(&user))
    }

    #[tracing::instrument(name = "Create management user", skip(self, actor, request), fields(admin = %actor.username))]
    pub async fn create_management_user(
        &self,
        actor: &User,
        request: CreatePrivilegedUserRequest,
    ) -> Result<UserResponse, AppError> {
        Self::validate_user_role(actor, &[UserRole::Admin])?;
        let mut assigned = request.assigned_tournaments;
        assigned.sort();
        assigned.dedup();
        let user = self
            .insert_user(
                request.username,
                request.email,
                &request.password,
                request.phone,
                UserProfile::Management { assigned_tournaments: assigned },
            )
            .await?;
        tracing::info!("Admin {} created management user {}", actor.id, user.id);
        Ok(UserResponse::from(&user))
    }

    #[tracing::instrument(name = "Create captain user", skip(self, actor, request), fields(admin = %actor.username))]
    pub async fn create_captain_user(
        &self,
        actor: &User,
        request: CreatePrivilegedUserRequest,
    ) -> Result<UserResponse, AppError> {
        Self::validate_user_role(actor, &[UserRole::Admin])?;
        if !request.assigned_tournaments.is_empty() {
            return Err(AppError::validation("Only management users can be assigned tournaments"));
        }
        let user = self
            .insert_user(
                request.username,
                request.email,
                &request.password,
                request.phone,
                UserProfile::Captain { team_ids: Vec::new() },
            )
            .await?;
        tracing::info!("Admin {} created captain {}", actor.id, user.id);
        Ok(UserResponse::from(&user))
    }

    async fn insert_user(
        &self,
        username: String,
        email: String,
        password: &SecretString,
        phone: Option<String>,
        profile: UserProfile,
    ) -> Result<User, AppError> {
        validate_username(&username).map_err(AppError::Validation)?;
        validate_email(&email).map_err(AppError::Validation)?;
        validate_password(password.expose_secret()).map_err(AppError::Validation)?;

        let password_hash = hash_secret(password, self.hash_cost).await?;
        let user = User::new(username, email, password_hash, phone, profile);

        self.store
            .write(|db| {
                if db.user_by_email(&user.email).is_some() {
                    return Err(AppError::conflict("A user with this email already exists"));
                }
                if let UserProfile::Management { assigned_tournaments } = &user.profile {
                    if let Some(missing) = assigned_tournaments
                        .iter()
                        .find(|id| !db.tournaments.contains(**id))
                    {
                        return Err(AppError::validation(format!("Tournament {} does not exist", missing)));
                    }
                }
                db.users.insert(user.clone())?;
                Ok(user)
            })
            .await
    }

    /// Verify credentials and issue a signed token.
    #[tracing::instrument(name = "Login user attempt", skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let email = normalize_email(&request.email);
        let user = self
            .store
            .read(|db| db.user_by_email(&email).cloned())
            .await;

        let user = match user {
            Some(user) => user,
            None => {
                tracing::info!("User not found or invalid credentials");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !verify_secret(&request.password, user.password_hash.clone()).await? {
            tracing::info!("Invalid password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = generate_token(&user, &self.jwt_settings)
            .map_err(|e| AppError::Internal(format!("Error generating JWT token: {:?}", e)))?;

        tracing::info!("User {} logged in", user.id);
        Ok(LoginResponse {
            token,
            user: UserResponse::from(&user),
        })
    }

    /// Decode a raw token and load the user it names.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(token, &self.jwt_settings).map_err(|e| {
            tracing::info!("Rejected token: {:?}", e);
            AppError::Unauthorized("Invalid token".to_string())
        })?;
        self.current_user(&claims).await
    }

    /// Load the acting user named by already verified claims.
    ///
    /// The record is re-read so that role changes and deletions apply
    /// to tokens issued before them.
    pub async fn current_user(&self, claims: &Claims) -> Result<User, AppError> {
        let user_id = claims
            .user_id()
            .ok_or_else(|| AppError::Unauthorized("Invalid token subject".to_string()))?;
        self.store
            .read(|db| db.users.get(user_id).cloned())
            .await
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }

    pub fn validate_user_role(actor: &User, allowed: &[UserRole]) -> Result<(), AppError> {
        require_role(actor, allowed)
    }

    /// Create the configured admin unless a user with that email exists.
    /// Returns whether an account was created.
    pub async fn seed_admin(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<bool, AppError> {
        let exists = self.store.read(|db| db.user_by_email(email).is_some()).await;
        if exists {
            return Ok(false);
        }
        let user = self
            .insert_user(username.to_string(), email.to_string(), password, None, UserProfile::Admin)
            .await?;
        tracing::info!("Seeded admin account {}", user.id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{secret, TestContext};

    fn signup(username: &str, email: &str, role: Option<UserRole>) -> SignupRequest {
        SignupRequest {
            username: username.into(),
            email: email.into(),
            password: secret("password123"),
            role,
            phone: None,
        }
    }

    #[tokio::test]
    async fn signup_then_login() {
        let ctx = TestContext::new();
        let created = ctx.auth.signup(signup("alice", "Alice@Example.com", None)).await.unwrap();
        assert_eq!(created.profile, UserProfile::User);
        assert_eq!(created.email, "alice@example.com");

        let response = ctx
            .auth
            .login(LoginRequest { email: "alice@example.com".into(), password: secret("password123") })
            .await
            .unwrap();
        assert_eq!(response.user.id, created.id);

        let user = ctx.auth.validate_token(&response.token).await.unwrap();
        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_the_same_way() {
        let ctx = TestContext::new();
        ctx.auth.signup(signup("bob", "bob@example.com", None)).await.unwrap();

        let wrong_password = ctx
            .auth
            .login(LoginRequest { email: "bob@example.com".into(), password: secret("password124") })
            .await
            .unwrap_err();
        let unknown = ctx
            .auth
            .login(LoginRequest { email: "nobody@example.com".into(), password: secret("password123") })
            .await
            .unwrap_err();
        assert_eq!(wrong_password, AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        assert_eq!(wrong_password, unknown);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let ctx = TestContext::new();
        ctx.auth.signup(signup("carol", "carol@example.com", None)).await.unwrap();
        let err = ctx.auth.signup(signup("carol2", " CAROL@example.com", None)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn signup_cannot_grant_privileged_roles() {
        let ctx = TestContext::new();
        for role in [UserRole::Admin, UserRole::Management] {
            let err = ctx.auth.signup(signup("eve", "eve@example.com", Some(role))).await.unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
        let captain = ctx.auth.signup(signup("cap", "cap@example.com", Some(UserRole::Captain))).await.unwrap();
        assert_eq!(captain.profile.role(), UserRole::Captain);
    }

    #[tokio::test]
    async fn only_admins_create_management_users() {
        let ctx = TestContext::new();
        let admin = ctx.user(UserProfile::Admin).await;
        let captain = ctx.user(UserProfile::Captain { team_ids: vec![] }).await;
        let tournament = ctx.tournament(&admin, 4).await;

        let request = || CreatePrivilegedUserRequest {
            username: "manager".into(),
            email: "manager@example.com".into(),
            password: secret("password123"),
            phone: None,
            assigned_tournaments: vec![tournament.id],
        };

        let err = ctx.auth.create_management_user(&captain, request()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let manager = ctx.auth.create_management_user(&admin, request()).await.unwrap();
        assert_eq!(
            manager.profile,
            UserProfile::Management { assigned_tournaments: vec![tournament.id] }
        );
    }

    #[tokio::test]
    async fn management_assignment_must_reference_existing_tournaments() {
        let ctx = TestContext::new();
        let admin = ctx.user(UserProfile::Admin).await;
        let err = ctx
            .auth
            .create_management_user(
                &admin,
                CreatePrivilegedUserRequest {
                    username: "manager".into(),
                    email: "manager@example.com".into(),
                    password: secret("password123"),
                    phone: None,
                    assigned_tournaments: vec![uuid::Uuid::new_v4()],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn deleted_user_token_is_rejected() {
        let ctx = TestContext::new();
        ctx.auth.signup(signup("dave", "dave@example.com", None)).await.unwrap();
        let response = ctx
            .auth
            .login(LoginRequest { email: "dave@example.com".into(), password: secret("password123") })
            .await
            .unwrap();
        ctx.store.write(|db| db.users.remove(response.user.id)).await;

        let err = ctx.auth.validate_token(&response.token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(matches!(ctx.auth.validate_token("garbage").await, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn seed_admin_is_idempotent() {
        let ctx = TestContext::new();
        let password = secret("admin-password");
        assert!(ctx.auth.seed_admin("admin", "admin@example.com", &password).await.unwrap());
        assert!(!ctx.auth.seed_admin("admin", "admin@example.com", &password).await.unwrap());
        let admins = ctx
            .store
            .read(|db| db.users.filter(|u| u.role() == UserRole::Admin).count())
            .await;
        assert_eq!(admins, 1);
    }

    #[tokio::test]
    async fn role_allow_list_is_checked_against_the_stored_role() {
        let ctx = TestContext::new();
        let captain = ctx.user(UserProfile::Captain { team_ids: vec![] }).await;
        assert!(AuthService::validate_user_role(&captain, &[UserRole::Captain, UserRole::Admin]).is_ok());
        assert!(matches!(
            AuthService::validate_user_role(&captain, &[UserRole::Admin]),
            Err(AppError::Forbidden(_))
        ));
    }
}
