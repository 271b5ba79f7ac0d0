use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use secrecy::SecretString;

/// The closed set of roles a user can hold.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Management,
    Captain,
    User,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::Management,
        UserRole::Captain,
        UserRole::User,
    ];
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Admin => "ADMIN",
            UserRole::Management => "MANAGEMENT",
            UserRole::Captain => "CAPTAIN",
            UserRole::User => "USER",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "MANAGEMENT" => Ok(UserRole::Management),
            "CAPTAIN" => Ok(UserRole::Captain),
            "USER" => Ok(UserRole::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Role together with the data that only exists for that role.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserProfile {
    Admin,
    Management { assigned_tournaments: Vec<Uuid> },
    Captain { team_ids: Vec<Uuid> },
    User,
}

impl UserProfile {
    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Admin => UserProfile::Admin,
            UserRole::Management => UserProfile::Management { assigned_tournaments: Vec::new() },
            UserRole::Captain => UserProfile::Captain { team_ids: Vec::new() },
            UserRole::User => UserProfile::User,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            UserProfile::Admin => UserRole::Admin,
            UserProfile::Management { .. } => UserRole::Management,
            UserProfile::Captain { .. } => UserRole::Captain,
            UserProfile::User => UserRole::User,
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        phone: Option<String>,
        profile: UserProfile,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(&email),
            username: username.trim().to_string(),
            password_hash,
            phone,
            profile,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn role(&self) -> UserRole {
        self.profile.role()
    }

    /// Whether this user is a management user assigned to the tournament.
    pub fn is_assigned_to(&self, tournament_id: Uuid) -> bool {
        match &self.profile {
            UserProfile::Management { assigned_tournaments } => {
                assigned_tournaments.contains(&tournament_id)
            }
            _ => false,
        }
    }

    /// Admin, or management assigned to the tournament.
    pub fn oversees(&self, tournament_id: Uuid) -> bool {
        self.role() == UserRole::Admin || self.is_assigned_to(tournament_id)
    }
}

/// Public view of a user; never carries the password hash.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub phone: Option<String>,
    #[serde(flatten)]
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            phone: user.phone.clone(),
            profile: user.profile.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub password: SecretString,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl fmt::Display for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username: {}, Email: {}", self.username, self.email)
    }
}

/// Admin-side creation of a management or captain account.
#[derive(Serialize, Deserialize)]
pub struct CreatePrivilegedUserRequest {
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub password: SecretString,
    #[serde(default)]
    pub phone: Option<String>,
    /// Only meaningful for management users.
    #[serde(default)]
    pub assigned_tournaments: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub current_password: SecretString,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub new_password: SecretString,
}

#[derive(Debug, Deserialize, Default)]
pub struct UserQuery {
    pub role: Option<UserRole>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| "Email must contain '@'".to_string())?;
    if local.is_empty() || domain.is_empty() {
        return Err("Email is incomplete".to_string());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Email domain is invalid".to_string());
    }
    if email.chars().any(char::is_whitespace) {
        return Err("Email cannot contain whitespace".to_string());
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), String> {
    let name = username.trim();
    if name.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if name.len() > 50 {
        return Err("Username cannot exceed 50 characters".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 72 {
        // bcrypt only looks at the first 72 bytes
        return Err("Password cannot exceed 72 characters".to_string());
    }
    Ok(())
}

pub fn serialize_secret_string<S>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("[REDACTED]")
}

pub fn deserialize_secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s.into_boxed_str()))
}
