use bcrypt::{hash, verify};
use secrecy::{ExposeSecret, SecretString};

use crate::error::AppError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

/// Hash on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_secret(password: &SecretString, cost: u32) -> Result<String, AppError> {
    let password = password.expose_secret().to_string();
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub async fn verify_secret(password: &SecretString, hash: String) -> Result<bool, AppError> {
    let password = password.expose_secret().to_string();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;
    Ok(matches)
}
