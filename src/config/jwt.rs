use chrono::Duration;
use secrecy::SecretString;
use serde::Deserialize;

/// Signing key and lifetime for session tokens.
#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
    pub expiration_hours: i64,
}

impl JwtSettings {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
            expiration_hours,
        }
    }

    /// Token lifetime; non-positive configured values fall back to one hour.
    pub fn token_lifetime(&self) -> Duration {
        Duration::hours(self.expiration_hours.max(1))
    }

    /// Seconds until a freshly issued token expires, used for the session cookie max-age.
    pub fn cookie_max_age_secs(&self) -> i64 {
        self.token_lifetime().num_seconds()
    }
}
