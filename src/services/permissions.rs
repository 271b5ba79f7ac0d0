use uuid::Uuid;

use crate::error::AppError;
use crate::models::user::{User, UserRole};

/// Fail unless the actor holds one of the allowed roles.
pub fn require_role(actor: &User, allowed: &[UserRole]) -> Result<(), AppError> {
    if allowed.contains(&actor.role()) {
        return Ok(());
    }
    tracing::warn!(
        "User {} with role {} attempted an action restricted to {:?}",
        actor.username, actor.role(), allowed
    );
    Err(AppError::forbidden(format!(
        "Insufficient permissions. Required role: {}",
        allowed
            .iter()
            .map(|role| role.to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    )))
}

/// Fail unless the actor is an admin or a management user assigned to the tournament.
pub fn require_oversight(actor: &User, tournament_id: Uuid) -> Result<(), AppError> {
    if actor.oversees(tournament_id) {
        return Ok(());
    }
    tracing::warn!(
        "User {} ({}) attempted to manage tournament {} without oversight",
        actor.username, actor.role(), tournament_id
    );
    Err(AppError::forbidden("You do not manage this tournament"))
}
