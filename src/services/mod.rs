pub mod permissions;
pub mod auth_service;
pub mod user_service;
pub mod tournament_service;
pub mod team_service;
pub mod match_service;
pub mod announcement_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::AuthService;
pub use user_service::UserService;
pub use tournament_service::{CascadeSummary, TournamentService};
pub use team_service::TeamService;
pub use match_service::MatchService;
pub use announcement_service::AnnouncementService;
