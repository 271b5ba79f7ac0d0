pub mod admin;
pub mod announcement_handler;
pub mod auth_handler;
pub mod backend_health_handler;
pub mod match_handler;
pub mod team_handler;
pub mod tournament_handler;
