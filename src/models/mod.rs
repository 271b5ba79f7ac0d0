pub mod announcement;
pub mod auth;
pub mod common;
pub mod matches;
pub mod team;
pub mod tournament;
pub mod user;
