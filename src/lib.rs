use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
mod handlers;
mod middleware;
pub mod models;
mod routes;
pub mod services;
pub mod standings;
pub mod telemetry;
pub mod utils;

use crate::config::jwt::JwtSettings;
use crate::config::settings::ApplicationSettings;
use crate::db::InMemoryStore;
use crate::error::AppError;
use crate::routes::init_routes;
use crate::services::{
    AnnouncementService, AuthService, MatchService, TeamService, TournamentService, UserService,
};

pub fn run(
    listener: TcpListener,
    store: Arc<InMemoryStore>,
    jwt_settings: JwtSettings,
    app_settings: &ApplicationSettings,
) -> Result<Server, std::io::Error> {
    let jwt_settings = Arc::new(jwt_settings);
    let hash_cost = app_settings.password_hash_cost;

    // Wrap using web::Data, which boils down to an Arc smart pointer
    let jwt_settings_data = web::Data::from(jwt_settings.clone());
    let auth_service = web::Data::new(AuthService::new(store.clone(), jwt_settings, hash_cost));
    let user_service = web::Data::new(UserService::new(store.clone(), hash_cost));
    let tournament_service = web::Data::new(TournamentService::new(store.clone()));
    let team_service = web::Data::new(TeamService::new(store.clone()));
    let match_service = web::Data::new(MatchService::new(store.clone()));
    let announcement_service = web::Data::new(AnnouncementService::new(store));

    let allowed_origins = app_settings.allowed_origins.clone();

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::Validation(format!("Invalid request body: {}", err)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::Validation(format!("Invalid path parameter: {}", err)).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::Validation(format!("Invalid query string: {}", err)).into()
            }))
            .app_data(jwt_settings_data.clone())
            .app_data(auth_service.clone())
            .app_data(user_service.clone())
            .app_data(tournament_service.clone())
            .app_data(team_service.clone())
            .app_data(match_service.clone())
            .app_data(announcement_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
