// src/routes/tournaments.rs
use actix_web::{delete, get, patch, post, web, HttpResponse, Result};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::handlers::{match_handler, team_handler, tournament_handler};
use crate::models::matches::{CreateMatchRequest, MatchQuery};
use crate::models::team::{RegisterTeamRequest, TeamQuery};
use crate::models::tournament::{
    ChangeStatusRequest, CreateTournamentRequest, TournamentQuery, UpdateTournamentRequest,
};
use crate::services::{AuthService, MatchService, TeamService, TournamentService};

/// List tournaments (with pagination)
#[get("")]
async fn list_tournaments(
    query: web::Query<TournamentQuery>,
    tournament_service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    tournament_handler::list_tournaments(query, tournament_service).await
}

#[post("")]
async fn create_tournament(
    request: web::Json<CreateTournamentRequest>,
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    tournament_handler::create_tournament(request, auth_service, tournament_service, claims).await
}

/// Tournaments the caller manages
#[get("/assigned")]
async fn get_assigned_tournaments(
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    tournament_handler::get_assigned_tournaments(auth_service, tournament_service, claims).await
}

#[get("/{tournament_id}")]
async fn get_tournament(
    path: web::Path<Uuid>,
    tournament_service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    tournament_handler::get_tournament(tournament_id, tournament_service).await
}

#[patch("/{tournament_id}")]
async fn update_tournament(
    path: web::Path<Uuid>,
    patch: web::Json<UpdateTournamentRequest>,
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    tournament_handler::update_tournament(tournament_id, patch, auth_service, tournament_service, claims).await
}

#[delete("/{tournament_id}")]
async fn delete_tournament(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    tournament_handler::delete_tournament(tournament_id, auth_service, tournament_service, claims).await
}

#[post("/{tournament_id}/status")]
async fn change_tournament_status(
    path: web::Path<Uuid>,
    request: web::Json<ChangeStatusRequest>,
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    tournament_handler::change_tournament_status(tournament_id, request, auth_service, tournament_service, claims).await
}

/// Register a team for the tournament
#[post("/{tournament_id}/teams")]
async fn register_team(
    path: web::Path<Uuid>,
    team_request: web::Json<RegisterTeamRequest>,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    team_handler::register_team(tournament_id, team_request, auth_service, team_service, claims).await
}

#[get("/{tournament_id}/teams")]
async fn get_tournament_teams(
    path: web::Path<Uuid>,
    query: web::Query<TeamQuery>,
    team_service: web::Data<TeamService>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    team_handler::get_tournament_teams(tournament_id, query, team_service).await
}

#[post("/{tournament_id}/matches")]
async fn create_match(
    path: web::Path<Uuid>,
    request: web::Json<CreateMatchRequest>,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    match_handler::create_match(tournament_id, request, auth_service, match_service, claims).await
}

#[get("/{tournament_id}/matches")]
async fn get_tournament_matches(
    path: web::Path<Uuid>,
    query: web::Query<MatchQuery>,
    match_service: web::Data<MatchService>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    match_handler::get_tournament_matches(tournament_id, query, match_service).await
}

/// Get tournament standings
#[get("/{tournament_id}/standings")]
async fn get_standings(
    path: web::Path<Uuid>,
    match_service: web::Data<MatchService>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    match_handler::get_standings(tournament_id, match_service).await
}
