// src/routes/teams.rs
use actix_web::{delete, get, patch, post, web, HttpResponse, Result};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::handlers::match_handler;
use crate::handlers::team_handler::{self, TeamDecision};
use crate::models::team::UpdateTeamRequest;
use crate::services::{AuthService, MatchService, TeamService};

/// Teams registered by the calling captain
#[get("/mine")]
async fn get_my_teams(
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    team_handler::get_my_teams(auth_service, team_service, claims).await
}

#[get("/{team_id}")]
async fn get_team(
    path: web::Path<Uuid>,
    team_service: web::Data<TeamService>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::get_team(team_id, team_service).await
}

#[patch("/{team_id}")]
async fn update_team(
    path: web::Path<Uuid>,
    patch: web::Json<UpdateTeamRequest>,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::update_team(team_id, patch, auth_service, team_service, claims).await
}

#[delete("/{team_id}")]
async fn delete_team(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::delete_team(team_id, auth_service, team_service, claims).await
}

#[post("/{team_id}/approve")]
async fn approve_team(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::decide_team(team_id, TeamDecision::Approve, auth_service, team_service, claims).await
}

#[post("/{team_id}/reject")]
async fn reject_team(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::decide_team(team_id, TeamDecision::Reject, auth_service, team_service, claims).await
}

#[post("/{team_id}/eliminate")]
async fn eliminate_team(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::decide_team(team_id, TeamDecision::Eliminate, auth_service, team_service, claims).await
}

#[get("/{team_id}/matches")]
async fn get_team_matches(
    path: web::Path<Uuid>,
    match_service: web::Data<MatchService>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    match_handler::get_team_matches(team_id, match_service).await
}
