use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::models::common::ApiResponse;
use crate::models::team::{RegisterTeamRequest, TeamQuery, UpdateTeamRequest};
use crate::services::{AuthService, TeamService};

/// Register a new team
#[tracing::instrument(
    name = "Register team",
    skip(team_request, auth_service, team_service, claims),
    fields(
        team_name = %team_request.name,
        user = %claims.username
    )
)]
pub async fn register_team(
    tournament_id: Uuid,
    team_request: web::Json<RegisterTeamRequest>,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let team = team_service
        .register(&actor, tournament_id, team_request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Team registered successfully and is awaiting approval",
        team,
    )))
}

pub async fn get_tournament_teams(
    tournament_id: Uuid,
    query: web::Query<TeamQuery>,
    team_service: web::Data<TeamService>,
) -> Result<HttpResponse> {
    let teams = team_service.list_for_tournament(tournament_id, query.status).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} teams", teams.len()),
        teams,
    )))
}

pub async fn get_my_teams(
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let teams = team_service.list_for_captain(&actor).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Teams retrieved", teams)))
}

pub async fn get_team(
    team_id: Uuid,
    team_service: web::Data<TeamService>,
) -> Result<HttpResponse> {
    let team = team_service.get(team_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Team retrieved", team)))
}

pub async fn update_team(
    team_id: Uuid,
    patch: web::Json<UpdateTeamRequest>,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let team = team_service.update(&actor, team_id, patch.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Team updated successfully", team)))
}

/// The three overseer decisions on a team.
#[derive(Debug, Clone, Copy)]
pub enum TeamDecision {
    Approve,
    Reject,
    Eliminate,
}

pub async fn decide_team(
    team_id: Uuid,
    decision: TeamDecision,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let team = match decision {
        TeamDecision::Approve => team_service.approve(&actor, team_id).await?,
        TeamDecision::Reject => team_service.reject(&actor, team_id).await?,
        TeamDecision::Eliminate => team_service.eliminate(&actor, team_id).await?,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Team {} is now {:?}", team.name, team.status),
        team,
    )))
}

pub async fn delete_team(
    team_id: Uuid,
    auth_service: web::Data<AuthService>,
    team_service: web::Data<TeamService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    team_service.delete(&actor, team_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Team deleted")))
}
