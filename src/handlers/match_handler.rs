use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::models::common::ApiResponse;
use crate::models::matches::{CreateMatchRequest, MatchQuery, ScoreUpdateRequest, UpdateMatchRequest};
use crate::services::{AuthService, MatchService};

pub async fn create_match(
    tournament_id: Uuid,
    request: web::Json<CreateMatchRequest>,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let game = match_service
        .create(&actor, tournament_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Match scheduled", game)))
}

pub async fn get_tournament_matches(
    tournament_id: Uuid,
    query: web::Query<MatchQuery>,
    match_service: web::Data<MatchService>,
) -> Result<HttpResponse> {
    let matches = match_service.list_for_tournament(tournament_id, query.status).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} matches", matches.len()),
        matches,
    )))
}

pub async fn get_team_matches(
    team_id: Uuid,
    match_service: web::Data<MatchService>,
) -> Result<HttpResponse> {
    let matches = match_service.list_for_team(team_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Team matches retrieved", matches)))
}

/// Get tournament standings
pub async fn get_standings(
    tournament_id: Uuid,
    match_service: web::Data<MatchService>,
) -> Result<HttpResponse> {
    let standings = match_service.standings(tournament_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Standings retrieved", standings)))
}

pub async fn get_match(
    match_id: Uuid,
    match_service: web::Data<MatchService>,
) -> Result<HttpResponse> {
    let game = match_service.get(match_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match retrieved", game)))
}

pub async fn update_match(
    match_id: Uuid,
    patch: web::Json<UpdateMatchRequest>,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let game = match_service.update(&actor, match_id, patch.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match updated", game)))
}

#[tracing::instrument(
    name = "Update match score",
    skip(score, auth_service, match_service, claims),
    fields(
        score_a = score.score_a,
        score_b = score.score_b,
        user = %claims.username
    )
)]
pub async fn update_match_score(
    match_id: Uuid,
    score: web::Json<ScoreUpdateRequest>,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let game = match_service
        .update_score(&actor, match_id, score.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Score recorded", game)))
}

pub async fn cancel_match(
    match_id: Uuid,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let game = match_service.cancel(&actor, match_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match cancelled", game)))
}

pub async fn delete_match(
    match_id: Uuid,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    match_service.delete(&actor, match_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Match deleted")))
}
