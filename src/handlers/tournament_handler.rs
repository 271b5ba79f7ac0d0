use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::models::common::ApiResponse;
use crate::models::tournament::{
    ChangeStatusRequest, CreateTournamentRequest, TournamentQuery, UpdateTournamentRequest,
};
use crate::services::{AuthService, TournamentService};

#[tracing::instrument(
    name = "Create tournament",
    skip(request, auth_service, tournament_service, claims),
    fields(
        tournament_name = %request.name,
        user = %claims.username
    )
)]
pub async fn create_tournament(
    request: web::Json<CreateTournamentRequest>,
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let tournament = tournament_service.create(&actor, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Tournament created successfully", tournament)))
}

pub async fn list_tournaments(
    query: web::Query<TournamentQuery>,
    tournament_service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(tournament_service.list(&query).await))
}

pub async fn get_assigned_tournaments(
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let tournaments = tournament_service.assigned_to(&actor).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Assigned tournaments retrieved", tournaments)))
}

pub async fn get_tournament(
    tournament_id: Uuid,
    tournament_service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    let tournament = tournament_service.get(tournament_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tournament retrieved", tournament)))
}

pub async fn update_tournament(
    tournament_id: Uuid,
    patch: web::Json<UpdateTournamentRequest>,
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let tournament = tournament_service
        .update(&actor, tournament_id, patch.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tournament updated successfully", tournament)))
}

pub async fn change_tournament_status(
    tournament_id: Uuid,
    request: web::Json<ChangeStatusRequest>,
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let tournament = tournament_service
        .change_status(&actor, tournament_id, request.status)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Tournament is now {}", tournament.status),
        tournament,
    )))
}

pub async fn delete_tournament(
    tournament_id: Uuid,
    auth_service: web::Data<AuthService>,
    tournament_service: web::Data<TournamentService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let summary = tournament_service.delete(&actor, tournament_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tournament deleted", summary)))
}
