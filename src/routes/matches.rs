// src/routes/matches.rs
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Result};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::handlers::match_handler;
use crate::models::matches::{ScoreUpdateRequest, UpdateMatchRequest};
use crate::services::{AuthService, MatchService};

#[get("/{match_id}")]
async fn get_match(
    path: web::Path<Uuid>,
    match_service: web::Data<MatchService>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::get_match(match_id, match_service).await
}

/// Reschedule a match
#[patch("/{match_id}")]
async fn update_match(
    path: web::Path<Uuid>,
    patch: web::Json<UpdateMatchRequest>,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::update_match(match_id, patch, auth_service, match_service, claims).await
}

#[delete("/{match_id}")]
async fn delete_match(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::delete_match(match_id, auth_service, match_service, claims).await
}

/// Update match score
#[put("/{match_id}/score")]
async fn update_match_score(
    path: web::Path<Uuid>,
    score: web::Json<ScoreUpdateRequest>,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::update_match_score(match_id, score, auth_service, match_service, claims).await
}

#[post("/{match_id}/cancel")]
async fn cancel_match(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    match_service: web::Data<MatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::cancel_match(match_id, auth_service, match_service, claims).await
}
