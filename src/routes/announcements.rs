// src/routes/announcements.rs
use actix_web::{delete, get, patch, post, web, HttpResponse, Result};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::handlers::announcement_handler;
use crate::models::announcement::{AnnouncementQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest};
use crate::services::{AnnouncementService, AuthService};

/// Announcements, optionally for one tournament (globals included)
#[get("")]
async fn list_announcements(
    query: web::Query<AnnouncementQuery>,
    announcement_service: web::Data<AnnouncementService>,
) -> Result<HttpResponse> {
    announcement_handler::list_announcements(query, announcement_service).await
}

#[post("")]
async fn create_announcement(
    request: web::Json<CreateAnnouncementRequest>,
    auth_service: web::Data<AuthService>,
    announcement_service: web::Data<AnnouncementService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    announcement_handler::create_announcement(request, auth_service, announcement_service, claims).await
}

#[get("/{announcement_id}")]
async fn get_announcement(
    path: web::Path<Uuid>,
    announcement_service: web::Data<AnnouncementService>,
) -> Result<HttpResponse> {
    announcement_handler::get_announcement(path.into_inner(), announcement_service).await
}

#[patch("/{announcement_id}")]
async fn update_announcement(
    path: web::Path<Uuid>,
    patch: web::Json<UpdateAnnouncementRequest>,
    auth_service: web::Data<AuthService>,
    announcement_service: web::Data<AnnouncementService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    announcement_handler::update_announcement(path.into_inner(), patch, auth_service, announcement_service, claims).await
}

#[delete("/{announcement_id}")]
async fn delete_announcement(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    announcement_service: web::Data<AnnouncementService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    announcement_handler::delete_announcement(path.into_inner(), auth_service, announcement_service, claims).await
}
