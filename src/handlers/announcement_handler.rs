use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::models::announcement::{AnnouncementQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest};
use crate::models::common::ApiResponse;
use crate::services::{AnnouncementService, AuthService};

pub async fn create_announcement(
    request: web::Json<CreateAnnouncementRequest>,
    auth_service: web::Data<AuthService>,
    announcement_service: web::Data<AnnouncementService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let announcement = announcement_service.create(&actor, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Announcement published", announcement)))
}

pub async fn list_announcements(
    query: web::Query<AnnouncementQuery>,
    announcement_service: web::Data<AnnouncementService>,
) -> Result<HttpResponse> {
    let announcements = announcement_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} announcements", announcements.len()),
        announcements,
    )))
}

pub async fn get_announcement(
    announcement_id: Uuid,
    announcement_service: web::Data<AnnouncementService>,
) -> Result<HttpResponse> {
    let announcement = announcement_service.get(announcement_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Announcement retrieved", announcement)))
}

pub async fn update_announcement(
    announcement_id: Uuid,
    patch: web::Json<UpdateAnnouncementRequest>,
    auth_service: web::Data<AuthService>,
    announcement_service: web::Data<AnnouncementService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let announcement = announcement_service
        .update(&actor, announcement_id, patch.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Announcement updated", announcement)))
}

pub async fn delete_announcement(
    announcement_id: Uuid,
    auth_service: web::Data<AuthService>,
    announcement_service: web::Data<AnnouncementService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    announcement_service.delete(&actor, announcement_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Announcement deleted")))
}
