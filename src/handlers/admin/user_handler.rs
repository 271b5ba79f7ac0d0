use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::models::common::ApiResponse;
use crate::models::user::{CreatePrivilegedUserRequest, UserQuery};
use crate::services::{AuthService, UserService};

// GET /admin/users - List users with pagination and filtering
pub async fn get_users(
    query: web::Query<UserQuery>,
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let page = user_service.list_users(&actor, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

// GET /admin/users/{id}
pub async fn get_user_by_id(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let user = user_service.get_user(&actor, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("User retrieved", user)))
}

// POST /admin/users/management
pub async fn create_management_user(
    body: web::Json<CreatePrivilegedUserRequest>,
    auth_service: web::Data<AuthService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let user = auth_service.create_management_user(&actor, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Management user created", user)))
}

// POST /admin/users/captain
pub async fn create_captain_user(
    body: web::Json<CreatePrivilegedUserRequest>,
    auth_service: web::Data<AuthService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let user = auth_service.create_captain_user(&actor, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Captain created", user)))
}

// POST /admin/users/{id}/tournaments/{tournament_id}
pub async fn assign_tournament(
    path: web::Path<(Uuid, Uuid)>,
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (user_id, tournament_id) = path.into_inner();
    let actor = auth_service.current_user(&claims).await?;
    let user = user_service.assign_tournament(&actor, user_id, tournament_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tournament assigned", user)))
}

// DELETE /admin/users/{id}/tournaments/{tournament_id}
pub async fn unassign_tournament(
    path: web::Path<(Uuid, Uuid)>,
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (user_id, tournament_id) = path.into_inner();
    let actor = auth_service.current_user(&claims).await?;
    let user = user_service.unassign_tournament(&actor, user_id, tournament_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Tournament unassigned", user)))
}

// DELETE /admin/users/{id}
pub async fn delete_user(
    path: web::Path<Uuid>,
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    user_service.delete_user(&actor, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("User deleted")))
}
