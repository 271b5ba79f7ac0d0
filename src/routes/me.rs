// src/routes/me.rs
use actix_web::{get, patch, post, web, HttpResponse, Result};

use crate::auth::jwt::Claims;
use crate::handlers::auth_handler;
use crate::models::user::{ChangePasswordRequest, UpdateProfileRequest};
use crate::services::{AuthService, UserService};

/// Profile of the logged-in user
#[get("")]
async fn get_me(
    auth_service: web::Data<AuthService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    auth_handler::get_me(auth_service, claims).await
}

#[patch("")]
async fn update_me(
    body: web::Json<UpdateProfileRequest>,
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    auth_handler::update_me(body, auth_service, user_service, claims).await
}

#[post("/password")]
async fn change_password(
    body: web::Json<ChangePasswordRequest>,
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    auth_handler::change_password(body, auth_service, user_service, claims).await
}
