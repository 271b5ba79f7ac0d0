// src/routes/auth.rs
use actix_web::{post, web, HttpResponse, Result};

use crate::handlers::auth_handler::{login_user, logout_user, signup_user};
use crate::models::auth::LoginRequest;
use crate::models::user::SignupRequest;
use crate::services::AuthService;

#[post("/signup")]
async fn signup(
    signup_form: web::Json<SignupRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse> {
    signup_user(signup_form, auth_service).await
}

#[post("/login")]
async fn login(
    login_form: web::Json<LoginRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse> {
    login_user(login_form, auth_service).await
}

#[post("/logout")]
async fn logout() -> Result<HttpResponse> {
    logout_user().await
}
