// src/handlers/auth_handler.rs
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpResponse, Result};

use crate::auth::jwt::{Claims, TOKEN_COOKIE};
use crate::models::auth::LoginRequest;
use crate::models::common::ApiResponse;
use crate::models::user::{
    ChangePasswordRequest, SignupRequest, UpdateProfileRequest, UserResponse,
};
use crate::services::{AuthService, UserService};

fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

#[tracing::instrument(
    name = "Adding a new user",
    skip(signup_form, auth_service),
    fields(
        username = %signup_form.username,
        email = %signup_form.email
    )
)]
pub async fn signup_user(
    signup_form: web::Json<SignupRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse> {
    let user = auth_service.signup(signup_form.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("User created successfully", user)))
}

/// Returns the token in the body and as an HttpOnly cookie.
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse> {
    let response = auth_service.login(login_form.into_inner()).await?;
    let cookie = session_cookie(
        response.token.clone(),
        auth_service.jwt_settings().cookie_max_age_secs(),
    );

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success("Login successful", response)))
}

pub async fn logout_user() -> Result<HttpResponse> {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "").path("/").finish();
    cookie.make_removal();
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::<()>::success_message("Logged out")))
}

pub async fn get_me(
    auth_service: web::Data<AuthService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user = auth_service.current_user(&claims).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Profile retrieved",
        UserResponse::from(&user),
    )))
}

pub async fn update_me(
    body: web::Json<UpdateProfileRequest>,
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    let user = user_service.update_profile(&actor, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Profile updated", user)))
}

pub async fn change_password(
    body: web::Json<ChangePasswordRequest>,
    auth_service: web::Data<AuthService>,
    user_service: web::Data<UserService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = auth_service.current_user(&claims).await?;
    user_service.change_password(&actor, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Password changed")))
}
