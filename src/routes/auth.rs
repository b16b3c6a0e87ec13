use actix_web::{
    cookie::{Cookie, SameSite},
    web, HttpResponse,
};
use serde_json::json;
use validator::Validate;

use crate::error::{clear_token_cookie, AppError, AppResult};
use crate::middleware::AuthAdmin;
use crate::models::{ChangePasswordRequest, LoginRequest, SessionResponse};
use crate::services::AdminService;
use crate::utils::auth::{create_jwt, expires_at};
use crate::AppState;

/// Routes reachable without a session.
pub fn create_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout));
}

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/session", web::get().to(get_session))
        .route("/password", web::put().to(change_password));
}

async fn login(
    state: web::Data<AppState>,
    form_data: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    form_data.validate()?;

    let admin = AdminService::new(&state.db)
        .authenticate(&form_data.username, &form_data.password)
        .await?
        .ok_or_else(|| {
            tracing::info!("Failed login attempt for '{}'", form_data.username);
            AppError::InvalidCredentials
        })?;

    let token = create_jwt(admin.id, &state.config.jwt_secret, &state.config.jwt_expires_in)?;
    let expires_at = expires_at(&state.config.jwt_expires_in)?;

    let mut cookie = Cookie::new("token", token.clone());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(state.config.cookie_secure);
    cookie.set_path("/");
    if let Ok(expiry) = time::OffsetDateTime::from_unix_timestamp(expires_at) {
        cookie.set_expires(expiry);
    }

    tracing::info!("Admin '{}' signed in", admin.username);

    Ok(HttpResponse::Ok().cookie(cookie).json(SessionResponse {
        success: true,
        admin: (&admin).into(),
        token,
        token_type: "Bearer".to_string(),
        expires_at,
    }))
}

async fn logout() -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok()
        .cookie(clear_token_cookie())
        .json(json!({ "success": true })))
}

async fn get_session(auth_admin: AuthAdmin) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "admin": auth_admin.info(),
    })))
}

async fn change_password(
    state: web::Data<AppState>,
    auth_admin: AuthAdmin,
    form_data: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    form_data.validate()?;

    let service = AdminService::new(&state.db);
    service
        .authenticate(&auth_admin.username, &form_data.current_password)
        .await?
        .ok_or_else(|| AppError::BadRequest("Current password is incorrect".to_string()))?;

    service
        .update_password(auth_admin.id, &form_data.new_password)
        .await?;

    tracing::info!("Admin '{}' changed password", auth_admin.username);

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
