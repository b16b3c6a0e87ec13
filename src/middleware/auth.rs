use crate::error::AppError;
use crate::models::{AdminInfo, AdminUser};
use crate::services::AdminService;
use crate::utils::auth::{extract_bearer_token, verify_jwt};
use crate::AppState;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::Error as ActixError,
    http::header,
    web, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

/// The admin behind the current request, placed in the request extensions by
/// `AdminMiddleware`.
#[derive(Clone)]
pub struct AuthAdmin {
    pub admin: AdminUser,
}

impl AuthAdmin {
    pub fn info(&self) -> AdminInfo {
        AdminInfo::from(&self.admin)
    }
}

impl std::ops::Deref for AuthAdmin {
    type Target = AdminUser;

    fn deref(&self) -> &Self::Target {
        &self.admin
    }
}

impl actix_web::FromRequest for AuthAdmin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthAdmin>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(result)
    }
}

/// Token from `Authorization: Bearer`, falling back to the `token` cookie.
fn request_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer_token)
        .map(str::to_string)
        .or_else(|| req.cookie("token").map(|c| c.value().to_string()))
}

// Admin middleware factory
pub struct AdminMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = AdminMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::InternalServerError("App state not found".to_string()))?;

            let token = request_token(&req)
                .ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_string()))?;

            let claims = verify_jwt(&token, &state.config.jwt_secret).map_err(|e| {
                tracing::debug!("JWT verification failed: {:?}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?;

            let admin_id: i64 = claims
                .sub
                .parse()
                .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

            let admin = AdminService::new(&state.db)
                .get_by_id(admin_id)
                .await?
                .ok_or_else(|| AppError::Unauthorized("Admin not found".to_string()))?;

            req.extensions_mut().insert(AuthAdmin { admin });

            let res = service.call(req).await?;
            Ok(res)
        })
    }
}
