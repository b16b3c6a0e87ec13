use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::AuthAdmin;
use crate::models::site_document::DocumentKind;
use crate::services::SiteDocumentService;
use crate::AppState;

const KINDS: [DocumentKind; 2] = [DocumentKind::Contact, DocumentKind::Footer];

pub fn create_public_routes(cfg: &mut web::ServiceConfig) {
    for kind in KINDS {
        cfg.service(
            web::resource(format!("/{}", kind.path()))
                .app_data(web::Data::new(kind))
                .route(web::get().to(get_document)),
        );
    }
}

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    for kind in KINDS {
        cfg.service(
            web::resource(format!("/{}", kind.path()))
                .app_data(web::Data::new(kind))
                .route(web::get().to(get_admin_document))
                .route(web::put().to(replace_document)),
        );
    }
}

async fn get_document(
    state: web::Data<AppState>,
    kind: web::Data<DocumentKind>,
) -> AppResult<HttpResponse> {
    let document = SiteDocumentService::new(&state.db).get(**kind).await?;
    Ok(HttpResponse::Ok().json(document))
}

async fn get_admin_document(
    state: web::Data<AppState>,
    kind: web::Data<DocumentKind>,
    _admin: AuthAdmin,
) -> AppResult<HttpResponse> {
    let document = SiteDocumentService::new(&state.db).get(**kind).await?;
    Ok(HttpResponse::Ok().json(document))
}

async fn replace_document(
    state: web::Data<AppState>,
    kind: web::Data<DocumentKind>,
    _admin: AuthAdmin,
    form_data: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let document = SiteDocumentService::new(&state.db)
        .replace(**kind, &form_data)
        .await?;

    tracing::info!("{} settings replaced", kind.as_str());
    Ok(HttpResponse::Ok().json(document))
}
